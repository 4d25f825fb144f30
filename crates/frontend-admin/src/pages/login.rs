use crate::app::Route;
use medadmin_frontend_common::auth::LoginOutcome;
use medadmin_frontend_common::use_auth;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let submitting = use_state(|| false);

    // Covers both an existing session and a login that just succeeded
    {
        let signed_in = !auth.is_loading() && auth.is_authenticated();
        use_effect_with(signed_in, move |signed_in| {
            if *signed_in {
                if let Some(navigator) = navigator {
                    navigator.replace(&Route::Dashboard);
                }
            }
        });
    }

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let controller = auth.controller.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            submitting.set(true);
            error.set(None);

            let controller = controller.clone();
            let email = (*email).clone();
            let password = (*password).clone();
            let error = error.clone();
            let submitting = submitting.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let LoginOutcome::Failure(message) = controller.login(&email, &password).await {
                    error.set(Some(message));
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 px-4">
            <div class="w-full max-w-md bg-white rounded-lg shadow p-8">
                <h1 class="text-2xl font-bold text-gray-900 mb-1">{"Admin Panel"}</h1>
                <p class="text-gray-600 mb-6">{"Sign in to manage the platform"}</p>

                if let Some(message) = (*error).clone() {
                    <div class="mb-4 p-3 bg-red-50 border border-red-200 rounded-lg text-sm text-red-700">
                        {message}
                    </div>
                }

                <form onsubmit={on_submit} class="space-y-4">
                    <div>
                        <label for="email" class="block text-sm font-medium text-gray-700 mb-1">{"Email"}</label>
                        <input
                            id="email"
                            type="email"
                            required=true
                            value={(*email).clone()}
                            oninput={on_email_input}
                            class="w-full px-3 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                        />
                    </div>
                    <div>
                        <label for="password" class="block text-sm font-medium text-gray-700 mb-1">{"Password"}</label>
                        <input
                            id="password"
                            type="password"
                            required=true
                            value={(*password).clone()}
                            oninput={on_password_input}
                            class="w-full px-3 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                        />
                    </div>
                    <button
                        type="submit"
                        disabled={*submitting}
                        class="w-full px-4 py-2 text-sm font-medium text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50 rounded-lg transition-colors"
                    >
                        {if *submitting { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
