use crate::app::Route;
use medadmin_frontend_common::use_auth;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AdminLayoutProps {
    pub children: Children,
}

/// Top bar with the signed-in user and a logout button around admin pages
#[function_component(AdminLayout)]
pub fn admin_layout(props: &AdminLayoutProps) -> Html {
    let auth = use_auth();
    let signing_out = use_state(|| false);

    let on_logout = {
        let controller = auth.controller.clone();
        let signing_out = signing_out.clone();
        Callback::from(move |_: MouseEvent| {
            signing_out.set(true);
            let controller = controller.clone();
            wasm_bindgen_futures::spawn_local(async move {
                controller.logout().await;
            });
        })
    };

    let user_name = auth
        .user()
        .map(|user| user.display_name().to_string())
        .unwrap_or_default();

    html! {
        <div class="min-h-screen flex flex-col bg-gray-50">
            <header class="bg-white border-b border-gray-200">
                <div class="px-6 py-4 flex justify-between items-center">
                    <Link<Route> to={Route::Dashboard} classes="text-lg font-semibold text-gray-900">
                        {"Admin Panel"}
                    </Link<Route>>
                    <div class="flex items-center gap-4">
                        <span class="text-sm text-gray-600">{user_name}</span>
                        <button
                            onclick={on_logout}
                            disabled={*signing_out}
                            class="px-4 py-2 text-sm font-medium text-gray-700 bg-gray-100 hover:bg-gray-200 disabled:opacity-50 rounded-lg transition-colors"
                        >
                            {"Logout"}
                        </button>
                    </div>
                </div>
            </header>
            <main class="flex-1 overflow-auto p-6">
                {props.children.clone()}
            </main>
        </div>
    }
}

#[function_component(SectionNotFound)]
pub fn section_not_found() -> Html {
    html! {
        <div class="bg-white rounded-lg shadow p-6">
            <h2 class="text-xl font-bold text-gray-900 mb-2">{"Page not found"}</h2>
            <p class="text-gray-600">{"This section of the admin panel does not exist."}</p>
        </div>
    }
}
