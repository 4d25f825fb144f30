use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(AccessDeniedPage)]
pub fn access_denied_page() -> Html {
    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 p-4">
            <div class="w-full max-w-md text-center bg-white rounded-lg shadow p-6">
                <div class="mx-auto w-12 h-12 bg-red-100 rounded-full flex items-center justify-center mb-4">
                    <span class="text-red-600 text-xl font-bold">{"!"}</span>
                </div>
                <h2 class="text-xl font-bold text-gray-900 mb-2">{"Access Denied"}</h2>
                <p class="text-gray-600 mb-6">
                    {"You don't have permission to access this area. Sign in with an administrator account to continue."}
                </p>
                <div class="flex flex-col gap-2">
                    <Link<Route> to={Route::Login} classes="w-full px-4 py-2 text-sm font-medium text-white bg-blue-600 hover:bg-blue-700 rounded-lg">
                        {"Go to Login"}
                    </Link<Route>>
                    <Link<Route> to={Route::Dashboard} classes="w-full px-4 py-2 text-sm font-medium text-gray-700 bg-gray-100 hover:bg-gray-200 rounded-lg">
                        {"Back to Dashboard"}
                    </Link<Route>>
                </div>
            </div>
        </div>
    }
}
