use crate::pages::{AccessDeniedPage, AdminLayout, DashboardPage, LoginPage, SectionNotFound};
use medadmin_core::{Navigator, PublicPaths};
use medadmin_frontend_common::{
    create_session_client, AppConfig, AuthGuard, AuthProvider, AuthSessionController,
    BrowserNavigator, StatusCard,
};
use std::sync::Arc;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/admin")]
    Dashboard,
    #[at("/admin/*")]
    AdminSection,
    #[at("/access-denied")]
    AccessDenied,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Everything the component tree needs from startup
#[derive(Clone, PartialEq)]
struct Session {
    controller: AuthSessionController,
    public_paths: PublicPaths,
}

fn start_session() -> Result<Session, String> {
    let config = AppConfig::from_build_env();
    config.validate().map_err(|e| e.to_string())?;

    let navigator: Arc<dyn Navigator> = Arc::new(BrowserNavigator);
    let client = create_session_client(&config, Arc::clone(&navigator)).map_err(|e| e.to_string())?;
    tracing::info!(backend = %config.backend_url, "session client ready");

    Ok(Session {
        controller: AuthSessionController::new(client, navigator),
        public_paths: config.public_paths,
    })
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_memo((), |_| start_session());

    match &*session {
        Ok(session) => html! {
            <BrowserRouter>
                <AuthProvider controller={session.controller.clone()}>
                    <RoutedContent public_paths={session.public_paths.clone()} />
                </AuthProvider>
            </BrowserRouter>
        },
        Err(message) => {
            tracing::error!(%message, "startup failed");
            html! {
                <StatusCard title="Configuration Error" description={message.clone()} />
            }
        }
    }
}

#[derive(Properties, PartialEq)]
struct RoutedContentProps {
    public_paths: PublicPaths,
}

#[function_component(RoutedContent)]
fn routed_content(props: &RoutedContentProps) -> Html {
    let public_paths = props.public_paths.clone();
    html! {
        <Switch<Route> render={move |route: Route| switch(route, &public_paths)} />
    }
}

fn switch(route: Route, public_paths: &PublicPaths) -> Html {
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::Dashboard} /> },
        Route::Login => html! { <LoginPage /> },
        Route::AccessDenied => html! { <AccessDeniedPage /> },
        Route::Dashboard => html! {
            <AuthGuard require_admin=true public_paths={public_paths.clone()}>
                <AdminLayout>
                    <DashboardPage />
                </AdminLayout>
            </AuthGuard>
        },
        Route::AdminSection => html! {
            <AuthGuard require_admin=true public_paths={public_paths.clone()}>
                <AdminLayout>
                    <SectionNotFound />
                </AdminLayout>
            </AuthGuard>
        },
        Route::NotFound => html! { <Redirect<Route> to={Route::Dashboard} /> },
    }
}
