//! Authentication guard component for protected routes

use super::context::use_auth;
use super::guard::{GuardDecision, Redirect, evaluate};
use crate::components::{LoadingSpinner, StatusCard};
use medadmin_core::{PublicPaths, routes};
use yew::prelude::*;
use yew_router::prelude::*;
use yew_router::AnyRoute;

#[derive(Properties, PartialEq)]
pub struct AuthGuardProps {
    pub children: Children,
    #[prop_or_default]
    pub require_admin: bool,
    #[prop_or_default]
    pub public_paths: PublicPaths,
}

/// Blocks its children until the session resolves to a user allowed to see
/// them, redirecting to the login or access-denied page otherwise
#[function_component(AuthGuard)]
pub fn auth_guard(props: &AuthGuardProps) -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let path = use_location().map_or_else(|| "/".to_string(), |location| location.path().to_string());

    let decision = evaluate(&auth.state, &path, props.require_admin, &props.public_paths);

    // Re-run whenever any input of the decision changes
    {
        let navigator = navigator.clone();
        let deps = (
            auth.is_loading(),
            auth.is_authenticated(),
            auth.is_admin(),
            props.require_admin,
            path.clone(),
        );
        use_effect_with(deps, move |_| {
            if let (Some(redirect), Some(navigator)) = (decision.navigation(), navigator) {
                tracing::debug!(to = redirect.path(), "route guard redirect");
                let target = AnyRoute::new(redirect.path());
                match redirect {
                    Redirect::Login => navigator.replace(&target),
                    Redirect::AccessDenied => navigator.push(&target),
                }
            }
        });
    }

    match decision {
        GuardDecision::Render => html! { <>{ props.children.clone() }</> },
        GuardDecision::Loading => html! {
            <div class="min-h-screen flex items-center justify-center">
                <LoadingSpinner text={"Verifying your authentication"} />
            </div>
        },
        GuardDecision::Redirect(Redirect::Login) => html! {
            <StatusCard
                title="Authentication Required"
                description="Please log in to access this page"
                action_label="Go To Login"
                action_path={routes::LOGIN}
            />
        },
        GuardDecision::Redirect(Redirect::AccessDenied) => html! {
            <StatusCard
                title="Access Denied"
                description="You don't have permission to access this page"
                action_label="Go to Dashboard"
                action_path={routes::ADMIN}
            />
        },
        GuardDecision::Blocked => html! {},
    }
}
