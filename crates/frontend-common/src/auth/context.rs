//! Auth context provider and hooks

use super::controller::AuthSessionController;
use super::state::AuthState;
use medadmin_core::SessionUser;
use yew::prelude::*;

/// Value published to the component tree
#[derive(Clone, PartialEq)]
pub struct AuthContext {
    pub controller: AuthSessionController,
    pub state: AuthState,
}

impl AuthContext {
    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.state.is_admin()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.state.user.as_ref()
    }
}

/// Auth provider props
#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    /// Controller built at the application root
    pub controller: AuthSessionController,
    pub children: Children,
}

/// Publishes the controller state and resolves the session on mount
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let state = use_state(|| props.controller.state());

    {
        let state = state.clone();
        use_effect_with(props.controller.clone(), move |controller| {
            let subscription = {
                let state = state.clone();
                controller.subscribe(move |next| state.set(next.clone()))
            };
            // Pick up anything assigned before the subscription existed
            state.set(controller.state());

            let controller = controller.clone();
            wasm_bindgen_futures::spawn_local(async move {
                controller.initialize().await;
            });

            move || drop(subscription)
        });
    }

    let context = AuthContext {
        controller: props.controller.clone(),
        state: (*state).clone(),
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Hook to use auth context
#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .expect("AuthContext not found. Make sure to wrap your component with AuthProvider")
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    use_auth().is_authenticated()
}

#[hook]
pub fn use_is_admin() -> bool {
    use_auth().is_admin()
}
