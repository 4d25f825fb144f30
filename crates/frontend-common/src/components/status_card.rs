//! Full-page notice card with an optional navigation button

use yew::prelude::*;
use yew_router::prelude::*;
use yew_router::AnyRoute;

#[derive(Properties, Clone, PartialEq)]
pub struct StatusCardProps {
    pub title: AttrValue,
    pub description: AttrValue,
    #[prop_or_default]
    pub action_label: Option<AttrValue>,
    #[prop_or_default]
    pub action_path: Option<AttrValue>,
}

#[function_component(StatusCard)]
pub fn status_card(props: &StatusCardProps) -> Html {
    let navigator = use_navigator();

    let action = match (&props.action_label, &props.action_path) {
        (Some(label), Some(path)) => {
            let onclick = {
                let path = path.clone();
                Callback::from(move |_: MouseEvent| {
                    if let Some(navigator) = &navigator {
                        navigator.push(&AnyRoute::new(path.to_string()));
                    }
                })
            };
            html! {
                <button
                    {onclick}
                    class="w-full px-4 py-2 text-sm font-medium text-white bg-blue-600 hover:bg-blue-700 rounded-lg transition-colors"
                >
                    {label.clone()}
                </button>
            }
        }
        _ => html! {},
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 p-4">
            <div class="w-full max-w-md text-center bg-white rounded-lg shadow p-6">
                <div class="mx-auto w-12 h-12 bg-red-100 rounded-full flex items-center justify-center mb-4">
                    <span class="text-red-600 text-xl font-bold">{"!"}</span>
                </div>
                <h2 class="text-xl font-bold text-gray-900 mb-2">{props.title.clone()}</h2>
                <p class="text-gray-600 mb-6">{props.description.clone()}</p>
                {action}
            </div>
        </div>
    }
}
