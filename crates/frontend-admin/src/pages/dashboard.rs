use crate::services::{DashboardStats, StatsService};
use gloo::timers::callback::Interval;
use medadmin_frontend_common::{use_auth, LoadingSpinner};
use yew::prelude::*;

const REFRESH_INTERVAL_MS: u32 = 60_000;
const STATS_RETRIES: u32 = 3;

#[derive(Clone, PartialEq)]
enum StatsState {
    Loading,
    Loaded(DashboardStats),
    Failed(String),
}

fn format_trend(trend: Option<f64>) -> Html {
    match trend {
        Some(trend) if trend != 0.0 => {
            let (class, sign) = if trend > 0.0 {
                ("text-green-600", "+")
            } else {
                ("text-red-600", "")
            };
            html! { <span class={classes!("mr-1", class)}>{format!("{sign}{trend}%")}</span> }
        }
        _ => html! {},
    }
}

#[derive(Properties, PartialEq)]
struct StatCardProps {
    title: AttrValue,
    value: AttrValue,
    description: AttrValue,
    #[prop_or_default]
    trend: Option<f64>,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-white rounded-lg shadow p-4">
            <p class="text-sm font-medium text-gray-600">{props.title.clone()}</p>
            <p class="text-2xl font-bold text-gray-900">{props.value.clone()}</p>
            <p class="text-xs text-gray-500">
                {format_trend(props.trend)}
                {props.description.clone()}
            </p>
        </div>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let auth = use_auth();
    let stats = use_state(|| StatsState::Loading);

    {
        let stats = stats.clone();
        use_effect_with(auth.controller.clone(), move |controller| {
            let load = {
                let service = StatsService::new(controller.client().clone());
                move || {
                    let service = service.clone();
                    let stats = stats.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        match service.fetch_with_retry(STATS_RETRIES).await {
                            Ok(loaded) => stats.set(StatsState::Loaded(loaded)),
                            Err(err) => {
                                tracing::warn!(error = %err, "failed to load dashboard stats");
                                stats.set(StatsState::Failed(err.message().to_string()));
                            }
                        }
                    });
                }
            };

            load();
            let interval = Interval::new(REFRESH_INTERVAL_MS, load);
            move || drop(interval)
        });
    }

    let body = match &*stats {
        StatsState::Loading => html! { <LoadingSpinner /> },
        StatsState::Failed(message) => html! {
            <div class="bg-white border border-red-200 rounded-lg p-6">
                <p class="text-red-600">
                    {"Failed to load dashboard data. Please try refreshing the page."}
                </p>
                <p class="text-sm text-gray-500">{message.clone()}</p>
            </div>
        },
        StatsState::Loaded(stats) => html! {
            <>
                <div class="grid gap-4 md:grid-cols-2 lg:grid-cols-4">
                    <StatCard
                        title="Total Users"
                        value={stats.users.total.to_string()}
                        description="from last month"
                        trend={stats.users.trend}
                    />
                    <StatCard
                        title="Active Bookings"
                        value={stats.bookings.active.to_string()}
                        description="currently active"
                        trend={stats.bookings.trend}
                    />
                    <StatCard
                        title="Visa Applications"
                        value={stats.visa_applications.total.to_string()}
                        description="this month"
                        trend={stats.visa_applications.trend}
                    />
                    <StatCard
                        title="Revenue"
                        value={format!("${}", stats.revenue.total)}
                        description="this month"
                        trend={stats.revenue.trend}
                    />
                </div>
                <div class="bg-white rounded-lg shadow p-6 mt-4">
                    <h2 class="text-lg font-semibold text-gray-900">{"Recent Activity"}</h2>
                    <p class="text-sm text-gray-500 mb-4">{"Latest actions in your system"}</p>
                    if stats.recent_activity.is_empty() {
                        <p class="text-sm text-gray-500">{"No recent activity"}</p>
                    } else {
                        <ul class="space-y-4">
                            {for stats.recent_activity.iter().map(|activity| html! {
                                <li class="flex items-center gap-4">
                                    <div class="w-2 h-2 bg-blue-500 rounded-full"></div>
                                    <div>
                                        <p class="text-sm font-medium">{activity.action.clone()}</p>
                                        <p class="text-xs text-gray-500">{activity.timestamp.clone()}</p>
                                    </div>
                                </li>
                            })}
                        </ul>
                    }
                </div>
            </>
        },
    };

    html! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold text-gray-900">{"Dashboard"}</h1>
                <p class="text-gray-600">{"Welcome to your admin panel. Here's what's happening today."}</p>
            </div>
            {body}
        </div>
    }
}
