pub mod stats;

pub use stats::{Activity, DashboardStats, Metric, Revenue, StatsService};
