mod access_denied;
mod dashboard;
mod layout;
mod login;

pub use access_denied::AccessDeniedPage;
pub use dashboard::DashboardPage;
pub use layout::{AdminLayout, SectionNotFound};
pub use login::LoginPage;
