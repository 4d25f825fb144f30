use medadmin_frontend_admin::App;
use medadmin_frontend_common::{logging::init_logging, AppConfig};

fn main() {
    init_logging(&AppConfig::from_build_env().log_level);
    yew::Renderer::<App>::new().render();
}
