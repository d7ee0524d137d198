mod app_core;
mod app_router;
mod app_runtime;
mod drag_capture;
mod export;
mod input;
mod yew_app;

use app_core::StudioCore;

fn main() {
    console_error_panic_hook::set_once();
    let config = app_runtime::init_config();
    let seed = config.seed.unwrap_or_else(app_router::session_seed);
    gloo::console::log!("meshpaint boot", format!("seeded={}", config.seed.is_some()));
    let core = StudioCore::new(&config, seed);
    yew_app::run_app(core);
}
