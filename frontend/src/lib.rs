use leptos::*;

mod api;
mod components;
pub mod config;
mod pages;
pub mod router;
mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

/// Browser entry point: logging, panic hook, runtime config, then the app.
pub fn run() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Trace) {
        web_sys::console::warn_1(&format!("logger already installed: {}", err).into());
    }
    log::set_max_level(config::current().log_level);
    log::info!("starting attendance console");

    spawn_local(async move {
        let config = config::init().await;
        log::set_max_level(config.log_level);
        log::info!("runtime config initialized (api: {})", config.api_base_url);
        router::mount_app();
    });
}
