//! Healthtant Frontend Entry Point

mod app;
mod client;
mod components;
mod context;
mod dom;
mod storage;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_logger::init_logger("Healthtant", LevelFilter::Info) {
        web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
    }

    let config = match dom::read_page_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("[MAIN] {}", e);
            return;
        }
    };
    log::info!("[MAIN] Page {:?}, signed in: {}", config.page, config.is_authenticated);

    dom::bind_login_guard(config.is_authenticated);

    match dom::mount_root() {
        Some(root) => mount_to(root, move || view! { <App config=config /> }).forget(),
        None => mount_to_body(move || view! { <App config=config /> }),
    }
}
