//! Taskboard Frontend Entry Point

use leptos::prelude::*;
use taskboard_ui::app::App;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init(log::LevelFilter::Debug, rolling_logger::DEFAULT_CAPACITY) {
        web_sys::console::warn_1(&format!("logger already installed: {}", e).into());
    }
    log::info!("[APP] starting");
    mount_to_body(App);
}
