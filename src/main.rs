//! VenueHub Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod favorites;
mod filters;
mod listing;
mod models;
mod pages;
mod payment;
mod store;
mod toast;

use app::App;
use config::{APP_NAME, LOG_CAPACITY};
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = rolling_logger::init_logger(APP_NAME, LOG_CAPACITY, level) {
        web_sys::console::warn_1(&format!("[{}] logger init failed: {}", APP_NAME, e).into());
    }
    log::info!("[app] starting");

    mount_to_body(App);
}
