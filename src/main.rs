//! Library Catalog Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod filter;
mod form;
mod logging;
mod store;
mod sync;
mod table;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
    mount_to_body(App);
}
