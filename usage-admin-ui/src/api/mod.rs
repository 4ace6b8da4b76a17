use std::sync::Arc;

use application::Console;
use application::http::HttpAdminApi;
use dioxus::prelude::info;
use shared::config::Config;

use crate::platform;

pub fn build_console(config: &Config) -> Console {
    let api = HttpAdminApi::new(config, platform::page_origin().as_deref());
    info!("Using admin API at {}", api.base_url());
    Console::new(platform::session_storage(), Arc::new(api))
}
