use dioxus::prelude::info;
use shared::config::Config;

/// Console configuration for this process.
///
/// Inside a browser there is no process environment, so this yields the
/// defaults and requests go to the page's own origin.
pub fn load() -> Config {
    let config = Config::from_env();
    match &config.api_server {
        Some(server) => info!("Admin API server: {}", server),
        None => info!("Admin API server: same origin"),
    }
    config
}
