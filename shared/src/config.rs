use std::time::Duration;

use tracing::warn;

/// Session storage key holding the admin credential.
pub const SESSION_TOKEN_KEY: &str = "admin_token";

/// Client-side route of the dashboard screen.
pub const DASHBOARD_ROUTE: &str = "/manage";
/// Client-side route of the login screen.
pub const LOGIN_ROUTE: &str = "/manage/login";

pub const USAGE_PATH: &str = "/api/admin/usage";
pub const PLAN_PATH: &str = "/api/admin/plan";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Origin of the admin API. `None` means same origin as the page.
    pub api_server: Option<String>,
    pub request_timeout: Duration,
}

impl Config {
    const DEFAULT_NATIVE_API_SERVER: &str = "http://localhost:8000";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("USAGE_ADMIN_API_SERVER").ok(),
            std::env::var("USAGE_ADMIN_REQUEST_TIMEOUT_SECS").ok(),
        )
    }

    /// Builds the config from raw variable values, `None` meaning unset.
    pub fn from_vars(server: Option<String>, timeout_secs: Option<String>) -> Self {
        let api_server = server
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());
        let request_timeout = timeout_secs
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    warn!(
                        "USAGE_ADMIN_REQUEST_TIMEOUT_SECS={raw:?} is not a number, using default"
                    );
                    None
                }
            })
            .unwrap_or(Self::DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            api_server,
            request_timeout: Duration::from_secs(request_timeout),
        }
    }

    /// Base URL requests are resolved against. `same_origin` is the page origin
    /// when running inside a browser.
    pub fn base_url(&self, same_origin: Option<&str>) -> String {
        match (&self.api_server, same_origin) {
            (Some(server), _) => server.clone(),
            (None, Some(origin)) => origin.trim_end_matches('/').to_string(),
            (None, None) => Self::DEFAULT_NATIVE_API_SERVER.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_server: None,
            request_timeout: Duration::from_secs(Self::DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}
