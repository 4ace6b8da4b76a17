// application/src/ports.rs
use crate::session::AdminCredential;
use async_trait::async_trait;
use shared::Result;
use shared::config::{DASHBOARD_ROUTE, LOGIN_ROUTE};
use shared_http::api::{Plan, PlanUpdateResponse, UsageStats};

// Ports are implemented by the UI shell (browser or desktop) and by test fakes.
// None of them require Send: everything runs on the UI thread.

/// Per-tab string key/value store.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Screens the console can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

impl Screen {
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Login => LOGIN_ROUTE,
            Screen::Dashboard => DASHBOARD_ROUTE,
        }
    }
}

pub trait Navigator {
    fn navigate(&self, screen: Screen);
}

/// User-facing notification. Resolves once the operator has dismissed it.
#[async_trait(?Send)]
pub trait Alerter {
    async fn alert(&self, message: &str);
}

/// The external admin API.
#[async_trait(?Send)]
pub trait AdminApi {
    async fn fetch_usage(&self, credential: &AdminCredential) -> Result<UsageStats>;

    async fn update_plan(
        &self,
        credential: &AdminCredential,
        email: &str,
        plan: Plan,
    ) -> Result<PlanUpdateResponse>;
}
