//! Browser and desktop implementations of the console ports.

use std::sync::Arc;

use application::ports::{Alerter, Navigator as NavigatorPort, Screen, SessionStorage};
use async_trait::async_trait;
use dioxus::prelude::*;

use crate::Route;

/// Routes console navigation through the Dioxus router.
#[derive(Clone, Copy)]
pub struct RouterNavigator {
    nav: Navigator,
}

impl RouterNavigator {
    pub fn new(nav: Navigator) -> Self {
        Self { nav }
    }
}

impl NavigatorPort for RouterNavigator {
    fn navigate(&self, screen: Screen) {
        info!("Navigating to {}", screen.path());
        let route = match screen {
            Screen::Login => Route::Login {},
            Screen::Dashboard => Route::Dashboard {},
        };
        self.nav.push(route);
    }
}

/// `window.alert`; returns once the operator closes the dialog.
pub struct DialogAlerter;

#[async_trait(?Send)]
impl Alerter for DialogAlerter {
    #[cfg(target_arch = "wasm32")]
    async fn alert(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            warn!("No window to alert in: {}", message);
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            warn!("Alert failed: {:?}", e);
        }
    }

    // The webview's alert blocks its script, so the eval settles on dismissal.
    #[cfg(not(target_arch = "wasm32"))]
    async fn alert(&self, message: &str) {
        let script = format!("alert({}); return true;", serde_json::Value::from(message));
        if let Err(e) = document::eval(&script).await {
            warn!("Alert failed: {:?}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use application::ports::SessionStorage;
    use shared::{Error, Result};
    use wasm_bindgen::JsValue;

    /// `window.sessionStorage`, scoped to the tab.
    pub struct BrowserSessionStorage;

    impl BrowserSessionStorage {
        fn storage() -> Result<web_sys::Storage> {
            web_sys::window()
                .ok_or_else(|| Error::Storage("no window".to_string()))?
                .session_storage()
                .map_err(js_error)?
                .ok_or_else(|| Error::Storage("session storage unavailable".to_string()))
        }
    }

    impl SessionStorage for BrowserSessionStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            Self::storage()?.get_item(key).map_err(js_error)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<()> {
            Self::storage()?.set_item(key, value).map_err(js_error)
        }

        fn remove_item(&self, key: &str) -> Result<()> {
            Self::storage()?.remove_item(key).map_err(js_error)
        }
    }

    fn js_error(err: JsValue) -> Error {
        Error::Storage(format!("{:?}", err))
    }

    pub fn page_origin() -> Option<String> {
        web_sys::window().and_then(|w| w.location().origin().ok())
    }
}

#[cfg(target_arch = "wasm32")]
pub fn session_storage() -> Arc<dyn SessionStorage> {
    Arc::new(browser::BrowserSessionStorage)
}

/// Desktop windows keep the session for the life of the process.
#[cfg(not(target_arch = "wasm32"))]
pub fn session_storage() -> Arc<dyn SessionStorage> {
    Arc::new(application::session::MemorySessionStorage::new())
}

#[cfg(target_arch = "wasm32")]
pub fn page_origin() -> Option<String> {
    browser::page_origin()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn page_origin() -> Option<String> {
    None
}
