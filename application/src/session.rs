use crate::ports::SessionStorage;
use dashmap::DashMap;
use shared::Result;
use shared::config::SESSION_TOKEN_KEY;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Opaque admin bearer string. Never empty; never validated locally.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredential(String);

impl AdminCredential {
    /// Returns `None` for the empty string. Whitespace is kept as typed.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AdminCredential").field(&"<redacted>").finish()
    }
}

/// The admin session of one browser tab.
///
/// Begins when the operator submits a token on the login screen and ends on
/// sign-out or when the tab's session storage goes away.
#[derive(Clone)]
pub struct AdminSession {
    storage: Arc<dyn SessionStorage>,
}

impl AdminSession {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn begin(&self, credential: &AdminCredential) -> Result<()> {
        self.storage.set_item(SESSION_TOKEN_KEY, credential.expose())?;
        debug!("Admin session started");
        Ok(())
    }

    /// The stored credential. Unreadable storage counts as no credential.
    pub fn credential(&self) -> Option<AdminCredential> {
        match self.storage.get_item(SESSION_TOKEN_KEY) {
            Ok(raw) => raw.and_then(AdminCredential::new),
            Err(e) => {
                warn!("Could not read admin session: {}", e);
                None
            }
        }
    }

    pub fn end(&self) -> Result<()> {
        self.storage.remove_item(SESSION_TOKEN_KEY)?;
        debug!("Admin session ended");
        Ok(())
    }
}

/// Process-local storage, used by the desktop shell and in tests.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    items: DashMap<String, String>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).map(|v| v.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}
