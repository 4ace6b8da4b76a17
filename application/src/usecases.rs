use crate::ports::{AdminApi, Alerter, Navigator, Screen};
use crate::session::{AdminCredential, AdminSession};
use crate::usage_table::UsageTable;
use futures::future::{AbortHandle, AbortRegistration, Abortable, Aborted};
use shared::{Error, Result};
use shared_http::api::Plan;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const USAGE_LOAD_FAILED_MESSAGE: &str =
    "Failed to load usage stats. Check your token or backend connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Empty input, nothing stored and no navigation.
    Ignored,
    Entered,
}

#[derive(Clone)]
pub struct LoginUseCase {
    session: AdminSession,
}
impl LoginUseCase {
    pub fn new(session: AdminSession) -> Self {
        Self { session }
    }
    pub fn submit(&self, input: &str, navigator: &dyn Navigator) -> Result<LoginOutcome> {
        let Some(credential) = AdminCredential::new(input) else {
            debug!("Empty admin token submitted, ignoring");
            return Ok(LoginOutcome::Ignored);
        };
        self.session.begin(&credential)?;
        info!("Admin token stored, opening dashboard");
        navigator.navigate(Screen::Dashboard);
        Ok(LoginOutcome::Entered)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RedirectReason {
    MissingCredential,
    LoadFailed(Error),
}

/// `Loading -> {Loaded | Redirecting}`
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Loaded(UsageTable),
    Redirecting(RedirectReason),
}

/// Lifetime of one dashboard activation. Dropping it aborts the pending load.
#[derive(Debug)]
pub struct ActivationScope {
    handle: AbortHandle,
}

impl ActivationScope {
    pub fn open() -> (Self, AbortRegistration) {
        let (handle, registration) = AbortHandle::new_pair();
        (Self { handle }, registration)
    }
}

impl Drop for ActivationScope {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Clone)]
pub struct DashboardUseCase {
    session: AdminSession,
    api: Arc<dyn AdminApi>,
}
impl DashboardUseCase {
    pub fn new(session: AdminSession, api: Arc<dyn AdminApi>) -> Self {
        Self { session, api }
    }

    /// Runs one activation of the dashboard screen.
    ///
    /// Returns `Err(Aborted)` when the activation scope closed before the
    /// usage request finished; nothing is alerted or navigated in that case.
    pub async fn activate(
        &self,
        navigator: &dyn Navigator,
        alerter: &dyn Alerter,
        scope: AbortRegistration,
    ) -> std::result::Result<DashboardState, Aborted> {
        let Some(credential) = self.session.credential() else {
            info!("No admin token in session, redirecting to login");
            navigator.navigate(Screen::Login);
            return Ok(DashboardState::Redirecting(RedirectReason::MissingCredential));
        };

        let loaded = Abortable::new(self.api.fetch_usage(&credential), scope).await;
        let loaded = match loaded {
            Ok(loaded) => loaded,
            Err(aborted) => {
                debug!("Dashboard deactivated before usage stats arrived");
                return Err(aborted);
            }
        };

        match loaded {
            Ok(stats) => {
                info!("Loaded usage stats for {} API keys", stats.len());
                Ok(DashboardState::Loaded(UsageTable::from(&stats)))
            }
            Err(err) => {
                warn!(kind = err.kind(), "Failed to load usage stats: {}", err);
                alerter.alert(USAGE_LOAD_FAILED_MESSAGE).await;
                navigator.navigate(Screen::Login);
                Ok(DashboardState::Redirecting(RedirectReason::LoadFailed(err)))
            }
        }
    }
}

#[derive(Clone)]
pub struct SignOutUseCase {
    session: AdminSession,
}
impl SignOutUseCase {
    pub fn new(session: AdminSession) -> Self {
        Self { session }
    }
    pub fn exec(&self, navigator: &dyn Navigator) -> Result<()> {
        self.session.end()?;
        info!("Signed out of admin console");
        navigator.navigate(Screen::Login);
        Ok(())
    }
}

#[derive(Clone)]
pub struct PlanUpdateUseCase {
    session: AdminSession,
    api: Arc<dyn AdminApi>,
}
impl PlanUpdateUseCase {
    pub fn new(session: AdminSession, api: Arc<dyn AdminApi>) -> Self {
        Self { session, api }
    }

    /// Moves every API key of `email` to `plan`, returning the backend message.
    pub async fn exec(&self, email: &str, plan: Plan) -> Result<String> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(Error::InvalidInput(format!(
                "{email:?} is not an email address"
            )));
        }
        let credential = self.session.credential().ok_or(Error::MissingCredential)?;
        let response = self.api.update_plan(&credential, email, plan).await?;
        info!(%plan, "Plan updated");
        Ok(response.message)
    }

    /// Text shown to the operator when a plan update fails.
    pub fn describe_error(err: &Error) -> String {
        match err {
            Error::InvalidInput(_) => "Enter the customer's email address.".to_string(),
            _ if err.is_auth_failure() => {
                "The admin token was rejected. Sign in again.".to_string()
            }
            Error::Rejected { detail, .. } if !detail.is_empty() => {
                format!("Plan update failed: {detail}")
            }
            _ => "Plan update failed. Check your backend connection.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SessionStorage;
    use crate::session::MemorySessionStorage;
    use crate::usage_table::UsageRow;
    use async_trait::async_trait;
    use serde_json::json;
    use shared_http::api::{PlanUpdateResponse, UsageStats};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNavigator {
        visits: RefCell<Vec<Screen>>,
    }
    impl Navigator for RecordingNavigator {
        fn navigate(&self, screen: Screen) {
            self.visits.borrow_mut().push(screen);
        }
    }

    #[derive(Default)]
    struct RecordingAlerter {
        messages: RefCell<Vec<String>>,
    }
    #[async_trait(?Send)]
    impl Alerter for RecordingAlerter {
        async fn alert(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }
    }

    /// Navigator and alerter sharing one timeline.
    #[derive(Default)]
    struct Timeline {
        events: RefCell<Vec<String>>,
    }
    impl Navigator for Timeline {
        fn navigate(&self, screen: Screen) {
            self.events.borrow_mut().push(format!("navigate {}", screen.path()));
        }
    }
    #[async_trait(?Send)]
    impl Alerter for Timeline {
        async fn alert(&self, _message: &str) {
            self.events.borrow_mut().push("alert shown".to_string());
            futures::future::ready(()).await;
            self.events.borrow_mut().push("alert dismissed".to_string());
        }
    }

    /// Readable storage that refuses every write.
    struct ReadOnlyStorage;
    impl SessionStorage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Ok(Some("abc123".to_string()))
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("QuotaExceededError".to_string()))
        }
        fn remove_item(&self, _key: &str) -> Result<()> {
            Err(Error::Storage("SecurityError".to_string()))
        }
    }

    struct ScriptedApi {
        usage: Result<UsageStats>,
        plan: Result<PlanUpdateResponse>,
        usage_calls: RefCell<Vec<String>>,
        plan_calls: RefCell<Vec<(String, String, Plan)>>,
    }
    impl ScriptedApi {
        fn answering(usage: Result<UsageStats>) -> Self {
            Self {
                usage,
                plan: Ok(PlanUpdateResponse {
                    message: "Plan updated to pro_annual".to_string(),
                }),
                usage_calls: RefCell::new(Vec::new()),
                plan_calls: RefCell::new(Vec::new()),
            }
        }
    }
    #[async_trait(?Send)]
    impl AdminApi for ScriptedApi {
        async fn fetch_usage(&self, credential: &AdminCredential) -> Result<UsageStats> {
            self.usage_calls
                .borrow_mut()
                .push(credential.expose().to_string());
            self.usage.clone()
        }

        async fn update_plan(
            &self,
            credential: &AdminCredential,
            email: &str,
            plan: Plan,
        ) -> Result<PlanUpdateResponse> {
            self.plan_calls.borrow_mut().push((
                credential.expose().to_string(),
                email.to_string(),
                plan,
            ));
            self.plan.clone()
        }
    }

    fn stats(value: serde_json::Value) -> UsageStats {
        UsageStats::try_from(value).unwrap()
    }

    fn setup(
        usage: Result<UsageStats>,
    ) -> (Arc<MemorySessionStorage>, Arc<ScriptedApi>, AdminSession) {
        let storage = Arc::new(MemorySessionStorage::new());
        let api = Arc::new(ScriptedApi::answering(usage));
        let session = AdminSession::new(storage.clone());
        (storage, api, session)
    }

    #[test]
    fn test_login_empty_token_is_noop() {
        let (storage, _, session) = setup(Ok(UsageStats::default()));
        let navigator = RecordingNavigator::default();

        let outcome = LoginUseCase::new(session).submit("", &navigator).unwrap();

        assert_eq!(outcome, LoginOutcome::Ignored);
        assert!(storage.get_item("admin_token").unwrap().is_none());
        assert!(navigator.visits.borrow().is_empty());
    }

    #[test]
    fn test_login_stores_token_and_navigates_once() {
        let (storage, _, session) = setup(Ok(UsageStats::default()));
        let navigator = RecordingNavigator::default();

        let outcome = LoginUseCase::new(session).submit("abc123", &navigator).unwrap();

        assert_eq!(outcome, LoginOutcome::Entered);
        assert_eq!(storage.get_item("admin_token").unwrap().as_deref(), Some("abc123"));
        assert_eq!(*navigator.visits.borrow(), vec![Screen::Dashboard]);
    }

    #[test]
    fn test_login_overwrites_previous_token() {
        let (storage, _, session) = setup(Ok(UsageStats::default()));
        storage.set_item("admin_token", "old").unwrap();
        let navigator = RecordingNavigator::default();

        LoginUseCase::new(session).submit("new", &navigator).unwrap();

        assert_eq!(storage.get_item("admin_token").unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_dashboard_without_token_redirects_without_request() {
        let (_, api, session) = setup(Ok(UsageStats::default()));
        let navigator = RecordingNavigator::default();
        let alerter = RecordingAlerter::default();
        let (_scope, registration) = ActivationScope::open();

        let state = DashboardUseCase::new(session, api.clone())
            .activate(&navigator, &alerter, registration)
            .await
            .unwrap();

        assert_eq!(
            state,
            DashboardState::Redirecting(RedirectReason::MissingCredential)
        );
        assert_eq!(*navigator.visits.borrow(), vec![Screen::Login]);
        assert!(api.usage_calls.borrow().is_empty());
        assert!(alerter.messages.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_loads_rows_in_order() {
        let (storage, api, session) = setup(Ok(stats(json!({"key1": "5", "key2": "12"}))));
        storage.set_item("admin_token", "abc123").unwrap();
        let navigator = RecordingNavigator::default();
        let alerter = RecordingAlerter::default();
        let (_scope, registration) = ActivationScope::open();

        let state = DashboardUseCase::new(session, api.clone())
            .activate(&navigator, &alerter, registration)
            .await
            .unwrap();

        let table = match state {
            DashboardState::Loaded(table) => table,
            other => panic!("expected a loaded table, got {:?}", other),
        };
        assert_eq!(
            table.rows,
            vec![
                UsageRow {
                    api_key: "key1".to_string(),
                    count: "5".to_string()
                },
                UsageRow {
                    api_key: "key2".to_string(),
                    count: "12".to_string()
                },
            ]
        );
        assert_eq!(*api.usage_calls.borrow(), vec!["abc123".to_string()]);
        assert!(navigator.visits.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_empty_object_renders_header_only() {
        let (storage, api, session) = setup(Ok(stats(json!({}))));
        storage.set_item("admin_token", "abc123").unwrap();
        let navigator = RecordingNavigator::default();
        let alerter = RecordingAlerter::default();
        let (_scope, registration) = ActivationScope::open();

        let state = DashboardUseCase::new(session, api)
            .activate(&navigator, &alerter, registration)
            .await
            .unwrap();

        assert_eq!(state, DashboardState::Loaded(UsageTable::default()));
        assert!(alerter.messages.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_failure_alerts_and_keeps_token() {
        for failure in [
            Error::MalformedBody("expected value at line 1 column 1".to_string()),
            Error::Unauthorized(403),
            Error::Transport("connection refused".to_string()),
        ] {
            let (storage, api, session) = setup(Err(failure.clone()));
            storage.set_item("admin_token", "abc123").unwrap();
            let navigator = RecordingNavigator::default();
            let alerter = RecordingAlerter::default();
            let (_scope, registration) = ActivationScope::open();

            let state = DashboardUseCase::new(session, api)
                .activate(&navigator, &alerter, registration)
                .await
                .unwrap();

            assert_eq!(
                state,
                DashboardState::Redirecting(RedirectReason::LoadFailed(failure))
            );
            assert_eq!(
                *alerter.messages.borrow(),
                vec![USAGE_LOAD_FAILED_MESSAGE.to_string()]
            );
            assert_eq!(*navigator.visits.borrow(), vec![Screen::Login]);
            assert_eq!(storage.get_item("admin_token").unwrap().as_deref(), Some("abc123"));
        }
    }

    #[tokio::test]
    async fn test_dashboard_closed_scope_applies_nothing() {
        let (storage, api, session) = setup(Err(Error::Unauthorized(403)));
        storage.set_item("admin_token", "abc123").unwrap();
        let navigator = RecordingNavigator::default();
        let alerter = RecordingAlerter::default();
        let (scope, registration) = ActivationScope::open();
        drop(scope);

        let result = DashboardUseCase::new(session, api)
            .activate(&navigator, &alerter, registration)
            .await;

        assert!(result.is_err());
        assert!(navigator.visits.borrow().is_empty());
        assert!(alerter.messages.borrow().is_empty());
    }

    #[test]
    fn test_activation_scope_closes_on_drop() {
        let (scope, _registration) = ActivationScope::open();
        let handle = scope.handle.clone();
        assert!(!handle.is_aborted());
        drop(scope);
        assert!(handle.is_aborted());
    }

    #[tokio::test]
    async fn test_dashboard_failure_navigates_after_alert_is_dismissed() {
        let (storage, api, session) = setup(Err(Error::Unauthorized(403)));
        storage.set_item("admin_token", "abc123").unwrap();
        let timeline = Timeline::default();
        let (_scope, registration) = ActivationScope::open();

        DashboardUseCase::new(session, api)
            .activate(&timeline, &timeline, registration)
            .await
            .unwrap();

        assert_eq!(
            *timeline.events.borrow(),
            vec![
                "alert shown".to_string(),
                "alert dismissed".to_string(),
                "navigate /manage/login".to_string()
            ]
        );
    }

    #[test]
    fn test_login_storage_failure_does_not_navigate() {
        let session = AdminSession::new(Arc::new(ReadOnlyStorage));
        let navigator = RecordingNavigator::default();

        let err = LoginUseCase::new(session)
            .submit("abc123", &navigator)
            .unwrap_err();

        assert_eq!(err.kind(), "storage");
        assert!(navigator.visits.borrow().is_empty());
    }

    #[test]
    fn test_sign_out_storage_failure_does_not_navigate() {
        let session = AdminSession::new(Arc::new(ReadOnlyStorage));
        let navigator = RecordingNavigator::default();

        let err = SignOutUseCase::new(session).exec(&navigator).unwrap_err();

        assert_eq!(err.kind(), "storage");
        assert!(navigator.visits.borrow().is_empty());
    }

    #[test]
    fn test_sign_out_clears_token_and_navigates_once() {
        let (storage, _, session) = setup(Ok(UsageStats::default()));
        storage.set_item("admin_token", "abc123").unwrap();
        let navigator = RecordingNavigator::default();

        SignOutUseCase::new(session).exec(&navigator).unwrap();

        assert!(storage.get_item("admin_token").unwrap().is_none());
        assert_eq!(*navigator.visits.borrow(), vec![Screen::Login]);
    }

    #[tokio::test]
    async fn test_plan_update_sends_credential() {
        let (storage, api, session) = setup(Ok(UsageStats::default()));
        storage.set_item("admin_token", "abc123").unwrap();

        let message = PlanUpdateUseCase::new(session, api.clone())
            .exec("  ops@example.com ", Plan::ProAnnual)
            .await
            .unwrap();

        assert_eq!(message, "Plan updated to pro_annual");
        assert_eq!(
            *api.plan_calls.borrow(),
            vec![(
                "abc123".to_string(),
                "ops@example.com".to_string(),
                Plan::ProAnnual
            )]
        );
    }

    #[tokio::test]
    async fn test_plan_update_rejects_bad_email_without_request() {
        let (storage, api, session) = setup(Ok(UsageStats::default()));
        storage.set_item("admin_token", "abc123").unwrap();
        let usecase = PlanUpdateUseCase::new(session, api.clone());

        for email in ["", "   ", "not-an-email"] {
            let err = usecase.exec(email, Plan::Free).await.unwrap_err();
            assert_eq!(err.kind(), "invalid_input");
        }
        assert!(api.plan_calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_plan_update_requires_session() {
        let (_, api, session) = setup(Ok(UsageStats::default()));

        let err = PlanUpdateUseCase::new(session, api.clone())
            .exec("ops@example.com", Plan::Free)
            .await
            .unwrap_err();

        assert_eq!(err, Error::MissingCredential);
        assert!(api.plan_calls.borrow().is_empty());
    }

    #[test]
    fn test_plan_error_text() {
        assert_eq!(
            PlanUpdateUseCase::describe_error(&Error::Rejected {
                status: 400,
                detail: "Invalid plan".to_string()
            }),
            "Plan update failed: Invalid plan"
        );
        assert_eq!(
            PlanUpdateUseCase::describe_error(&Error::Unauthorized(403)),
            "The admin token was rejected. Sign in again."
        );
        assert_eq!(
            PlanUpdateUseCase::describe_error(&Error::MissingCredential),
            "The admin token was rejected. Sign in again."
        );
        assert_eq!(
            PlanUpdateUseCase::describe_error(&Error::Transport("timed out".to_string())),
            "Plan update failed. Check your backend connection."
        );
    }
}
