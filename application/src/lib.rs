// application/src/lib.rs
pub mod http;
pub mod ports;
pub mod session;
pub mod usage_table;
pub mod usecases;

use ports::{AdminApi, SessionStorage};
use session::AdminSession;
use std::sync::Arc;
use usecases::{DashboardUseCase, LoginUseCase, PlanUpdateUseCase, SignOutUseCase};

/// Every operation the admin console exposes, wired to one session and one API.
#[derive(Clone)]
pub struct Console {
    pub login: LoginUseCase,
    pub dashboard: DashboardUseCase,
    pub sign_out: SignOutUseCase,
    pub plan: PlanUpdateUseCase,
}

impl Console {
    pub fn new(storage: Arc<dyn SessionStorage>, api: Arc<dyn AdminApi>) -> Self {
        let session = AdminSession::new(storage);
        Self {
            login: LoginUseCase::new(session.clone()),
            dashboard: DashboardUseCase::new(session.clone(), api.clone()),
            sign_out: SignOutUseCase::new(session.clone()),
            plan: PlanUpdateUseCase::new(session, api),
        }
    }
}
