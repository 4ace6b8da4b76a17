mod requests;
mod responses;

pub use requests::{Plan, PlanUpdateRequest, UsageQuery};
pub use responses::{ErrorResponse, PlanUpdateResponse, UsageStats, display_value};
