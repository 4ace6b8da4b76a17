use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

/// Query string of `GET /api/admin/usage`
#[derive(Debug, Serialize)]
pub struct UsageQuery<'a> {
    pub admin_token: &'a str,
}

/// Billing plans the admin API knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Plan {
    Free,
    ProMonthly,
    ProAnnual,
}

impl Plan {
    /// Label shown in the plan selector.
    pub fn label(&self) -> &'static str {
        match self {
            Plan::Free => "Free",
            Plan::ProMonthly => "Pro (monthly)",
            Plan::ProAnnual => "Pro (annual)",
        }
    }
}

/// Body of `PUT /api/admin/plan`
#[derive(Debug, Serialize)]
pub struct PlanUpdateRequest<'a> {
    pub email: &'a str,
    pub plan: Plan,
    pub admin_token: &'a str,
}
