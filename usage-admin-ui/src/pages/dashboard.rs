use std::rc::Rc;

use application::Console;
use application::usecases::{ActivationScope, DashboardState};
use dioxus::prelude::*;

use crate::platform::{DialogAlerter, RouterNavigator};
use crate::widgets::header::Header;
use crate::widgets::plan_override::PlanOverride;
use crate::widgets::usage_table::UsageTableView;

#[component]
pub fn Dashboard() -> Element {
    let console = use_context::<Console>();
    let nav = navigator();
    let mut state = use_signal(|| DashboardState::Loading);

    // The scope lives as long as this component; unmounting aborts the load so
    // a late response never touches a dropped signal.
    use_hook(move || {
        let (scope, registration) = ActivationScope::open();
        let dashboard = console.dashboard.clone();
        spawn(async move {
            let navigator = RouterNavigator::new(nav);
            if let Ok(next) = dashboard
                .activate(&navigator, &DialogAlerter, registration)
                .await
            {
                state.set(next);
            }
        });
        Rc::new(scope)
    });

    match state() {
        DashboardState::Loading => rsx! {
            p { class: "loading", "Loading..." }
        },
        DashboardState::Redirecting(_) => rsx! {},
        DashboardState::Loaded(table) => rsx! {
            div { class: "dashboard",
                Header {}
                h2 { "API Key Usage (today)" }
                UsageTableView { table: table }
                PlanOverride {}
            }
        },
    }
}
