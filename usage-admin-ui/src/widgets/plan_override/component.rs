use std::str::FromStr;
use std::time::Duration;

use application::Console;
use application::usecases::PlanUpdateUseCase;
use dioxus::prelude::*;
use dioxus_primitives::toast::{ToastOptions, use_toast};
use shared_http::api::Plan;
use strum::IntoEnumIterator;

use crate::components::{button::Button, input::Input};

/// Moves a customer's API keys to another plan.
#[component]
pub fn PlanOverride() -> Element {
    let console = use_context::<Console>();
    let mut email: Signal<String> = use_signal(String::new);
    let mut plan: Signal<Plan> = use_signal(|| Plan::Free);
    let mut pending = use_signal(|| false);
    let toaster = use_toast();

    let options = Plan::iter().map(|option| {
        rsx! {
            option {
                value: "{option}",
                selected: option == plan(),
                "{option.label()}"
            }
        }
    });

    rsx! {
        section { class: "plan-override",
            h2 { "Change plan" }
            form {
                class: "plan-form",
                onsubmit: move |e: FormEvent| {
                    e.prevent_default();
                    if pending() {
                        return;
                    }
                    let usecase = console.plan.clone();
                    let email_val = email();
                    let plan_val = plan();
                    pending.set(true);

                    spawn(async move {
                        match usecase.exec(&email_val, plan_val).await {
                            Ok(message) => {
                                let success_options = ToastOptions::new()
                                    .duration(Duration::from_secs(3))
                                    .permanent(false);
                                toaster.success(message, success_options);
                            }
                            Err(err) => {
                                warn!("Plan update failed: {}", err);
                                toaster
                                    .error(
                                        PlanUpdateUseCase::describe_error(&err),
                                        ToastOptions::new().permanent(true),
                                    );
                            }
                        }
                        pending.set(false);
                    });
                },
                div { class: "form-group",
                    label { r#for: "plan-email", "Customer email" }
                    Input {
                        id: "plan-email",
                        input_type: "email",
                        placeholder: "customer@example.com",
                        value: email(),
                        oninput: move |e: FormEvent| email.set(e.value()),
                    }
                }
                div { class: "form-group",
                    label { r#for: "plan-select", "Plan" }
                    select {
                        id: "plan-select",
                        class: "select",
                        onchange: move |e: FormEvent| match Plan::from_str(&e.value()) {
                            Ok(selected) => plan.set(selected),
                            Err(_) => warn!("Unknown plan selected: {}", e.value()),
                        },
                        {options}
                    }
                }
                Button { button_type: "submit", disabled: pending(), "Update plan" }
            }
        }
    }
}
