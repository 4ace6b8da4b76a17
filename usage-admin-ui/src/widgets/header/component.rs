use application::Console;
use dioxus::prelude::*;
use dioxus_primitives::toast::{ToastOptions, use_toast};

use crate::components::button::Button;
use crate::platform::RouterNavigator;

const CLEAR_FAILED_MESSAGE: &str = "Could not clear the admin token from this browser.";

#[component]
pub fn Header() -> Element {
    let console = use_context::<Console>();
    let toaster = use_toast();
    let nav = navigator();

    rsx! {
        header { class: "app-header",
            h1 { class: "header-title", "Admin Dashboard" }
            div { class: "header-actions",
                Button {
                    onclick: move |_| {
                        if let Err(e) = console.sign_out.exec(&RouterNavigator::new(nav)) {
                            warn!("Sign out failed: {}", e);
                            toaster
                                .error(
                                    CLEAR_FAILED_MESSAGE.to_string(),
                                    ToastOptions::new().permanent(true),
                                );
                        }
                    },
                    "Sign out"
                }
            }
        }
    }
}
