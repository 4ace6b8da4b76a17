use application::Console;
use application::usecases::LoginOutcome;
use dioxus::prelude::*;
use dioxus_primitives::toast::{ToastOptions, use_toast};

use crate::components::{button::Button, input::Input};
use crate::platform::RouterNavigator;

const STORE_FAILED_MESSAGE: &str = "Could not store the admin token in this browser.";

#[component]
pub fn Login() -> Element {
    let console = use_context::<Console>();
    let mut token: Signal<String> = use_signal(String::new);
    let toaster = use_toast();
    let nav = navigator();

    rsx! {
        div { id: "login",
            div { class: "login-card",
                h1 { "Admin Login" }

                form {
                    class: "login-form",
                    onsubmit: move |e: FormEvent| {
                        e.prevent_default();
                        match console.login.submit(&token.read(), &RouterNavigator::new(nav)) {
                            Ok(LoginOutcome::Entered) => info!("Admin token accepted"),
                            Ok(LoginOutcome::Ignored) => {}
                            Err(err) => {
                                warn!("Could not store admin token: {}", err);
                                toaster
                                    .error(
                                        STORE_FAILED_MESSAGE.to_string(),
                                        ToastOptions::new().permanent(true),
                                    );
                            }
                        }
                    },
                    Input {
                        id: "admin-token",
                        input_type: "password",
                        placeholder: "Admin Token",
                        value: token(),
                        oninput: move |e: FormEvent| token.set(e.value()),
                    }
                    Button { button_type: "submit", "Enter" }
                }
            }
        }
    }
}
