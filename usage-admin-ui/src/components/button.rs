use dioxus::prelude::*;

#[component]
pub fn Button(
    #[props(default = "button")] button_type: &'static str,
    #[props(default)] disabled: bool,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: "button",
            r#type: button_type,
            disabled: disabled,
            onclick: move |e| {
                if let Some(handler) = &onclick {
                    handler.call(e);
                }
            },
            {children}
        }
    }
}
