use dioxus::prelude::*;

#[component]
pub fn Input(
    id: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
    value: String,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            class: "input",
            id: id,
            name: id,
            r#type: input_type,
            placeholder: placeholder,
            value: value,
            oninput: move |e| oninput.call(e),
        }
    }
}
