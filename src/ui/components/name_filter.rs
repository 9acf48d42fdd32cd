use dioxus::prelude::*;

use crate::ui::theme;

#[component]
pub fn NameFilter(value: String, on_change: EventHandler<String>) -> Element {
    rsx! {
        input {
            class: "{theme::INPUT}",
            r#type: "search",
            placeholder: "Filter by name or base type",
            value: "{value}",
            oninput: move |evt: FormEvent| on_change.call(evt.value()),
        }
    }
}
