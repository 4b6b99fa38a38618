use dioxus::prelude::*;

#[component]
pub fn LoadingIndicator(label: ReadSignal<String>) -> Element {
    rsx! {
        div {
            class: "x-loading",
            span { class: "x-spinner" }
            "{label}"
        }
    }
}
