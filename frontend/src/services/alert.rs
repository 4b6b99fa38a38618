//! Alert popups invocable from any view. Only one is shown at a time.

use common::notifications::{AlertPopup, AlertSlot};
use dioxus::prelude::*;

use crate::services::toast::SeverityIcon;

#[derive(Clone, Copy, PartialEq)]
pub struct AlertService {
    slot: Signal<AlertSlot>,
}

impl AlertService {
    pub fn new() -> Self {
        Self { slot: Signal::new(AlertSlot::default()) }
    }

    pub fn fire(&self, popup: AlertPopup) {
        let mut slot = self.slot;
        if let Some(replaced) = slot.write().fire(popup) {
            dioxus::logger::tracing::debug!("Alert replaced: {}", replaced.title);
        }
    }

    pub fn close(&self) {
        let mut slot = self.slot;
        slot.write().close();
    }
}

pub fn use_alert() -> AlertService {
    use_context::<AlertService>()
}

#[component]
pub fn AlertPopupView() -> Element {
    let alert = use_alert();
    let Some(popup) = alert.slot.read().current().cloned() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "x-overlay",
            onclick: move |_| alert.close(),
            div {
                class: "x-dialog x-alert",
                role: "dialog",
                onclick: move |e| e.stop_propagation(),
                div {
                    class: "x-dialog-header",
                    SeverityIcon { severity: popup.severity }
                    span { "{popup.title}" }
                }
                pre { class: "x-dialog-message", "{popup.text}" }
                div {
                    class: "x-dialog-actions",
                    button {
                        class: "x-button",
                        onclick: move |_| alert.close(),
                        "{popup.confirm_label}"
                    }
                }
            }
        }
    }
}
