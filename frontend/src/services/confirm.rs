//! Confirmation dialogs invocable from any view.

use std::rc::Rc;

use common::notifications::{ConfirmOutcome, ConfirmRequest, DialogQueue};
use dioxus::prelude::*;

use crate::services::toast::SeverityIcon;

#[derive(Clone)]
struct PendingConfirm {
    request: ConfirmRequest,
    on_settle: Rc<dyn Fn(ConfirmOutcome)>,
}

#[derive(Clone, Copy, PartialEq)]
pub struct ConfirmService {
    queue: Signal<DialogQueue<PendingConfirm>>,
}

impl ConfirmService {
    pub fn new() -> Self {
        Self { queue: Signal::new(DialogQueue::default()) }
    }

    /// Queues `request`; `on_settle` runs once the user answers it.
    pub fn require(&self, request: ConfirmRequest, on_settle: impl Fn(ConfirmOutcome) + 'static) {
        let mut queue = self.queue;
        queue.write().push(PendingConfirm { request, on_settle: Rc::new(on_settle) });
    }

    fn current(&self) -> Option<ConfirmRequest> {
        self.queue.read().front().map(|p| p.request.clone())
    }

    fn settle(&self, outcome: ConfirmOutcome) {
        let mut queue = self.queue;
        let settled = queue.write().settle();
        if let Some(pending) = settled {
            (pending.on_settle)(outcome);
        }
    }
}

pub fn use_confirm() -> ConfirmService {
    use_context::<ConfirmService>()
}

#[component]
pub fn ConfirmDialog() -> Element {
    let confirm = use_confirm();
    let Some(request) = confirm.current() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "x-overlay",
            div {
                class: "x-dialog",
                role: "alertdialog",
                div {
                    class: "x-dialog-header",
                    SeverityIcon { severity: request.severity }
                    span { "{request.header}" }
                }
                p { class: "x-dialog-message", "{request.message}" }
                div {
                    class: "x-dialog-actions",
                    button {
                        class: "x-button x-button-secondary",
                        onclick: move |_| confirm.settle(ConfirmOutcome::Rejected),
                        "{request.reject_label}"
                    }
                    button {
                        class: "x-button",
                        onclick: move |_| confirm.settle(ConfirmOutcome::Accepted),
                        "{request.accept_label}"
                    }
                }
            }
        }
    }
}
