//! Toast notifications invocable from any view.

use std::time::Duration;

use common::notifications::{Severity, Toast, ToastQueue, ToastRequest};
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::{MdCheckCircle, MdHighlightOff, MdInfo, MdReportProblem};
use dioxus_free_icons::icons::md_navigation_icons::MdClose;
use dioxus_free_icons::Icon;

#[derive(Clone, Copy, PartialEq)]
pub struct ToastService {
    queue: Signal<ToastQueue>,
}

impl ToastService {
    pub fn new(default_life: Duration) -> Self {
        Self { queue: Signal::new(ToastQueue::new(default_life)) }
    }

    pub fn add(&self, request: ToastRequest) {
        let mut queue = self.queue;
        let toast = queue.write().push(request);
        if let Some(life) = toast.life {
            // the toast outlives the view that raised it
            spawn_forever(async move {
                sleep(life).await;
                queue.write().dismiss(toast.id);
            });
        }
    }

    pub fn success(&self, summary: impl Into<String>) {
        self.add(ToastRequest::new(Severity::Success, summary));
    }

    pub fn error(&self, summary: impl Into<String>, detail: impl Into<String>) {
        self.add(ToastRequest::new(Severity::Error, summary).detail(detail));
    }

    pub fn dismiss(&self, id: u64) {
        let mut queue = self.queue;
        queue.write().dismiss(id);
    }

    pub fn clear(&self) {
        let mut queue = self.queue;
        queue.write().clear();
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(life: Duration) {
    let millis = u32::try_from(life.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

// desktop and mobile renderers drive the UI on a tokio runtime
#[cfg(not(target_arch = "wasm32"))]
async fn sleep(life: Duration) {
    tokio::time::sleep(life).await;
}

pub fn use_toast() -> ToastService {
    use_context::<ToastService>()
}

#[component]
pub fn ToastContainer() -> Element {
    let toast = use_toast();
    if toast.queue.read().is_empty() {
        return rsx! {};
    }
    let toasts: Vec<Toast> = toast.queue.read().iter().cloned().collect();

    rsx! {
        div {
            id: "x-toast-container",
            class: "x-toast-container",
            if toasts.len() > 1 {
                button {
                    class: "x-link-button",
                    onclick: move |_| toast.clear(),
                    "Dismiss all"
                }
            }
            for item in toasts {
                ToastItem { key: "{item.id}", toast: item }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Toast) -> Element {
    let service = use_toast();
    let id = toast.id;
    let severity = toast.severity.as_str();

    rsx! {
        div {
            class: "x-toast x-toast-{severity}",
            role: "alert",
            SeverityIcon { severity: toast.severity }
            div {
                class: "x-toast-text",
                div { class: "x-toast-summary", "{toast.summary}" }
                if let Some(detail) = toast.detail.as_ref() {
                    div { class: "x-toast-detail", "{detail}" }
                }
            }
            button {
                class: "x-icon-button",
                "aria-label": "Close",
                onclick: move |_| service.dismiss(id),
                Icon { icon: MdClose, style: "width: 16px; height: 16px;" }
            }
        }
    }
}

#[component]
pub fn SeverityIcon(severity: Severity) -> Element {
    match severity {
        Severity::Success => rsx! { Icon { icon: MdCheckCircle, style: "width: 22px; height: 22px; flex-shrink: 0;" } },
        Severity::Warn => rsx! { Icon { icon: MdReportProblem, style: "width: 22px; height: 22px; flex-shrink: 0;" } },
        Severity::Error => rsx! { Icon { icon: MdHighlightOff, style: "width: 22px; height: 22px; flex-shrink: 0;" } },
        Severity::Info | Severity::Secondary | Severity::Contrast => rsx! { Icon { icon: MdInfo, style: "width: 22px; height: 22px; flex-shrink: 0;" } },
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn expiry_sleep_runs_on_native_targets() {
        let started = tokio::time::Instant::now();
        sleep(Duration::from_millis(3000)).await;
        assert!(started.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn toasts_are_not_dismissed_before_their_life_ends() {
        let early = tokio::time::timeout(Duration::from_millis(2999), sleep(Duration::from_millis(3000))).await;
        assert!(early.is_err());
    }
}
