//! Error boundaries for rendering failures.

use dioxus::logger::tracing::error;
use dioxus::prelude::*;

#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                error!("Render failure in boundary {}: {:?}", boundary_name, err);
                rsx! {
                    div {
                        class: "x-error-page",
                        h1 { class: "x-error-title", "Something went wrong" }
                        p { class: "x-error-boundary", "Boundary: {boundary_name}" }
                        pre { class: "x-error-details", "{err:#?}" }
                        a { href: "/", class: "x-button", "Start a new chat" }
                    }
                }
            },
            children
        }
    }
}

#[component]
pub fn ComponentErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |err: ErrorContext| {
                let error_txt = match err.error() {
                    Some(e) => format!("{:#?}", e.0),
                    None => "Unknown error".to_string(),
                };
                rsx! {
                    ComponentErrorDisplay {
                        error_txt,
                        button {
                            class: "x-button",
                            onclick: move |_| err.clear_errors(),
                            "Try again"
                        }
                    }
                }
            },
            div {
                class: "x-fill",
                {children}
            }
        }
    }
}

#[component]
pub fn ComponentErrorDisplay(error_txt: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        div {
            class: "x-fill x-centered",
            h2 { class: "x-error-title", "Error" }
            pre { class: "x-error-details", "{error_txt}" }
            {children}
        }
    }
}
