//! Shown for paths no route entry accepts.

use common::route_table::{RouteParams, CHAT_ROUTE};
use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

use crate::composer::use_routes;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let routes = use_routes();
    let path = format!("/{}", segments.join("/"));
    warn!("No route for {}: {:?}", path, routes.resolve(&path));
    let new_chat_href = routes
        .path_for(CHAT_ROUTE, &RouteParams::new())
        .unwrap_or_else(|_| "/".to_string());

    rsx! {
        document::Title { "Chatbot - Not found" }
        div {
            class: "x-fill x-centered",
            h1 { class: "x-error-title", "404" }
            p { "Nothing lives at {path}" }
            a { href: "{new_chat_href}", class: "x-button", "Start a new chat" }
        }
    }
}
