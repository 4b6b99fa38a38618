//! Layout shared by every chat view: conversation sidebar plus the routed page.

use common::route_table::{AppView, Resolution};
use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

use crate::components::chat_sidebar::ChatSidebar;
use crate::components::error_boundary::GlobalErrorBoundary;
use crate::composer::{use_routes, use_runtime_config};
use crate::routes::Route;

/// Bumped whenever the chat list on the server changes.
#[derive(Clone, Copy, PartialEq)]
pub struct ChatListRefresh(Signal<u32>);

impl ChatListRefresh {
    pub fn bump(mut self) {
        *self.0.write() += 1;
    }

    pub fn version(&self) -> u32 {
        *self.0.read()
    }
}

#[component]
pub fn ChatbotLayout() -> Element {
    use_context_provider(|| ChatListRefresh(Signal::new(0)));
    let routes = use_routes();
    let config = use_runtime_config();
    let route = use_route::<Route>();

    let path = route.to_string();
    let resolution = routes.resolve(&path);
    info!("Resolved {} to {:?}", path, resolution);
    let active_chat = match resolution.app_view() {
        AppView::Chat { chat_id } => chat_id,
        AppView::NotFound => None,
    };
    if let Resolution::Matched(_) = &resolution {
        if Route::from_app_view(resolution.app_view()).as_ref() != Some(&route) {
            warn!("Router and route table disagree on {}", path);
        }
    }

    rsx! {
        div {
            id: "x-chatbot-layout",
            class: "x-chatbot-layout",

            ChatSidebar { title: config.app_title().to_string(), active_chat }

            div {
                id: "x-page-container",
                class: "x-page-container",
                GlobalErrorBoundary {
                    boundary_name: "ChatbotLayout".to_string(),
                    Outlet::<Route> {}
                }
            }
        }
    }
}
