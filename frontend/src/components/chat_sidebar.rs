//! Sidebar listing the conversations known to the API.

use common::chat::Chat;
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_communication_icons::MdChat;
use dioxus_free_icons::icons::md_content_icons::MdAdd;
use dioxus_free_icons::Icon;
use dioxus_primitives::hover_card::{HoverCard, HoverCardContent, HoverCardTrigger};
use dioxus_primitives::{ContentAlign, ContentSide};

use crate::api::chat_api::list_chats;
use crate::components::chatbot_layout::ChatListRefresh;
use crate::components::error_boundary::ComponentErrorDisplay;
use crate::components::loading::LoadingIndicator;
use crate::composer::use_http;
use crate::routes::Route;

#[component]
pub fn ChatSidebar(title: ReadSignal<String>, active_chat: ReadSignal<Option<String>>) -> Element {
    let http = use_http();
    let refresh = use_context::<ChatListRefresh>();

    let chats = use_resource(move || {
        let http = http.clone();
        let _version = refresh.version();
        async move { list_chats(&http).await }
    });

    let chat_list = match &*chats.read() {
        Some(Ok(chats)) if chats.is_empty() => rsx! {
            div { class: "x-sidebar-empty", "No conversations yet" }
        },
        Some(Ok(chats)) => rsx! {
            for chat in chats.iter().rev() {
                ChatListItem {
                    key: "{chat.chat_id}",
                    chat: chat.clone(),
                    active: active_chat.read().as_deref() == Some(chat.chat_id.as_str()),
                }
            }
        },
        Some(Err(e)) => rsx! {
            ComponentErrorDisplay { error_txt: format!("Could not load conversations: {:#}", e) }
        },
        None => rsx! {
            LoadingIndicator { label: "Loading conversations".to_string() }
        },
    };

    rsx! {
        nav {
            id: "x-chat-sidebar",
            class: "x-chat-sidebar",
            div { class: "x-sidebar-title", "{title}" }
            Link {
                to: Route::NewChat {},
                div {
                    class: "x-button x-new-chat",
                    Icon { icon: MdAdd, style: "width: 18px; height: 18px;" }
                    "New chat"
                }
            }
            div {
                class: "x-chat-list",
                {chat_list}
            }
        }
    }
}

#[component]
fn ChatListItem(chat: Chat, active: bool) -> Element {
    let class = if active { "x-chat-item x-chat-item-active" } else { "x-chat-item" };
    let created = chat.created_at.clone().unwrap_or_else(|| "unknown".to_string());
    let updated = chat.updated_at.clone().unwrap_or_else(|| created.clone());

    rsx! {
        HoverCard {
            HoverCardTrigger {
                Link {
                    to: Route::Chat { chat_id: chat.chat_id.clone() },
                    div {
                        class: "{class}",
                        Icon { icon: MdChat, style: "width: 16px; height: 16px; flex-shrink: 0;" }
                        span { class: "x-chat-item-name", "{chat.name}" }
                    }
                }
            },
            HoverCardContent {
                side: ContentSide::Right,
                align: ContentAlign::Start,
                div {
                    class: "x-hover-card",
                    div { "Created: {created}" }
                    div { "Last activity: {updated}" }
                    div { class: "x-muted", "{chat.chat_id}" }
                }
            }
        }
    }
}
