//! Chat view: conversation history, message input and chat actions.

use common::chat::{ChatExchange, InvokeChatbotRequest};
use common::notifications::{AlertPopup, ConfirmOutcome, ConfirmRequest, Severity};
use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::MdDelete;
use dioxus_free_icons::icons::md_content_icons::MdSend;
use dioxus_free_icons::Icon;

use crate::api::chat_api::{delete_chat_history, get_chat, get_chat_history, invoke_chatbot, rename_chat};
use crate::components::chatbot_layout::ChatListRefresh;
use crate::components::error_boundary::{ComponentErrorBoundary, ComponentErrorDisplay};
use crate::components::loading::LoadingIndicator;
use crate::composer::use_http;
use crate::routes::Route;
use crate::services::alert::use_alert;
use crate::services::confirm::use_confirm;
use crate::services::toast::use_toast;

/// Chat view without a conversation; the first message creates one.
#[component]
pub fn NewChat() -> Element {
    rsx! {
        document::Title { "Chatbot - New chat" }
        ChatbotPage { chat_id: None::<String> }
    }
}

/// Chat view for an existing conversation.
#[component]
pub fn Chat(chat_id: String) -> Element {
    rsx! {
        ChatbotPage { chat_id: Some(chat_id) }
    }
}

#[component]
fn ChatbotPage(chat_id: ReadSignal<Option<String>>) -> Element {
    let http = use_http();
    let toast = use_toast();
    let refresh = use_context::<ChatListRefresh>();
    let nav = navigator();

    let mut input = use_signal(String::new);
    let mut sending = use_signal(|| false);
    let mut pending_question = use_signal(|| Option::<String>::None);

    let http_history = http.clone();
    let mut history = use_resource(move || {
        let http = http_history.clone();
        let chat_id = chat_id.read().clone();
        let _version = refresh.version();
        async move {
            match chat_id {
                Some(chat_id) => get_chat_history(&http, &chat_id).await,
                None => Ok(Vec::new()),
            }
        }
    });
    // a different conversation must not show the previous one while loading;
    // the resource refetches by itself since it reads `chat_id`
    let mut shown_chat = use_signal(|| chat_id.peek().clone());
    use_effect(move || {
        let current = chat_id.read().clone();
        if chat_changed(&mut shown_chat.write(), current) {
            history.clear();
        }
    });

    let http_send = http.clone();
    let send = use_callback(move |_: ()| {
        let text = input.read().trim().to_string();
        if text.is_empty() || sending() {
            return;
        }
        let http = http_send.clone();
        let current_chat = chat_id.read().clone();
        sending.set(true);
        pending_question.set(Some(text.clone()));
        spawn(async move {
            let request = InvokeChatbotRequest { chat_id: current_chat.clone(), user_input: text };
            match invoke_chatbot(&http, &request).await {
                Ok(response) => {
                    input.set(String::new());
                    if !response.relevant_part_texts.is_empty() {
                        info!("Answer used {} source passages", response.relevant_part_texts.len());
                    }
                    if current_chat.as_deref() == Some(response.chat_id.as_str()) {
                        history.restart();
                    } else {
                        refresh.bump();
                        nav.push(Route::chat(Some(response.chat_id)));
                    }
                }
                Err(e) => {
                    error!("invoke_chatbot: request failed: {:#?}", e);
                    toast.error("Message not sent", format!("{:#}", e));
                }
            }
            pending_question.set(None);
            sending.set(false);
        });
    });

    let exchanges = match &*history.read() {
        Some(Ok(exchanges)) => rsx! {
            for (index, exchange) in exchanges.iter().enumerate() {
                ExchangeView { key: "{index}", exchange: exchange.clone() }
            }
        },
        Some(Err(e)) => rsx! {
            ComponentErrorDisplay { error_txt: format!("Could not load the conversation: {:#}", e) }
        },
        None => rsx! {
            LoadingIndicator { label: "Loading conversation".to_string() }
        },
    };

    rsx! {
        div {
            id: "x-chat-page",
            class: "x-chat-page",

            if let Some(current) = chat_id() {
                ChatHeader { key: "{current}", chat_id: current }
            } else {
                div { class: "x-chat-header", h2 { "New chat" } }
            }

            div {
                id: "x-chat-history",
                class: "x-chat-history",
                ComponentErrorBoundary {
                    {exchanges}
                    if let Some(question) = pending_question() {
                        div { class: "x-message x-message-human", "{question}" }
                        LoadingIndicator { label: "Thinking".to_string() }
                    }
                }
            }

            form {
                class: "x-chat-input",
                onsubmit: move |e| {
                    e.prevent_default();
                    send.call(());
                },
                textarea {
                    placeholder: "Ask a question",
                    rows: "2",
                    disabled: sending(),
                    value: "{input}",
                    oninput: move |e| input.set(e.value()),
                    onkeydown: move |e| {
                        if e.key() == Key::Enter && !e.modifiers().shift() {
                            e.prevent_default();
                            send.call(());
                        }
                    },
                }
                button {
                    r#type: "submit",
                    class: "x-button",
                    disabled: sending(),
                    Icon { icon: MdSend, style: "width: 18px; height: 18px;" }
                }
            }
        }
    }
}

/// Records `current` as the shown chat. True when it differs from the one
/// shown before.
fn chat_changed(shown: &mut Option<String>, current: Option<String>) -> bool {
    if *shown == current {
        return false;
    }
    *shown = current;
    true
}

#[component]
fn ExchangeView(exchange: ChatExchange) -> Element {
    let alert = use_alert();
    let (question, answer) = exchange;
    let answer_text = answer.content.clone();

    rsx! {
        div { class: "x-message x-message-human", "{question.content}" }
        div {
            class: "x-message x-message-ai",
            "{answer.content}"
            button {
                class: "x-link-button",
                title: "Show the full answer",
                onclick: move |_| {
                    alert.fire(AlertPopup::new(Severity::Info, "Answer", answer_text.clone()));
                },
                "Expand"
            }
        }
    }
}

/// Name of the conversation with rename and delete-history actions.
#[component]
fn ChatHeader(chat_id: String) -> Element {
    let http = use_http();
    let toast = use_toast();
    let confirm = use_confirm();
    let refresh = use_context::<ChatListRefresh>();

    let chat_id_for_fetch = chat_id.clone();
    let http_fetch = http.clone();
    let chat = use_resource(move || {
        let http = http_fetch.clone();
        let chat_id = chat_id_for_fetch.clone();
        async move { get_chat(&http, &chat_id).await }
    });
    let mut draft_name = use_signal(|| Option::<String>::None);

    let name = match &*chat.read() {
        Some(Ok(chat)) => chat.name.clone(),
        Some(Err(e)) => {
            error!("get_chat: request failed: {:#?}", e);
            "Unknown conversation".to_string()
        }
        None => "…".to_string(),
    };

    let http_rename = http.clone();
    let chat_id_rename = chat_id.clone();
    let save_name = move |_: MouseEvent| {
        let Some(new_name) = draft_name().map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) else {
            draft_name.set(None);
            return;
        };
        let http = http_rename.clone();
        let chat_id = chat_id_rename.clone();
        let mut chat = chat;
        spawn(async move {
            match rename_chat(&http, &chat_id, new_name).await {
                Ok(_) => {
                    toast.success("Conversation renamed");
                    refresh.bump();
                    chat.restart();
                }
                Err(e) => toast.error("Rename failed", format!("{:#}", e)),
            }
            draft_name.set(None);
        });
    };

    let http_delete = http.clone();
    let chat_id_delete = chat_id.clone();
    let delete_history = move |_: MouseEvent| {
        let http = http_delete.clone();
        let chat_id = chat_id_delete.clone();
        confirm.require(
            ConfirmRequest::new("Delete history", "Delete every message of this conversation?")
                .labels("Delete", "Cancel")
                .severity(Severity::Warn),
            move |outcome| {
                if outcome != ConfirmOutcome::Accepted {
                    return;
                }
                let http = http.clone();
                let chat_id = chat_id.clone();
                spawn(async move {
                    match delete_chat_history(&http, &chat_id).await {
                        Ok(()) => {
                            info!("Deleted history of {}", chat_id);
                            toast.success("History deleted");
                            refresh.bump();
                        }
                        Err(e) => toast.error("Could not delete history", format!("{:#}", e)),
                    }
                });
            },
        );
    };

    rsx! {
        document::Title { "Chatbot - {name}" }
        div {
            class: "x-chat-header",
            if let Some(draft) = draft_name() {
                input {
                    class: "x-rename-input",
                    value: "{draft}",
                    oninput: move |e| draft_name.set(Some(e.value())),
                }
                button { class: "x-button", onclick: save_name, "Save" }
            } else {
                h2 {
                    title: "Click to rename",
                    onclick: {
                        let name = name.clone();
                        move |_| draft_name.set(Some(name.clone()))
                    },
                    "{name}"
                }
            }
            button {
                class: "x-icon-button",
                title: "Delete history",
                onclick: delete_history,
                Icon { icon: MdDelete, style: "width: 20px; height: 20px;" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_only_cleared_when_the_chat_changes() {
        let mut shown = Some("c1".to_string());
        // first run after mount sees the chat it was created with
        assert!(!chat_changed(&mut shown, Some("c1".to_string())));
        assert!(chat_changed(&mut shown, Some("c2".to_string())));
        assert_eq!(shown.as_deref(), Some("c2"));
        assert!(!chat_changed(&mut shown, Some("c2".to_string())));
        assert!(chat_changed(&mut shown, None));
        assert!(!chat_changed(&mut shown, None));
    }
}
