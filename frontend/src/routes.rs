use dioxus::prelude::*;

use common::route_table::AppView;

use crate::components::chatbot_layout::ChatbotLayout;
use crate::pages::chatbot_page::{Chat, NewChat};
use crate::pages::not_found_page::NotFound;

/// Browser-history routes. `/` is the chat view without a conversation, any
/// single segment is a conversation id.
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(ChatbotLayout)]


    #[route("/")]
    NewChat {},


    #[route("/:chat_id")]
    Chat { chat_id: String },


    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },

}

impl Route {
    pub fn chat(chat_id: Option<String>) -> Self {
        match chat_id {
            Some(chat_id) => Self::Chat { chat_id },
            None => Self::NewChat {},
        }
    }

    pub fn from_app_view(view: AppView) -> Option<Self> {
        match view {
            AppView::Chat { chat_id } => Some(Self::chat(chat_id)),
            AppView::NotFound => None,
        }
    }
}
