//! Client API calls for chat endpoints.

use common::chat::{Chat, ChatExchange, ChatUpdate, InvokeChatbotRequest, InvokeChatbotResponse};

use crate::api::http_client::HttpClient;

pub async fn list_chats(http: &HttpClient) -> anyhow::Result<Vec<Chat>> {
    http.get(&["chats"]).await
}

pub async fn get_chat(http: &HttpClient, chat_id: &str) -> anyhow::Result<Chat> {
    http.get(&["chats", chat_id]).await
}

pub async fn rename_chat(http: &HttpClient, chat_id: &str, name: String) -> anyhow::Result<Chat> {
    http.put(&["chats", chat_id], &ChatUpdate { name }).await
}

pub async fn get_chat_history(http: &HttpClient, chat_id: &str) -> anyhow::Result<Vec<ChatExchange>> {
    http.get(&["chat-history", chat_id]).await
}

pub async fn delete_chat_history(http: &HttpClient, chat_id: &str) -> anyhow::Result<()> {
    http.delete(&["chat-history", chat_id]).await
}

pub async fn invoke_chatbot(http: &HttpClient, request: &InvokeChatbotRequest) -> anyhow::Result<InvokeChatbotResponse> {
    http.post(&["chatbot", "invoke"], request).await
}
