//! Data exchanged with the chatbot API.

use serde::{Deserialize, Deserializer, Serialize};

/// Chat row. The API returns rows either as objects or as positional
/// `[chat_id, name, created_at, updated_at]` arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chat {
    pub chat_id: String,
    pub name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChatRepr {
    Object {
        chat_id: String,
        name: String,
        #[serde(default)]
        created_at: Option<String>,
        #[serde(default)]
        updated_at: Option<String>,
    },
    Row(String, String, Option<String>, Option<String>),
}

impl<'de> Deserialize<'de> for Chat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ChatRepr::deserialize(deserializer)? {
            ChatRepr::Object { chat_id, name, created_at, updated_at }
            | ChatRepr::Row(chat_id, name, created_at, updated_at) => Chat {
                chat_id,
                name,
                created_at,
                updated_at,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUpdate {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Human,
    Ai,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistoryEntry {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
}

/// One question and the answer it got.
pub type ChatExchange = (ChatHistoryEntry, ChatHistoryEntry);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeChatbotRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
    pub user_input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeChatbotResponse {
    pub chat_id: String,
    pub user_input: String,
    pub answer: String,
    #[serde(default)]
    pub relevant_part_texts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chats_parse_from_rows_and_objects() {
        let chats: Vec<Chat> = serde_json::from_value(json!([
            ["c1", "Test Chat", "2025-01-01 10:00:00", "2025-01-01 10:05:00"],
            {"chat_id": "c2", "name": "Renamed"},
        ]))
        .unwrap();
        assert_eq!(chats[0].chat_id, "c1");
        assert_eq!(chats[0].updated_at.as_deref(), Some("2025-01-01 10:05:00"));
        assert_eq!(chats[1].name, "Renamed");
        assert_eq!(chats[1].created_at, None);
    }

    #[test]
    fn history_pairs_parse() {
        let history: Vec<ChatExchange> = serde_json::from_value(json!([
            [
                {"content": "What is a high-risk system?", "type": "human", "chat_id": "c1"},
                {"content": "Annex III lists them.", "type": "ai", "id": "run-1", "chat_id": "c1"}
            ]
        ]))
        .unwrap();
        let (question, answer) = &history[0];
        assert_eq!(question.kind, MessageKind::Human);
        assert_eq!(answer.kind, MessageKind::Ai);
        assert_eq!(answer.id.as_deref(), Some("run-1"));
    }

    #[test]
    fn new_chat_requests_omit_the_id() {
        let body = serde_json::to_value(InvokeChatbotRequest { chat_id: None, user_input: "hi".into() }).unwrap();
        assert_eq!(body, json!({"user_input": "hi"}));
    }

    #[test]
    fn relevant_parts_default_to_empty() {
        let response: InvokeChatbotResponse =
            serde_json::from_value(json!({"chat_id": "c1", "user_input": "hi", "answer": "hello"})).unwrap();
        assert!(response.relevant_part_texts.is_empty());
    }
}
