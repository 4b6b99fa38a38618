pub mod http_client;
pub mod chat_api;
