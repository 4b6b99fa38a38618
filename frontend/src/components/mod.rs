pub mod error_boundary;
pub mod loading;
pub mod chatbot_layout;
pub mod chat_sidebar;
