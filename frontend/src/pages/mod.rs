pub mod chatbot_page;
pub mod not_found_page;
