//! Common library shared by the chatbot front-end: routing, configuration,
//! theme, notification models and API data types.

extern crate serde;


pub mod route_table;
pub mod runtime_config;
pub mod theme;
pub mod notifications;
pub mod composition;
pub mod chat;
