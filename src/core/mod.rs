pub mod chat_client;
pub mod config;
pub mod constants;
pub mod controller;
pub mod conversation;
pub mod message;
pub mod text_wrapping;
