//! Interactive chat session: terminal setup, input handling and redraws.

mod event_loop;
mod keybindings;
mod lifecycle;

pub use event_loop::run_chat;
pub use keybindings::{map_key, map_mouse, ChatIntent};
