//! Terminal UI layer for interactive chat sessions.
//!
//! Key submodules include:
//! - [`chat_loop`]: the interaction loop that turns terminal input into
//!   [`crate::core::controller`] intents and redraws on conversation changes.
//! - [`renderer`], [`transcript`] and [`welcome`]: view composition and frame output.
//! - [`theme`] and [`loading`]: styles and pending-reply animation.
//!
//! Ownership boundary: this layer presents and captures interaction state, while
//! [`crate::core`] owns the conversation and the request lifecycle.

pub mod chat_loop;
pub mod loading;
pub mod renderer;
pub mod theme;
pub mod transcript;
pub mod view;
pub mod welcome;
