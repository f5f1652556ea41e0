//! IoTrix is a terminal chat client for the IoTrix IoT & Network Assistant.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation store, the exchange controller that
//!   drives each request/reply cycle, the chat transport, and configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that turns key presses into controller intents.
//! - [`api`] defines backend wire types and the read-only health/history calls.
//! - [`utils`] holds logging setup, URL helpers and scroll bookkeeping.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
