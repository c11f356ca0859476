//! Event handling for Paladium.
//!
//! Terminal input is read by [`EventHandler`] and turned into
//! [`crate::state::Action`]s.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
