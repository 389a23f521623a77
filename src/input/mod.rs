//! Input handling: termion events mapped to editor actions per mode.
//!
//! - `keys`: raw key to [`InputEvent`] mapping for Insert, Normal and Command mode
//! - `handler`: event polling, `:` commands, and dispatch into the editor

pub mod handler;
pub mod keys;

pub use handler::InputHandler;
pub use keys::InputEvent;
