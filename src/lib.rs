//! blocknote - a terminal editor for hierarchical block notes.
//!
//! A document is a forest of blocks. Each block is either a heading or a
//! paragraph of text and may nest child blocks under it. The editor owns
//! the forest, applies structural changes (typing, Enter to split, Tab and
//! Shift+Tab to change nesting, Backspace on an empty block to delete it),
//! and reports every change to a [`Host`](editor::host::Host).
//!
//! # Modules
//!
//! - [`document`]: blocks and the block forest with its mutations
//! - [`editor`]: the editor shell, modes, undo history and host callbacks
//! - [`file`]: note file loading, saving and the file-backed host
//! - [`input`]: key mapping and event dispatch
//! - [`ui`]: ratatui rendering of the forest and editor chrome
//! - [`theme`]: color themes
//! - [`config`]: user configuration

pub mod config;
pub mod document;
pub mod editor;
pub mod file;
pub mod input;
pub mod theme;
pub mod ui;
