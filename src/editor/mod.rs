//! Editor state and mode management.
//!
//! The editor owns the single authoritative [`BlockTree`](crate::document::tree::BlockTree)
//! and is the only code that writes to it. Everything else reads a snapshot
//! and forwards intents back up.
//!
//! # Modules
//!
//! - `mode`: Editor mode enumeration
//! - `intent`: Structural intents produced by the block view
//! - `host`: Callback pair the editor notifies after each mutation
//! - `undo`: Bounded undo/redo history of forest snapshots
//! - `state`: The editor shell itself
//!
//! # Example
//!
//! ```
//! use blocknote::editor::mode::EditorMode;
//!
//! // Editor starts in Insert mode, typing edits the focused block
//! let mode = EditorMode::default();
//! assert_eq!(mode, EditorMode::Insert);
//! ```

pub mod host;
pub mod intent;
pub mod mode;
pub mod state;
pub mod undo;
