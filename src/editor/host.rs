//! Callbacks the editor invokes after every successful mutation.
//!
//! The editor core knows nothing about persistence. After each change it
//! hands the complete forest to [`Host::update_state`] and then calls
//! [`Host::send_to_server`] as a hint that a checkpoint may be warranted.
//! Neither call returns anything the editor looks at, and no ordering or
//! retry guarantee is implied beyond "in mutation order".

use crate::document::tree::BlockTree;

/// The host side of the editor boundary.
pub trait Host {
    /// Receives the complete forest after a mutation.
    fn update_state(&mut self, forest: &BlockTree);

    /// Persistence hint. Fire-and-forget.
    fn send_to_server(&mut self);
}

/// A host that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl Host for NullHost {
    fn update_state(&mut self, _forest: &BlockTree) {}

    fn send_to_server(&mut self) {}
}
