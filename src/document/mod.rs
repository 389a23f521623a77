//! Note document model.
//!
//! - `block`: a single block (id, type, content, path, children, focus flag)
//! - `tree`: the ordered forest of blocks and its structural mutations

pub mod block;
pub mod tree;
