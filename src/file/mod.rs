//! File I/O for note documents.
//!
//! This module loads note files from disk, saves forests back with atomic
//! writes and optional backups, and provides [`host::FileHost`], the host
//! that persists the editor's forest as it changes.
//!
//! # File format
//!
//! A note file is JSON: `{ "version": 1, "blocks": [ ... ] }`, where each
//! block has `id`, `type`, `content`, `parentPath`, `children` and
//! `isFocused`. Paths ending in `.gz` are gzip-compressed.

pub mod host;
pub mod loader;
pub mod saver;

use crate::document::block::Block;
use serde::{Deserialize, Serialize};

/// Current note file format version.
pub const FORMAT_VERSION: u32 = 1;

/// On-disk envelope around the top-level block sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteFile {
    pub version: u32,
    pub blocks: Vec<Block>,
}

/// True if the path names a gzip-compressed file.
pub(crate) fn is_gzip_path(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false)
}
