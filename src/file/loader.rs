//! Note file loading.
//!
//! Loading accepts the versioned envelope written by the saver as well as a
//! bare JSON array of blocks. Every loaded forest is normalized, so stale
//! `parentPath` values or several focused blocks in a hand-edited file are
//! repaired rather than rejected.

use super::{is_gzip_path, NoteFile, FORMAT_VERSION};
use crate::document::block::Block;
use crate::document::tree::BlockTree;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Deserialize)]
#[serde(untagged)]
enum NoteDocument {
    Enveloped(NoteFile),
    Bare(Vec<Block>),
}

/// Loads and parses a note file from the filesystem.
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be read or decompressed
/// - The contents are not a valid note document
/// - The file was written by a newer format version
///
/// # Examples
///
/// ```no_run
/// use blocknote::file::loader::load_notes_file;
///
/// let tree = load_notes_file("notes.json").unwrap();
/// println!("{} blocks", tree.len());
/// ```
pub fn load_notes_file<P: AsRef<Path>>(path: P) -> Result<BlockTree> {
    let path = path.as_ref();

    let content = if is_gzip_path(path) {
        read_gzipped_file(path)?
    } else {
        fs::read_to_string(path).context("Failed to read file")?
    };

    let tree = parse_notes(&content)
        .with_context(|| format!("Failed to parse note file {}", path.display()))?;
    info!(path = %path.display(), blocks = tree.len(), "loaded notes");
    Ok(tree)
}

/// Reads a note document piped in on stdin.
///
/// Keyboard input then has to come from `/dev/tty`, see
/// [`InputHandler::new_with_tty`](crate::input::InputHandler::new_with_tty).
pub fn load_notes_from_stdin() -> Result<BlockTree> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;

    let tree = parse_notes(&content).context("Failed to parse notes from stdin")?;
    info!(blocks = tree.len(), "loaded notes from stdin");
    Ok(tree)
}

/// Parses note JSON into a normalized forest.
///
/// ```
/// use blocknote::file::loader::parse_notes;
///
/// let tree = parse_notes(r#"[{"id": "a", "type": "heading1", "content": "Title"}]"#).unwrap();
/// assert_eq!(tree.len(), 1);
/// assert!(tree.blocks()[0].is_heading());
/// ```
pub fn parse_notes(content: &str) -> Result<BlockTree> {
    let document: NoteDocument =
        serde_json::from_str(content).context("Invalid note document")?;

    let blocks = match document {
        NoteDocument::Enveloped(file) => {
            if file.version > FORMAT_VERSION {
                bail!(
                    "Unsupported note format version {} (newest supported is {})",
                    file.version,
                    FORMAT_VERSION
                );
            }
            file.blocks
        }
        NoteDocument::Bare(blocks) => blocks,
    };

    Ok(BlockTree::from_blocks(blocks))
}

fn read_gzipped_file(path: &Path) -> Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path).context("Failed to open file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzip file")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope() {
        let tree = parse_notes(r#"{"version": 1, "blocks": [{"id": "a"}]}"#).unwrap();
        assert_eq!(tree.blocks()[0].content, "");
    }

    #[test]
    fn test_parse_rejects_newer_version() {
        let err = parse_notes(r#"{"version": 99, "blocks": []}"#).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_notes("not json").is_err());
        assert!(parse_notes(r#"{"blocks": "nope"}"#).is_err());
    }
}
