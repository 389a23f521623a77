//! Note file saving.
//!
//! Saves go through `<name>.tmp`, which is renamed over the target, so the
//! note file on disk is never left half written. Backups copy the previous
//! file to `<name>.bak` before the rename.

use super::{is_gzip_path, NoteFile, FORMAT_VERSION};
use crate::document::tree::BlockTree;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Serializes a forest to the pretty-printed note file format.
pub fn serialize_notes(tree: &BlockTree) -> Result<String> {
    let file = NoteFile {
        version: FORMAT_VERSION,
        blocks: tree.blocks().to_vec(),
    };
    let mut json = serde_json::to_string_pretty(&file).context("Failed to serialize notes")?;
    json.push('\n');
    Ok(json)
}

/// Saves a forest to `path`, optionally backing up the existing file first.
///
/// # Errors
///
/// Returns an error if:
/// - Creating the backup failed
/// - Serialization failed
/// - Writing or renaming the temporary file failed
pub fn save_notes_file<P: AsRef<Path>>(
    path: P,
    tree: &BlockTree,
    create_backup: bool,
) -> Result<()> {
    let path = path.as_ref();

    if create_backup && path.exists() {
        backup_file(path)?;
    }

    let json = serialize_notes(tree)?;
    write_file_atomic(path, json.as_bytes(), is_gzip_path(path))
}

/// `path` with `suffix` appended to its full file name (`notes.json.bak`).
fn sibling_path(path: &Path, suffix: &str) -> Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    Ok(path.with_file_name(format!("{}.{}", name, suffix)))
}

/// Copies a file to the same name with a `.bak` suffix.
fn backup_file(path: &Path) -> Result<()> {
    let backup_path = sibling_path(path, "bak")?;
    fs::copy(path, backup_path).context("Failed to create backup")?;
    Ok(())
}

/// Writes data to `<name>.tmp` next to the target and renames it into place.
///
/// The temp file is removed again if any step fails.
fn write_file_atomic(path: &Path, data: &[u8], compress: bool) -> Result<()> {
    let temp_path = sibling_path(path, "tmp")?;

    let result = write_temp_file(&temp_path, data, compress)
        .and_then(|()| fs::rename(&temp_path, path).context("Failed to rename temp file"));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp_file(temp_path: &Path, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    if compress {
        let file = fs::File::create(temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(temp_path, data).context("Failed to write temp file")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::block::{Block, BlockId, BlockType};

    #[test]
    fn test_serialize_has_version_and_camel_case() {
        let tree = BlockTree::from_blocks(vec![Block::new(
            BlockId::from("a"),
            BlockType::Text,
            "hi",
        )
        .with_children(vec![Block::new(BlockId::from("b"), BlockType::Text, "")])]);

        let json = serialize_notes(&tree).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["blocks"][0]["children"][0]["parentPath"][0], "a");
        assert!(json.ends_with('\n'));
    }
}
