//! The production host: keeps the latest forest and persists it on demand.

use crate::document::tree::BlockTree;
use crate::editor::host::Host;
use std::path::PathBuf;
use tracing::{debug, warn};

/// A [`Host`] backed by a note file.
///
/// `update_state` keeps a copy of the newest forest. `send_to_server` writes
/// that copy to disk when auto-save is on and a path is known; a failed write
/// is logged and otherwise ignored, so the editor never sees it.
#[derive(Debug)]
pub struct FileHost {
    path: Option<PathBuf>,
    auto_save: bool,
    create_backup: bool,
    latest: Option<BlockTree>,
    saves: usize,
}

impl FileHost {
    pub fn new(path: Option<PathBuf>, auto_save: bool, create_backup: bool) -> Self {
        Self {
            path,
            auto_save,
            create_backup,
            latest: None,
            saves: 0,
        }
    }

    /// The last forest received through `update_state`.
    pub fn latest(&self) -> Option<&BlockTree> {
        self.latest.as_ref()
    }

    /// Number of successful auto-saves so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl Host for FileHost {
    fn update_state(&mut self, forest: &BlockTree) {
        self.latest = Some(forest.clone());
    }

    fn send_to_server(&mut self) {
        if !self.auto_save {
            return;
        }
        let (Some(path), Some(tree)) = (&self.path, &self.latest) else {
            return;
        };

        // Backups are only taken on the first write of a session
        let backup = self.create_backup && self.saves == 0;
        match super::saver::save_notes_file(path, tree, backup) {
            Ok(()) => {
                self.saves += 1;
                debug!(path = %path.display(), "auto-saved notes");
            }
            Err(e) => warn!(path = %path.display(), error = %e, "auto-save failed"),
        }
    }
}
