//! Cache directory layout for externally generated diagram markup.
//!
//! Layout:
//!
//! ```text
//! {document-dir}/.mdprop-cache/
//! +-- {document-stem}/
//!     +-- {session-id}/
//!         +-- 1.svg          # architecture/flowchart/timeline/diagram
//!         +-- 2.html         # ui
//! ```
//!
//! The session level keeps concurrent runs on the same document from
//! treading on each other; the document level keeps documents in the same
//! directory apart. Substitution deletes the session directory when it is
//! done and removes the document directory too once it is empty.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::kind::DiagramKind;
use crate::session::SessionId;

/// Name of the hidden cache root next to the document.
pub const CACHE_ROOT_DIR: &str = ".mdprop-cache";

/// Cache paths for one document.
#[derive(Clone, Debug)]
pub struct DiagramCache {
    /// `{document-dir}/.mdprop-cache/{document-stem}`
    document_dir: PathBuf,
}

impl DiagramCache {
    /// Cache for the document at `path` (the Markdown or HTML file; only
    /// its directory and stem matter).
    #[must_use]
    pub fn for_document(path: &Path) -> Self {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        Self {
            document_dir: parent.join(CACHE_ROOT_DIR).join(stem),
        }
    }

    /// Directory holding one session's cache entries.
    #[must_use]
    pub fn session_dir(&self, session: &SessionId) -> PathBuf {
        self.document_dir.join(session.as_str())
    }

    /// Path of the cache entry for one placeholder.
    #[must_use]
    pub fn entry_path(&self, session: &SessionId, id: usize, kind: DiagramKind) -> PathBuf {
        self.session_dir(session)
            .join(format!("{id}.{}", kind.cache_extension()))
    }

    /// Create the session directory (and parents).
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when creation fails.
    pub fn create_session(&self, session: &SessionId) -> io::Result<PathBuf> {
        let dir = self.session_dir(session);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Delete one session's cache directory; when that leaves the document
    /// directory empty, delete it as well.
    ///
    /// A session directory that is already gone is not an error.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when removal fails for any other
    /// reason.
    pub fn remove_session(&self, session: &SessionId) -> io::Result<()> {
        let dir = self.session_dir(session);
        match fs::remove_dir_all(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("session cache already removed: {}", dir.display());
            }
            Err(e) => return Err(e),
        }

        // Drop the per-document directory once the last session is gone
        if let Ok(mut entries) = fs::read_dir(&self.document_dir)
            && entries.next().is_none()
        {
            fs::remove_dir(&self.document_dir)?;
        }
        Ok(())
    }
}
