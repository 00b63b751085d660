//! Sandbox cleanup performed once before any integration test runs.
//!
//! The sandbox is a disposable directory tree that integration tests build
//! throwaway showyourwork projects in. Each immediate subdirectory is one
//! test's leftover workspace; loose files at the top level (a `.gitkeep`,
//! a README) belong to the repository and survive the reset.
//!
//! # Example
//!
//! ```no_run
//! use syw_testkit::sandbox::Sandbox;
//!
//! let summary = Sandbox::default_location().reset()?;
//! println!("removed {} stale workspaces", summary.removed.len());
//! # Ok::<(), syw_testkit::error::TestkitError>(())
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{TestkitError, TestkitResult};

/// Location of the sandbox relative to the crate manifest directory.
pub const SANDBOX_RELATIVE_PATH: &str = "tests/integration/sandbox";

/// A sandbox directory whose subdirectories are wiped at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sandbox {
    root: PathBuf,
}

/// Outcome of a [`Sandbox::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetSummary {
    /// Directories that were recursively deleted.
    pub removed: Vec<PathBuf>,
    /// Number of non-directory entries left in place.
    pub preserved: usize,
}

impl Sandbox {
    /// Creates a sandbox rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The sandbox that sits next to this crate's integration tests.
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join(SANDBOX_RELATIVE_PATH))
    }

    /// Returns the sandbox root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Deletes every immediate subdirectory of the sandbox root.
    ///
    /// Files and symlinks at the top level are kept. A root that does not
    /// exist has nothing to enumerate, so the reset is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TestkitError::Sandbox`] for the first entry that cannot be
    /// read or removed. Nothing is retried.
    pub fn reset(&self) -> TestkitResult<ResetSummary> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "sandbox root missing, nothing to reset");
                return Ok(ResetSummary::default());
            }
            Err(e) => return Err(TestkitError::sandbox(&self.root, e)),
        };

        let mut summary = ResetSummary::default();
        for entry in entries {
            let entry = entry.map_err(|e| TestkitError::sandbox(&self.root, e))?;
            let path = entry.path();
            // file_type() does not follow symlinks, so a link to a directory
            // outside the sandbox is kept rather than followed.
            let file_type = entry
                .file_type()
                .map_err(|e| TestkitError::sandbox(&path, e))?;

            if file_type.is_dir() {
                fs::remove_dir_all(&path).map_err(|e| TestkitError::sandbox(&path, e))?;
                debug!(path = %path.display(), "removed sandbox directory");
                summary.removed.push(path);
            } else {
                if file_type.is_symlink() && path.is_dir() {
                    warn!(path = %path.display(), "keeping symlinked directory in sandbox");
                }
                summary.preserved += 1;
            }
        }

        summary.removed.sort();
        info!(
            root = %self.root.display(),
            removed = summary.removed.len(),
            preserved = summary.preserved,
            "sandbox reset"
        );
        Ok(summary)
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::default_location()
    }
}
