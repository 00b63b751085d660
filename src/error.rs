//! Centralized error types for the test-session bootstrap.
//!
//! Every fallible operation in the crate returns [`TestkitResult`]. Errors are
//! never retried: a failure during session start or collection aborts the
//! session, and the caller sees the underlying cause through
//! [`std::error::Error::source`].
//!
//! # Example
//!
//! ```
//! use syw_testkit::error::{TestkitError, TestkitResult};
//! use syw_testkit::hooks::HookEvent;
//!
//! fn refuse() -> TestkitResult<()> {
//!     Err(TestkitError::hook("network-guard", HookEvent::Configure, "offline"))
//! }
//!
//! let err = refuse().unwrap_err();
//! assert_eq!(err.module(), "hooks");
//! ```

use std::path::PathBuf;

use crate::hooks::HookEvent;

/// Result type alias using `TestkitError`.
pub type TestkitResult<T> = Result<T, TestkitError>;

/// Errors raised while bootstrapping a test session.
#[derive(Debug, thiserror::Error)]
pub enum TestkitError {
    /// A sandbox entry could not be enumerated or deleted.
    #[error("sandbox: failed to clean '{}': {source}", .path.display())]
    Sandbox {
        /// The path whose removal failed.
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The command line could not be parsed against the registered options.
    #[error("options: {0}")]
    Options(#[from] clap::Error),

    /// A plugin hook refused to let the session continue.
    #[error("hooks: plugin '{plugin}' failed during {}: {message}", .event.as_str())]
    Hook {
        /// Name of the plugin that failed.
        plugin: String,
        /// Lifecycle stage being dispatched.
        event: HookEvent,
        /// Description of the failure.
        message: String,
    },

    /// A collected item list could not be loaded.
    #[error("items: failed to load '{}': {message}", .path.display())]
    Items {
        /// The item file.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },
}

impl TestkitError {
    /// Creates a sandbox error for `path`.
    #[must_use]
    pub fn sandbox(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Sandbox {
            path: path.into(),
            source,
        }
    }

    /// Creates a hook error.
    #[must_use]
    pub fn hook(plugin: impl Into<String>, event: HookEvent, message: impl Into<String>) -> Self {
        Self::Hook {
            plugin: plugin.into(),
            event,
            message: message.into(),
        }
    }

    /// Creates an item-loading error.
    #[must_use]
    pub fn items(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Items {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the module name where this error originated.
    #[must_use]
    pub fn module(&self) -> &'static str {
        match self {
            Self::Sandbox { .. } => "sandbox",
            Self::Options(_) => "options",
            Self::Hook { .. } => "hooks",
            Self::Items { .. } => "markers",
        }
    }

    /// Returns `true` if the error came from the filesystem.
    #[must_use]
    pub fn is_filesystem(&self) -> bool {
        matches!(self, Self::Sandbox { .. } | Self::Items { .. })
    }
}
