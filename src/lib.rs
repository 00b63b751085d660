//! syw-testkit - session bootstrap for showyourwork integration tests
//!
//! Resets the shared sandbox, registers the session's command-line options,
//! resolves them into a [`SessionConfig`] (also exported as environment
//! variables), and skips tests that need remote access unless asked not to.
//!
//! A harness drives everything through a [`HookRegistry`]:
//!
//! ```no_run
//! use clap::Command;
//! use syw_testkit::{HookRegistry, IntegrationPlugin, ProcessEnv, TestItem};
//!
//! let mut registry = HookRegistry::new();
//! registry.register(IntegrationPlugin::default());
//!
//! let session = registry.start(Command::new("integration"), std::env::args_os(), ProcessEnv)?;
//! let mut items = vec![TestItem::new("test_remote_build").with_marker("remote")];
//! registry.collect(&session, &mut items)?;
//! # Ok::<(), syw_testkit::TestkitError>(())
//! ```

pub mod config;
pub mod error;
pub mod hooks;
pub mod markers;
pub mod options;
pub mod plugin;
pub mod sandbox;
pub mod session;

// Re-export core types for convenient access
pub use config::{Environment, MapEnv, ProcessEnv, SessionConfig};
pub use error::{TestkitError, TestkitResult};
pub use hooks::{HookEvent, HookRegistry, SessionPlugin};
pub use markers::{Marker, TestItem};
pub use options::SessionOptions;
pub use plugin::IntegrationPlugin;
pub use sandbox::Sandbox;
pub use session::Session;
