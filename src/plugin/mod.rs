//! The plugin that bootstraps showyourwork integration tests.
//!
//! It resets the sandbox at session start, registers the session options,
//! resolves and exports the configuration, and skips `remote` tests unless
//! `--remote` was given.
//!
//! If the host command defines a `sandbox` argument (a [`PathBuf`]) and it
//! was given, that directory is reset instead of the plugin's own.

use std::path::PathBuf;

use clap::Command;
use tracing::{info, warn};

use crate::config;
use crate::error::TestkitResult;
use crate::hooks::SessionPlugin;
use crate::markers::{self, TestItem};
use crate::options;
use crate::sandbox::Sandbox;
use crate::session::Session;

/// Id of the optional host argument that overrides the sandbox location.
pub const SANDBOX_ARG: &str = "sandbox";

pub struct IntegrationPlugin {
    sandbox: Sandbox,
}

impl IntegrationPlugin {
    pub fn new(sandbox: Sandbox) -> Self {
        Self { sandbox }
    }
}

impl Default for IntegrationPlugin {
    fn default() -> Self {
        Self::new(Sandbox::default_location())
    }
}

impl SessionPlugin for IntegrationPlugin {
    fn name(&self) -> &str {
        "showyourwork-integration"
    }

    fn add_options(&self, cmd: Command) -> Command {
        options::register(cmd)
    }

    fn session_start(&self, session: &mut Session) -> TestkitResult<()> {
        match session.matches().try_get_one::<PathBuf>(SANDBOX_ARG) {
            Ok(Some(root)) => Sandbox::new(root).reset()?,
            _ => self.sandbox.reset()?,
        };
        Ok(())
    }

    fn configure(&self, session: &mut Session) -> TestkitResult<()> {
        let (opts, markers, env) = session.parts_mut();
        let resolved = config::configure(opts, markers, env);
        session.set_config(resolved);
        Ok(())
    }

    fn collection_modifyitems(
        &self,
        session: &Session,
        items: &mut [TestItem],
    ) -> TestkitResult<()> {
        for name in session.markers().undeclared(items) {
            warn!(marker = %name, "unknown marker, register it to avoid typos");
        }

        let skipped = markers::skip_remote(session.remote_enabled(), items);
        if skipped > 0 {
            info!(skipped, reason = markers::REMOTE_SKIP_REASON, "skipping remote tests");
        }
        Ok(())
    }
}
