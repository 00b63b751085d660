//! Lifecycle hooks a test harness calls while running a session.

use std::ffi::OsString;

use clap::{ArgMatches, Command};
use tracing::debug;

use crate::config::Environment;
use crate::error::TestkitResult;
use crate::markers::TestItem;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    AddOptions,
    SessionStart,
    Configure,
    CollectionModifyItems,
}

impl HookEvent {
    /// Every event, in the order a session dispatches them.
    pub const ALL: [HookEvent; 4] = [
        HookEvent::AddOptions,
        HookEvent::SessionStart,
        HookEvent::Configure,
        HookEvent::CollectionModifyItems,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HookEvent::AddOptions => "add_options",
            HookEvent::SessionStart => "session_start",
            HookEvent::Configure => "configure",
            HookEvent::CollectionModifyItems => "collection_modifyitems",
        }
    }
}

/// A set of lifecycle callbacks.
///
/// Every method defaults to a no-op so a plugin only implements the stages it
/// cares about.
pub trait SessionPlugin {
    /// Name used in logs and hook errors.
    fn name(&self) -> &str;

    /// Adds command-line options to the host command.
    fn add_options(&self, cmd: Command) -> Command {
        cmd
    }

    /// Runs once after the command line is parsed, before configuration.
    fn session_start(&self, _session: &mut Session) -> TestkitResult<()> {
        Ok(())
    }

    /// Runs once after every plugin's `session_start`.
    fn configure(&self, _session: &mut Session) -> TestkitResult<()> {
        Ok(())
    }

    /// Runs once per collected item set, before any item executes.
    fn collection_modifyitems(
        &self,
        _session: &Session,
        _items: &mut [TestItem],
    ) -> TestkitResult<()> {
        Ok(())
    }
}

/// Dispatches lifecycle events to registered plugins in registration order.
///
/// The first hook error stops dispatch and is returned unchanged.
pub struct HookRegistry {
    plugins: Vec<Box<dyn SessionPlugin>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    pub fn register(&mut self, plugin: impl SessionPlugin + 'static) {
        debug!(plugin = plugin.name(), "registered session plugin");
        self.plugins.push(Box::new(plugin));
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Builds the session command by letting every plugin add its options.
    pub fn command(&self, base: Command) -> Command {
        self.plugins.iter().fold(base, |cmd, plugin| {
            debug!(
                plugin = plugin.name(),
                event = HookEvent::AddOptions.as_str(),
                "dispatching hook"
            );
            plugin.add_options(cmd)
        })
    }

    /// Parses `args` against the session command, then runs `session_start`
    /// and `configure`.
    ///
    /// # Errors
    ///
    /// Returns an options error if parsing fails, otherwise the first error a
    /// hook reports.
    pub fn start<I, T>(
        &self,
        base: Command,
        args: I,
        env: impl Environment + 'static,
    ) -> TestkitResult<Session>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command(base).try_get_matches_from(args)?;
        self.start_with_matches(matches, env)
    }

    /// Like [`start`](HookRegistry::start) for a command line the host has
    /// already parsed.
    ///
    /// # Errors
    ///
    /// Returns an options error if `matches` lacks the session options,
    /// otherwise the first error a hook reports.
    pub fn start_with_matches(
        &self,
        matches: ArgMatches,
        env: impl Environment + 'static,
    ) -> TestkitResult<Session> {
        let mut session = Session::new(matches, Box::new(env))?;

        for plugin in &self.plugins {
            debug!(
                plugin = plugin.name(),
                event = HookEvent::SessionStart.as_str(),
                "dispatching hook"
            );
            plugin.session_start(&mut session)?;
        }
        for plugin in &self.plugins {
            debug!(
                plugin = plugin.name(),
                event = HookEvent::Configure.as_str(),
                "dispatching hook"
            );
            plugin.configure(&mut session)?;
        }

        Ok(session)
    }

    /// Lets every plugin modify the collected items.
    ///
    /// # Errors
    ///
    /// Returns the first error a hook reports.
    pub fn collect(&self, session: &Session, items: &mut [TestItem]) -> TestkitResult<()> {
        for plugin in &self.plugins {
            debug!(
                plugin = plugin.name(),
                event = HookEvent::CollectionModifyItems.as_str(),
                items = items.len(),
                "dispatching hook"
            );
            plugin.collection_modifyitems(session, items)?;
        }
        Ok(())
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
