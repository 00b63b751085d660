//! Per-run state shared by every lifecycle hook.
//!
//! A [`Session`] is created by [`HookRegistry::start`] once the command line
//! is parsed and lives until the run ends. Test setup reaches the resolved
//! configuration through [`Session::config`].
//!
//! [`HookRegistry::start`]: crate::hooks::HookRegistry::start

use clap::ArgMatches;

use crate::config::{Environment, SessionConfig};
use crate::error::TestkitResult;
use crate::markers::MarkerRegistry;
use crate::options::SessionOptions;

pub struct Session {
    matches: ArgMatches,
    options: SessionOptions,
    markers: MarkerRegistry,
    config: Option<SessionConfig>,
    env: Box<dyn Environment>,
}

impl Session {
    /// Creates a session from parsed matches.
    ///
    /// # Errors
    ///
    /// Returns an options error if the session option values cannot be read
    /// from `matches`.
    pub fn new(matches: ArgMatches, env: Box<dyn Environment>) -> TestkitResult<Self> {
        let options = SessionOptions::from_matches(&matches)?;
        Ok(Self {
            matches,
            options,
            markers: MarkerRegistry::new(),
            config: None,
            env,
        })
    }

    /// Raw matches, for options other plugins registered.
    pub fn matches(&self) -> &ArgMatches {
        &self.matches
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut MarkerRegistry {
        &mut self.markers
    }

    /// The resolved configuration; `None` until a plugin has configured it.
    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    pub fn set_config(&mut self, config: SessionConfig) {
        self.config = Some(config);
    }

    /// Whether tests marked `remote` run in this session.
    pub fn remote_enabled(&self) -> bool {
        self.config
            .as_ref()
            .map_or(self.options.remote, |config| config.remote)
    }

    pub fn env(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    /// Splits the session into the pieces configuration needs at once.
    pub fn parts_mut(&mut self) -> (&SessionOptions, &mut MarkerRegistry, &mut dyn Environment) {
        (&self.options, &mut self.markers, self.env.as_mut())
    }
}
