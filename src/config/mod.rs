//! Session configuration derived from the parsed options.
//!
//! [`configure`] turns [`SessionOptions`] into a [`SessionConfig`], the object
//! test setup receives by reference. For test code that only looks at the
//! process environment, [`SessionConfig::export`] writes the same values to
//! `ACTION_SPEC` and `SHOWYOURWORK_TEST_ORG`.
//!
//! Environment access goes through the [`Environment`] trait so resolution can
//! be exercised against a [`MapEnv`] without touching process state.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::markers::{MarkerRegistry, REMOTE_MARKER, REMOTE_MARKER_DESCRIPTION};
use crate::options::{SessionOptions, DEFAULT_ACTION_SPEC};

/// Receives the `--action-spec` value.
pub const ACTION_SPEC_VAR: &str = "ACTION_SPEC";

/// Read as an organization fallback, then overwritten with the resolved one.
pub const TEST_ORG_VAR: &str = "SHOWYOURWORK_TEST_ORG";

/// Organization used when nothing else names one.
pub const DEFAULT_GITHUB_ORG: &str = "showyourwork";

/// Read/write access to environment variables.
pub trait Environment {
    /// Returns the value of `key`, or `None` if unset.
    fn var(&self, key: &str) -> Option<String>;

    /// Sets `key` to `value`.
    fn set_var(&mut self, key: &str, value: &str);
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    /// Non-UTF-8 values are decoded lossily rather than treated as unset.
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }

    fn set_var(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

/// An in-memory environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `set_var`.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set_var(key, value);
        self
    }
}

impl Environment for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set_var(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}

/// Resolved configuration for one test session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    /// Version spec of showyourwork the GitHub Actions workflow installs.
    pub action_spec: String,

    /// Organization test repositories are created under.
    ///
    /// `None` means the personal account of the authenticated user.
    pub github_org: Option<String>,

    /// Whether tests marked `remote` run.
    pub remote: bool,
}

impl SessionConfig {
    /// Resolves the configuration from option values and the environment.
    pub fn resolve(options: &SessionOptions, env: &dyn Environment) -> Self {
        Self {
            action_spec: options.action_spec.clone(),
            github_org: resolve_github_org(options.no_org, options.github_org.as_deref(), env),
            remote: options.remote,
        }
    }

    /// Writes `ACTION_SPEC` and `SHOWYOURWORK_TEST_ORG`.
    ///
    /// The organization variable is always written; no organization is the
    /// empty string.
    pub fn export(&self, env: &mut dyn Environment) {
        env.set_var(ACTION_SPEC_VAR, &self.action_spec);
        env.set_var(TEST_ORG_VAR, self.github_org.as_deref().unwrap_or(""));
        debug!(
            action_spec = %self.action_spec,
            github_org = self.github_org.as_deref().unwrap_or(""),
            "exported session environment"
        );
    }

    /// Reads back a configuration previously written by [`export`].
    ///
    /// `remote` is not exported and always reads as `false`.
    ///
    /// [`export`]: SessionConfig::export
    pub fn from_env(env: &dyn Environment) -> Self {
        Self {
            action_spec: env
                .var(ACTION_SPEC_VAR)
                .unwrap_or_else(|| DEFAULT_ACTION_SPEC.to_string()),
            github_org: env.var(TEST_ORG_VAR).filter(|org| !org.is_empty()),
            remote: false,
        }
    }

    /// The organization as exported: the name, or `""` for none.
    #[must_use]
    pub fn github_org_or_empty(&self) -> &str {
        self.github_org.as_deref().unwrap_or("")
    }

    /// Environment variables this configuration exports, in write order.
    #[must_use]
    pub fn exports(&self) -> [(&'static str, &str); 2] {
        [
            (ACTION_SPEC_VAR, self.action_spec.as_str()),
            (TEST_ORG_VAR, self.github_org_or_empty()),
        ]
    }
}

/// Picks the GitHub organization for test repositories.
///
/// First match wins:
/// 1. `no_org` set: no organization.
/// 2. `github_org` given: used verbatim.
/// 3. `SHOWYOURWORK_TEST_ORG` set: its value.
/// 4. `"showyourwork"`.
///
/// A result that is empty or equals `"none"` in any case means no
/// organization.
pub fn resolve_github_org(
    no_org: bool,
    github_org: Option<&str>,
    env: &dyn Environment,
) -> Option<String> {
    if no_org {
        return None;
    }

    let org = match github_org {
        Some(org) => org.to_string(),
        None => env
            .var(TEST_ORG_VAR)
            .unwrap_or_else(|| DEFAULT_GITHUB_ORG.to_string()),
    };

    if org.is_empty() || org.to_lowercase() == "none" {
        None
    } else {
        Some(org)
    }
}

/// Configuration-time hook body: declares the `remote` marker, resolves the
/// configuration, and exports it to `env`.
pub fn configure(
    options: &SessionOptions,
    markers: &mut MarkerRegistry,
    env: &mut dyn Environment,
) -> SessionConfig {
    markers.declare(REMOTE_MARKER, REMOTE_MARKER_DESCRIPTION);

    let config = SessionConfig::resolve(options, env);
    config.export(env);

    info!(
        action_spec = %config.action_spec,
        github_org = config.github_org_or_empty(),
        remote = config.remote,
        "session configured"
    );
    config
}
