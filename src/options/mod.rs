//! Command-line options accepted by an integration-test session.
//!
//! The options exist in two forms: the typed [`SessionOptions`] clap argument
//! group, which a harness flattens into its own command, and the static
//! [`DECLARATIONS`] table describing each flag for harnesses that build their
//! parser some other way.

use clap::error::ErrorKind;
use clap::{ArgMatches, Args, Command, FromArgMatches};

use crate::error::TestkitResult;

/// Default value of `--action-spec`.
pub const DEFAULT_ACTION_SPEC: &str = "showyourwork";

const REMOTE_HELP: &str = "enable remote tests";
const ACTION_SPEC_HELP: &str = "version spec of showyourwork to install on GH Actions";
const GITHUB_ORG_HELP: &str = "GitHub organization for test repos (defaults to 'showyourwork')";
const NO_ORG_HELP: &str = "Use personal GitHub account instead of an organization";

/// Option values for one session.
///
/// `github_org` is `None` when the flag was not passed; that sentinel is what
/// lets the configurator fall back to the environment.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    #[arg(long, help = REMOTE_HELP)]
    pub remote: bool,

    #[arg(long, default_value = DEFAULT_ACTION_SPEC, help = ACTION_SPEC_HELP)]
    pub action_spec: String,

    #[arg(long, value_name = "ORG", help = GITHUB_ORG_HELP)]
    pub github_org: Option<String>,

    #[arg(long, help = NO_ORG_HELP)]
    pub no_org: bool,
}

impl SessionOptions {
    /// Reads the option values back out of parsed matches.
    ///
    /// # Errors
    ///
    /// Returns an options error if `matches` came from a command the options
    /// were never registered on.
    pub fn from_matches(matches: &ArgMatches) -> TestkitResult<Self> {
        // clap panics on access to an undefined id in debug builds
        for decl in &DECLARATIONS {
            if matches.try_contains_id(decl.dest).is_err() {
                return Err(clap::Error::raw(
                    ErrorKind::MissingRequiredArgument,
                    format!("session option '{}' was never registered\n", decl.flag),
                )
                .into());
            }
        }
        Ok(Self::from_arg_matches(matches)?)
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            remote: false,
            action_spec: DEFAULT_ACTION_SPEC.to_string(),
            github_org: None,
            no_org: false,
        }
    }
}

/// How a flag takes its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Presence sets the value to `true`; takes no argument.
    Switch,
    /// Takes one string argument.
    Value,
}

/// Default value of a declared option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionDefault {
    Bool(bool),
    Str(&'static str),
    /// No value unless the flag is given.
    Unset,
}

/// Static description of one session option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDecl {
    /// Long flag, including the leading dashes.
    pub flag: &'static str,
    /// Key the parsed value is stored under.
    pub dest: &'static str,
    pub kind: OptionKind,
    pub default: OptionDefault,
    pub help: &'static str,
}

/// The four options a session recognizes.
pub const DECLARATIONS: [OptionDecl; 4] = [
    OptionDecl {
        flag: "--remote",
        dest: "remote",
        kind: OptionKind::Switch,
        default: OptionDefault::Bool(false),
        help: REMOTE_HELP,
    },
    OptionDecl {
        flag: "--action-spec",
        dest: "action_spec",
        kind: OptionKind::Value,
        default: OptionDefault::Str(DEFAULT_ACTION_SPEC),
        help: ACTION_SPEC_HELP,
    },
    OptionDecl {
        flag: "--github-org",
        dest: "github_org",
        kind: OptionKind::Value,
        default: OptionDefault::Unset,
        help: GITHUB_ORG_HELP,
    },
    OptionDecl {
        flag: "--no-org",
        dest: "no_org",
        kind: OptionKind::Switch,
        default: OptionDefault::Bool(false),
        help: NO_ORG_HELP,
    },
];

/// Looks up a declaration by its destination key.
#[must_use]
pub fn declaration(dest: &str) -> Option<&'static OptionDecl> {
    DECLARATIONS.iter().find(|decl| decl.dest == dest)
}

/// Adds the session options to a host command.
#[must_use]
pub fn register(cmd: Command) -> Command {
    SessionOptions::augment_args(cmd)
}
