//! syw-testkit - bootstrap a showyourwork integration-test session from a shell

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Command, FromArgMatches};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use syw_testkit::markers::load_items;
use syw_testkit::{HookRegistry, IntegrationPlugin, ProcessEnv, SessionConfig, TestItem};

#[derive(Args, Debug)]
struct RunnerArgs {
    /// Sandbox directory to reset (defaults to the one beside the integration tests)
    #[arg(long, value_name = "DIR", env = "SYW_TESTKIT_SANDBOX")]
    sandbox: Option<PathBuf>,

    /// JSON array of collected test items to filter
    #[arg(long, value_name = "FILE")]
    items: Option<PathBuf>,

    /// Print a JSON report instead of shell exports
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a SessionConfig,
    markers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    items: Vec<ItemReport<'a>>,
}

#[derive(Serialize)]
struct ItemReport<'a> {
    name: &'a str,
    skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

fn main() -> Result<()> {
    let mut registry = HookRegistry::new();
    registry.register(IntegrationPlugin::default());

    let cmd = Command::new("syw-testkit")
        .about("Bootstrap a showyourwork integration-test session")
        .version(env!("CARGO_PKG_VERSION"));
    let matches = registry.command(RunnerArgs::augment_args(cmd)).get_matches();
    let args = RunnerArgs::from_arg_matches(&matches)?;

    let filter = if args.debug { "debug" } else { "info" };
    // stdout carries the exports, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Some(dir) = &args.sandbox {
        // IntegrationPlugin picks this up from the matches
        tracing::debug!(sandbox = %dir.display(), "using sandbox override");
    }

    let session = registry
        .start_with_matches(matches, ProcessEnv)
        .context("failed to start test session")?;

    let mut items: Vec<TestItem> = match args.items.as_deref() {
        Some(path) => load_items(path)?,
        None => Vec::new(),
    };
    registry.collect(&session, &mut items)?;

    let config = session
        .config()
        .context("session finished start-up without a configuration")?;

    if args.json {
        let report = Report {
            config,
            markers: session.markers().lines(),
            items: items
                .iter()
                .map(|item| ItemReport {
                    name: &item.name,
                    skipped: item.is_skipped(),
                    reason: item.skip_reason(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (key, value) in config.exports() {
            println!("export {key}={}", shell_quote(value));
        }
        for item in items.iter().filter(|item| item.is_skipped()) {
            println!("# skip {} ({})", item.name, item.skip_reason().unwrap_or(""));
        }
    }

    Ok(())
}

/// Single-quotes `value` for POSIX shells.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
