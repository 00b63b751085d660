//! Integration tests for the session lifecycle.
//!
//! Every test runs against an in-memory environment, so none of them touch
//! the process environment.

use pretty_assertions::assert_eq;
use syw_testkit::config::{ACTION_SPEC_VAR, TEST_ORG_VAR};
use syw_testkit::markers::{REMOTE_MARKER, REMOTE_SKIP_REASON};
use syw_testkit::{MapEnv, Session, TestkitError};

use crate::common::{argv, collected_items, harness_command, TestContext};

fn start(ctx: &TestContext, args: &[&str], env: MapEnv) -> Session {
    ctx.registry()
        .start(harness_command(), argv(args), env)
        .expect("session should start")
}

fn exported_org(session: &Session) -> Option<String> {
    session.env().var(TEST_ORG_VAR)
}

// =============================================================================
// Organization resolution
// =============================================================================

#[test]
fn test_no_org_always_exports_empty_string() {
    let ctx = TestContext::new();
    let cases: [&[&str]; 3] = [
        &["--no-org"],
        &["--no-org", "--github-org", "acme"],
        &["--github-org", "acme", "--no-org"],
    ];

    for args in cases {
        let env = MapEnv::new().with(TEST_ORG_VAR, "from-env");
        let session = start(&ctx, args, env);
        assert_eq!(exported_org(&session).as_deref(), Some(""), "{args:?}");
        assert_eq!(session.config().unwrap().github_org, None);
    }
}

#[test]
fn test_github_org_flag_used_verbatim() {
    let ctx = TestContext::new();
    let env = MapEnv::new().with(TEST_ORG_VAR, "from-env");

    let session = start(&ctx, &["--github-org", "Acme-Labs"], env);

    assert_eq!(exported_org(&session).as_deref(), Some("Acme-Labs"));
}

#[test]
fn test_environment_org_used_when_flag_absent() {
    let ctx = TestContext::new();
    let session = start(&ctx, &[], MapEnv::new().with(TEST_ORG_VAR, "acme"));
    assert_eq!(exported_org(&session).as_deref(), Some("acme"));
}

#[test]
fn test_default_org_when_nothing_given() {
    let ctx = TestContext::new();
    let session = start(&ctx, &[], MapEnv::new());
    assert_eq!(exported_org(&session).as_deref(), Some("showyourwork"));
}

#[test]
fn test_none_sentinel_from_flag() {
    let ctx = TestContext::new();
    for value in ["none", "NONE", "None", ""] {
        let session = start(&ctx, &["--github-org", value], MapEnv::new());
        assert_eq!(exported_org(&session).as_deref(), Some(""), "{value:?}");
    }
}

#[test]
fn test_none_sentinel_from_environment() {
    let ctx = TestContext::new();
    let session = start(&ctx, &[], MapEnv::new().with(TEST_ORG_VAR, "nOnE"));
    assert_eq!(exported_org(&session).as_deref(), Some(""));
}

// =============================================================================
// Action spec
// =============================================================================

#[test]
fn test_action_spec_defaults() {
    let ctx = TestContext::new();
    let session = start(&ctx, &[], MapEnv::new());
    assert_eq!(
        session.env().var(ACTION_SPEC_VAR).as_deref(),
        Some("showyourwork")
    );
}

#[test]
fn test_action_spec_verbatim() {
    let ctx = TestContext::new();
    let session = start(&ctx, &["--action-spec", "showyourwork==0.4.3"], MapEnv::new());

    assert_eq!(
        session.env().var(ACTION_SPEC_VAR).as_deref(),
        Some("showyourwork==0.4.3")
    );
    assert_eq!(session.config().unwrap().action_spec, "showyourwork==0.4.3");
}

// =============================================================================
// Remote filtering
// =============================================================================

#[test]
fn test_remote_tests_skipped_by_default() {
    let ctx = TestContext::new();
    let registry = ctx.registry();
    let session = registry
        .start(harness_command(), argv(&[]), MapEnv::new())
        .unwrap();
    let mut items = collected_items();

    registry.collect(&session, &mut items).unwrap();

    assert_eq!(items[0].skip_reason(), Some(REMOTE_SKIP_REASON));
    assert!(!items[1].is_skipped());
    assert!(items[1].markers.is_empty());
}

#[test]
fn test_remote_flag_runs_everything() {
    let ctx = TestContext::new();
    let registry = ctx.registry();
    let session = registry
        .start(harness_command(), argv(&["--remote"]), MapEnv::new())
        .unwrap();
    let mut items = collected_items();
    let before = items.clone();

    registry.collect(&session, &mut items).unwrap();

    assert_eq!(items, before);
    assert!(items[0].has_marker(REMOTE_MARKER));
}

#[test]
fn test_remote_marker_is_declared() {
    let ctx = TestContext::new();
    let session = start(&ctx, &[], MapEnv::new());
    assert_eq!(
        session.markers().description(REMOTE_MARKER),
        Some("a test that requires remote access")
    );
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_unknown_flag_fails_to_parse() {
    let ctx = TestContext::new();
    let result = ctx
        .registry()
        .start(harness_command(), argv(&["--org", "acme"]), MapEnv::new());
    assert!(matches!(result, Err(TestkitError::Options(_))));
}

#[test]
fn test_switch_with_value_fails_to_parse() {
    let ctx = TestContext::new();
    let result = ctx
        .registry()
        .start(harness_command(), argv(&["--no-org=true"]), MapEnv::new());
    assert!(result.is_err());
}
