//! Property tests for GitHub organization resolution.

use proptest::prelude::*;
use syw_testkit::config::{resolve_github_org, MapEnv, DEFAULT_GITHUB_ORG, TEST_ORG_VAR};

fn env_with(org: Option<&str>) -> MapEnv {
    match org {
        Some(org) => MapEnv::new().with(TEST_ORG_VAR, org),
        None => MapEnv::new(),
    }
}

fn is_none_sentinel(value: &str) -> bool {
    value.is_empty() || value.to_lowercase() == "none"
}

proptest! {
    #[test]
    fn no_org_always_resolves_to_none(
        flag in proptest::option::of("[a-zA-Z0-9-]{0,12}"),
        from_env in proptest::option::of("[a-zA-Z0-9-]{0,12}"),
    ) {
        let env = env_with(from_env.as_deref());
        prop_assert_eq!(resolve_github_org(true, flag.as_deref(), &env), None);
    }

    #[test]
    fn explicit_org_wins_over_environment(
        flag in "[a-zA-Z0-9-]{1,12}",
        from_env in proptest::option::of("[a-zA-Z0-9-]{0,12}"),
    ) {
        prop_assume!(!is_none_sentinel(&flag));
        let env = env_with(from_env.as_deref());
        prop_assert_eq!(resolve_github_org(false, Some(flag.as_str()), &env), Some(flag.clone()));
    }

    #[test]
    fn environment_used_without_flag(from_env in "[a-zA-Z0-9-]{1,12}") {
        prop_assume!(!is_none_sentinel(&from_env));
        let env = env_with(Some(from_env.as_str()));
        prop_assert_eq!(resolve_github_org(false, None, &env), Some(from_env.clone()));
    }

    #[test]
    fn resolved_org_is_never_a_sentinel(
        no_org in any::<bool>(),
        flag in proptest::option::of("(none|NONE|None|[a-z]{0,6})"),
        from_env in proptest::option::of("(none|nOnE|[a-z]{0,6})"),
    ) {
        let env = env_with(from_env.as_deref());
        if let Some(org) = resolve_github_org(no_org, flag.as_deref(), &env) {
            prop_assert!(!is_none_sentinel(&org));
        }
    }
}

#[test]
fn default_when_nothing_is_given() {
    assert_eq!(
        resolve_github_org(false, None, &MapEnv::new()).as_deref(),
        Some(DEFAULT_GITHUB_ORG)
    );
}
