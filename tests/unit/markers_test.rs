//! Tests for marker filtering over larger collections.

use proptest::prelude::*;
use syw_testkit::markers::{
    skip_remote, Marker, MarkerRegistry, TestItem, REMOTE_MARKER, REMOTE_SKIP_REASON,
};

fn item(index: usize, remote: bool) -> TestItem {
    let item = TestItem::new(format!("test_{index}"));
    if remote {
        item.with_marker(REMOTE_MARKER)
    } else {
        item
    }
}

proptest! {
    #[test]
    fn only_remote_items_are_skipped(flags in proptest::collection::vec(any::<bool>(), 0..32)) {
        let mut items: Vec<TestItem> = flags.iter().enumerate().map(|(i, &r)| item(i, r)).collect();

        let skipped = skip_remote(false, &mut items);

        prop_assert_eq!(skipped, flags.iter().filter(|&&r| r).count());
        for (item, &remote) in items.iter().zip(&flags) {
            if remote {
                prop_assert_eq!(item.skip_reason(), Some(REMOTE_SKIP_REASON));
            } else {
                prop_assert!(item.markers.is_empty());
            }
        }
    }

    #[test]
    fn filtering_is_order_independent(flags in proptest::collection::vec(any::<bool>(), 0..16)) {
        let mut forward: Vec<TestItem> =
            flags.iter().enumerate().map(|(i, &r)| item(i, r)).collect();
        let mut reversed: Vec<TestItem> = forward.iter().rev().cloned().collect();

        skip_remote(false, &mut forward);
        skip_remote(false, &mut reversed);
        reversed.reverse();

        prop_assert_eq!(forward, reversed);
    }
}

#[test]
fn test_existing_skip_marker_is_kept() {
    let mut items = vec![TestItem::new("t")
        .with_marker(Marker::skip("flaky"))
        .with_marker(REMOTE_MARKER)];

    skip_remote(false, &mut items);

    assert_eq!(items[0].skip_reason(), Some("flaky"));
    assert_eq!(items[0].markers.len(), 3);
}

#[test]
fn test_undeclared_ignores_skip() {
    let registry = MarkerRegistry::new();
    let items = vec![TestItem::new("t").with_marker(Marker::skip("later"))];
    assert!(registry.undeclared(&items).is_empty());
}
