use std::collections::BTreeMap;

use spot_arb_scanner::scanner::{OpportunitySet, Snapshot, SnapshotStore};

fn snapshot(ts: u64) -> Snapshot {
    Snapshot {
        timestamp: ts,
        data: BTreeMap::new(),
    }
}

fn opportunities(ts: u64) -> OpportunitySet {
    OpportunitySet {
        timestamp: ts,
        items: Vec::new(),
    }
}

#[test]
fn empty_store_returns_the_sentinel() {
    let store = SnapshotStore::new();
    assert!(store.latest_snapshot().is_none());
    assert!(store.latest_opportunities().is_none());
}

#[test]
fn publish_replaces_whole_values() {
    let store = SnapshotStore::new();

    store.publish(snapshot(100), opportunities(100));
    let first = store.latest_snapshot().expect("first publish");
    assert_eq!(first.timestamp, 100);

    store.publish(snapshot(200), opportunities(200));
    let second = store.latest_snapshot().expect("second publish");
    assert_eq!(second.timestamp, 200);

    // readers hold the old value untouched
    assert_eq!(first.timestamp, 100);
}

#[test]
fn timestamps_are_clamped_monotone() {
    let store = SnapshotStore::new();

    store.publish(snapshot(500), opportunities(500));
    // a clock step backwards must not publish an older timestamp
    store.publish(snapshot(400), opportunities(400));

    assert_eq!(store.latest_snapshot().expect("snapshot").timestamp, 500);
    assert_eq!(
        store.latest_opportunities().expect("opportunities").timestamp,
        500
    );
}

#[test]
fn publish_returns_the_published_arcs() {
    let store = SnapshotStore::new();
    let (snap, opps) = store.publish(snapshot(42), opportunities(42));

    assert_eq!(snap.timestamp, 42);
    assert_eq!(opps.timestamp, 42);
    assert!(std::sync::Arc::ptr_eq(
        &snap,
        &store.latest_snapshot().expect("snapshot")
    ));
    assert!(std::sync::Arc::ptr_eq(
        &opps,
        &store.latest_opportunities().expect("opportunities")
    ));
}
