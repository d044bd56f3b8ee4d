//! Audit batching: trailing-edge debounce, best-effort flush, read-back.

mod common;

use common::{settle, start_session, start_session_with};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;

use boothsync::audit::{AuditAction, AuditEntry};
use boothsync::store::log_path;
use boothsync::{Config, StatusStore, ZoneStatus};

fn entry(target: &str) -> AuditEntry {
    AuditEntry::new(
        AuditAction::BoothToggle,
        target,
        ZoneStatus::Available,
        ZoneStatus::Busy,
        "ops@example.com",
    )
}

#[tokio::test(start_paused = true)]
async fn test_enqueue_debounce_collapses_into_one_flush() {
    let h = start_session();

    h.session.audit().enqueue(entry("zone_a"));
    sleep(Duration::from_millis(500)).await;
    h.session.audit().enqueue(entry("zone_b"));

    // t=1100ms: the second enqueue re-armed the window, nothing flushed yet
    sleep(Duration::from_millis(600)).await;
    assert_eq!(h.store.multi_write_attempts(), 0);
    assert!(h.store.read_tree("logs").await.unwrap().is_empty());

    // t=1600ms: one combined flush carrying both entries
    sleep(Duration::from_millis(500)).await;
    assert_eq!(h.store.multi_write_attempts(), 1);
    assert_eq!(h.store.read_tree("logs").await.unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_failed_batch_is_dropped_not_retried() {
    let h = start_session();

    h.store.fail_writes(true);
    h.session.audit().enqueue(entry("zone_a"));
    sleep(Duration::from_millis(1100)).await;
    assert_eq!(h.store.multi_write_attempts(), 1);
    assert!(h.store.read_tree("logs").await.unwrap().is_empty());

    // The batch was cleared on failure: the next flush carries only the
    // new entry
    h.store.fail_writes(false);
    h.session.audit().enqueue(entry("zone_b"));
    sleep(Duration::from_millis(1100)).await;

    let logs = h.session.audit().recent_logs(10).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].target_id, "zone_b");
}

#[tokio::test(start_paused = true)]
async fn test_logging_disabled_short_circuits_enqueue() {
    let config = Config {
        logging_enabled: false,
        ..Config::default()
    };
    let h = start_session_with(config);

    h.session.toggles().toggle("zone_a").await.unwrap();
    sleep(Duration::from_millis(1200)).await;

    assert_eq!(h.store.multi_write_attempts(), 0);
    assert!(h.store.read_tree("logs").await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_toggle_records_audit_entry() {
    let h = start_session();

    h.session.toggles().toggle("zone_a").await.unwrap();
    sleep(Duration::from_millis(1100)).await;

    let logs = h.session.audit().recent_logs(10).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, AuditAction::BoothToggle);
    assert_eq!(logs[0].target_id, "zone_a");
    assert_eq!(logs[0].old_value, ZoneStatus::Available);
    assert_eq!(logs[0].new_value, ZoneStatus::Busy);
    assert_eq!(logs[0].admin_email, "ops@example.com");
}

#[tokio::test(start_paused = true)]
async fn test_failed_toggle_records_nothing() {
    let h = start_session();

    h.store.fail_writes(true);
    let _ = h.session.toggles().toggle("zone_a").await;
    h.store.fail_writes(false);
    sleep(Duration::from_millis(1200)).await;

    assert!(h.store.read_tree("logs").await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_recent_logs_newest_first_with_limit() {
    let h = start_session();

    let mut updates = HashMap::new();
    for (key, ts) in [
        ("first", "2026-08-01T10:00:00.000Z"),
        ("second", "2026-08-01T11:00:00.000Z"),
        ("third", "2026-08-01T12:00:00.000Z"),
    ] {
        let mut e = entry(key);
        e.timestamp = ts.to_string();
        updates.insert(log_path(key), serde_json::to_value(&e).unwrap());
    }
    h.store.write_many(updates).await.unwrap();
    settle().await;

    let logs = h.session.audit().recent_logs(2).await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].target_id, "third");
    assert_eq!(logs[1].target_id, "second");
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_flushes_pending_batch() {
    let h = start_session();

    h.session.audit().enqueue(entry("zone_a"));
    // Shut down well before the 1s window closes
    sleep(Duration::from_millis(100)).await;
    h.session.shutdown();
    settle().await;

    assert_eq!(h.store.read_tree("logs").await.unwrap().len(), 1);
}
