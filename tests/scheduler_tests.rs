mod common;
use common::*;

use chrono::Duration as ChronoDuration;
use rattendance::db::pool::DbPool;
use rattendance::db::{breaks, users};
use rattendance::models::break_kind::BreakKind;
use rattendance::scheduler::OvertimeWatch;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

const OTHER_CHAT: i64 = -200;

/// File-backed DB with one long restroom break in each of two workspaces.
fn seeded_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    let started = clock().now() - ChronoDuration::minutes(30);

    users::upsert_user(&pool.conn, ALICE.user_id, CHAT, "alice", "Alice Doe").unwrap();
    users::upsert_user(&pool.conn, 20, OTHER_CHAT, "carol", "Carol Poe").unwrap();
    breaks::open_interval(&pool.conn, ALICE.user_id, CHAT, BreakKind::Toilet, &started).unwrap();
    breaks::open_interval(&pool.conn, 20, OTHER_CHAT, BreakKind::Toilet, &started).unwrap();
    db_path
}

#[tokio::test]
async fn test_tick_delivers_one_alert_per_breach() {
    let db_path = seeded_db("sched_tick");
    let notifier = Arc::new(MemoryNotifier::default());
    let overtime = OvertimeWatch::new(
        db_path,
        clock(),
        notifier.clone(),
        Duration::from_secs(60),
        Duration::ZERO,
    );

    let delivered = overtime.tick().await.unwrap();
    assert_eq!(delivered, 2);

    let sent = notifier.sent();
    assert!(sent.iter().any(|(chat, text)| *chat == CHAT && text.contains("@alice")));
    assert!(sent.iter().any(|(chat, text)| *chat == OTHER_CHAT && text.contains("@carol")));

    // the scan leaves breaks open, so the next tick alerts again
    assert_eq!(overtime.tick().await.unwrap(), 2);
}

#[tokio::test]
async fn test_tick_survives_failed_delivery() {
    let db_path = seeded_db("sched_fail");
    let notifier = Arc::new(MemoryNotifier::failing_for(&[CHAT]));
    let overtime = OvertimeWatch::new(
        db_path,
        clock(),
        notifier.clone(),
        Duration::from_secs(60),
        Duration::ZERO,
    );

    assert_eq!(overtime.tick().await.unwrap(), 1);
    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, OTHER_CHAT);
}

#[tokio::test]
async fn test_run_ticks_then_stops_on_cancel() {
    let db_path = seeded_db("sched_run");
    let notifier = Arc::new(MemoryNotifier::default());
    let overtime = Arc::new(OvertimeWatch::new(
        db_path,
        clock(),
        notifier.clone(),
        Duration::from_secs(3600),
        Duration::ZERO,
    ));

    let (tx, rx) = watch::channel(false);
    let runner = {
        let overtime = overtime.clone();
        tokio::spawn(async move { overtime.run(rx).await })
    };

    // wait for the immediate first tick
    for _ in 0..100 {
        if notifier.sent().len() >= 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(notifier.sent().len(), 2);

    tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(5), runner)
        .await
        .expect("watch stopped")
        .unwrap();
}
