mod common;
use common::*;

use rattendance::core::overtime::OvertimeScanner;
use rattendance::db::{breaks, settings, users};
use rattendance::models::break_kind::BreakKind;
use rattendance::notify::dispatch_breaches;

fn scanner() -> OvertimeScanner {
    OvertimeScanner::new(clock())
}

#[test]
fn test_breach_only_strictly_above_limit() {
    let pool = pool_with_staff();
    breaks::open_interval(&pool.conn, ALICE.user_id, CHAT, BreakKind::Toilet, &at("2026-10-05 10:00")).unwrap();

    // exactly at the 15 minute limit: not a breach
    let at_limit = scanner().scan(&pool.conn, CHAT, at("2026-10-05 10:15")).unwrap();
    assert!(at_limit.is_empty());

    let over = scanner().scan(&pool.conn, CHAT, at("2026-10-05 10:16")).unwrap();
    assert_eq!(over.len(), 1);
    assert_eq!(over[0].user_id, ALICE.user_id);
    assert_eq!(over[0].elapsed_minutes, 16);
    assert_eq!(over[0].kind, BreakKind::Toilet);
}

#[test]
fn test_partial_minute_over_limit_reports_floor() {
    let pool = pool_with_staff();
    breaks::open_interval(&pool.conn, ALICE.user_id, CHAT, BreakKind::Toilet, &at("2026-10-05 10:00")).unwrap();

    let found = scanner().scan(&pool.conn, CHAT, at("2026-10-05 10:15:30")).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].elapsed_minutes, 15);
}

#[test]
fn test_smoke_default_limit_is_ten() {
    let pool = pool_with_staff();
    breaks::open_interval(&pool.conn, BOB.user_id, CHAT, BreakKind::Smoke, &at("2026-10-05 10:00")).unwrap();

    assert!(scanner().scan(&pool.conn, CHAT, at("2026-10-05 10:10")).unwrap().is_empty());
    let found = scanner().scan(&pool.conn, CHAT, at("2026-10-05 10:11")).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].handle, "bob");
    assert_eq!(found[0].label, "smoking");
}

#[test]
fn test_workspace_limit_override() {
    let pool = pool_with_staff();
    settings::set_limit(&pool.conn, CHAT, BreakKind::Toilet, 5).unwrap();
    breaks::open_interval(&pool.conn, ALICE.user_id, CHAT, BreakKind::Toilet, &at("2026-10-05 10:00")).unwrap();

    let found = scanner().scan(&pool.conn, CHAT, at("2026-10-05 10:06")).unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn test_closed_breaks_are_ignored() {
    let pool = pool_with_staff();
    let id = breaks::open_interval(&pool.conn, ALICE.user_id, CHAT, BreakKind::Toilet, &at("2026-10-05 10:00")).unwrap();
    breaks::close_interval(&pool.conn, id, &at("2026-10-05 10:40")).unwrap();

    assert!(scanner().scan(&pool.conn, CHAT, at("2026-10-05 11:00")).unwrap().is_empty());
}

#[test]
fn test_scan_has_no_side_effects_and_repeats() {
    let pool = pool_with_staff();
    breaks::open_interval(&pool.conn, ALICE.user_id, CHAT, BreakKind::Toilet, &at("2026-10-05 10:00")).unwrap();
    let now = at("2026-10-05 10:30");

    let first = scanner().scan(&pool.conn, CHAT, now).unwrap();
    let second = scanner().scan(&pool.conn, CHAT, now).unwrap();
    assert_eq!(first, second);

    let open = breaks::open_for_user(&pool.conn, ALICE.user_id, CHAT).unwrap();
    assert_eq!(open.len(), 1);
    assert!(open[0].is_open());
}

#[test]
fn test_unregistered_break_owner_falls_back_to_id() {
    let pool = pool();
    breaks::open_interval(&pool.conn, 77, CHAT, BreakKind::Toilet, &at("2026-10-05 10:00")).unwrap();

    let found = scanner().scan(&pool.conn, CHAT, at("2026-10-05 11:00")).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].handle, "77");
}

#[test]
fn test_scan_all_covers_every_workspace() {
    let pool = pool_with_staff();
    let other = -200;
    users::upsert_user(&pool.conn, 20, other, "carol", "Carol Poe").unwrap();

    breaks::open_interval(&pool.conn, ALICE.user_id, CHAT, BreakKind::Toilet, &at("2026-10-05 10:00")).unwrap();
    breaks::open_interval(&pool.conn, 20, other, BreakKind::Smoke, &at("2026-10-05 10:00")).unwrap();

    let found = scanner().scan_all(&pool.conn, at("2026-10-05 10:20")).unwrap();
    let chats: Vec<i64> = found.iter().map(|b| b.chat_id).collect();
    assert_eq!(found.len(), 2);
    assert!(chats.contains(&CHAT));
    assert!(chats.contains(&other));
}

#[test]
fn test_alert_text_and_failed_delivery_does_not_stop_batch() {
    let pool = pool_with_staff();
    let other = -200;
    users::upsert_user(&pool.conn, 20, other, "carol", "Carol Poe").unwrap();
    breaks::open_interval(&pool.conn, 20, other, BreakKind::Smoke, &at("2026-10-05 10:00")).unwrap();
    breaks::open_interval(&pool.conn, ALICE.user_id, CHAT, BreakKind::Toilet, &at("2026-10-05 10:00")).unwrap();

    let found = scanner().scan_all(&pool.conn, at("2026-10-05 10:20")).unwrap();
    let notifier = MemoryNotifier::failing_for(&[other]);

    let delivered = dispatch_breaches(&notifier, &found);
    assert_eq!(delivered, 1);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, CHAT);
    assert!(sent[0].1.contains("@alice"));
    assert!(sent[0].1.contains("restroom"));
    assert!(sent[0].1.contains("20 minutes"));
}
