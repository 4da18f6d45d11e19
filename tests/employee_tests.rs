mod common;
use common::*;

use rattendance::core::Caller;
use rattendance::core::attendance::AttendanceLedger;
use rattendance::core::breaks::BreakTracker;
use rattendance::core::employee::EmployeeLogic;
use rattendance::db::{leaves, users};
use rattendance::errors::AppError;
use rattendance::models::break_kind::BreakKind;
use rattendance::models::leave::LeaveStatus;
use rattendance::models::role::Role;

fn employee() -> EmployeeLogic {
    EmployeeLogic::new(roles(), clock())
}

#[test]
fn test_register_defaults_handle_to_user_id() {
    let pool = pool();
    let who = Caller::new(55, CHAT);

    employee().register(&pool.conn, who, "", "  Dana Loe ").unwrap();
    let u = users::find_user(&pool.conn, 55, CHAT).unwrap().unwrap();
    assert_eq!(u.username, "55");
    assert_eq!(u.full_name, "Dana Loe");
    assert!(u.active);
}

#[test]
fn test_register_requires_name() {
    let pool = pool();
    let err = employee().register(&pool.conn, Caller::new(55, CHAT), "dana", "   ").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_resign_terminates() {
    let pool = pool_with_staff();
    let now = at("2026-10-05 17:00");

    employee().resign(&pool.conn, ALICE, now).unwrap();
    let err = employee().status(&pool.conn, ALICE, now).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[test]
fn test_leave_is_approved_immediately() {
    let pool = pool_with_staff();
    let req = employee()
        .request_leave(&pool.conn, BOB, " Personal ", " moving house ", at("2026-10-07 09:00"))
        .unwrap();

    assert_eq!(req.kind, "personal");
    assert_eq!(req.status, LeaveStatus::Approved);

    let stored = leaves::leaves_for_user(&pool.conn, BOB.user_id, CHAT).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].reason, "moving house");
    assert_eq!(leaves::approved_in_month(&pool.conn, BOB.user_id, CHAT, "2026-10").unwrap(), 1);
}

#[test]
fn test_leave_needs_a_type() {
    let pool = pool_with_staff();
    let err = employee()
        .request_leave(&pool.conn, BOB, " ", "", at("2026-10-07 09:00"))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_status_shows_today_and_running_breaks() {
    let mut pool = pool_with_staff();
    let now = at("2026-10-05 10:30");

    let st = employee().status(&pool.conn, ALICE, now).unwrap();
    assert_eq!(st.role, Role::Employee);
    assert!(st.today.is_none());
    assert!(st.open_breaks.is_empty());

    AttendanceLedger::new(roles(), clock())
        .check_in(&pool.conn, ALICE, at("2026-10-05 08:04"))
        .unwrap();
    BreakTracker::new(roles(), clock())
        .toggle(&mut pool.conn, ALICE, BreakKind::Smoke, at("2026-10-05 10:20"))
        .unwrap();

    let st = employee().status(&pool.conn, ALICE, now).unwrap();
    assert_eq!(st.today.as_ref().map(|r| r.late_mins), Some(4));
    assert_eq!(st.open_breaks.len(), 1);
    assert_eq!(st.open_breaks[0].kind, BreakKind::Smoke);
}
