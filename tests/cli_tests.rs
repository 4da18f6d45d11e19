mod common;
use common::{rti, setup_test_db, temp_out};
use predicates::str::contains;
use serde_json::Value;
use std::fs;

const OWNER: &str = "1";
const CHAT_ARG: &str = "--chat=-100";

fn init(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));
}

/// Run a command as `user` in the test workspace at wall-clock `now`.
fn as_user(db_path: &str, user: &str, now: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    rti()
        .args([
            "--db", db_path, "--owner", OWNER, CHAT_ARG, "--user", user, "--now", now,
        ])
        .args(args)
        .assert()
}

#[test]
fn test_check_in_reports_lateness() {
    let db_path = setup_test_db("cli_check_in");
    init(&db_path);

    as_user(&db_path, "10", "2026-10-05 07:00", &["register", "--handle", "alice", "Alice", "Doe"])
        .success()
        .stdout(contains("Registered: Alice Doe"));

    as_user(&db_path, "10", "2026-10-05 08:07:30", &["in"])
        .success()
        .stdout(contains("Checked in at 08:07"))
        .stdout(contains("7 min"));

    // second check-in is reported, not fatal
    as_user(&db_path, "10", "2026-10-05 09:00", &["in"])
        .success()
        .stdout(contains("Already checked in on 2026-10-05"));

    as_user(&db_path, "10", "2026-10-05 17:02", &["out"])
        .success()
        .stdout(contains("Checked out at 17:02"));

    as_user(&db_path, "10", "2026-10-05 17:03", &["status"])
        .success()
        .stdout(contains("in 08:07  out 17:02  late 7 min"));
}

#[test]
fn test_unregistered_user_is_rejected() {
    let db_path = setup_test_db("cli_unregistered");
    init(&db_path);

    as_user(&db_path, "99", "2026-10-05 08:00", &["in"])
        .failure()
        .stderr(contains("Not registered"));
}

#[test]
fn test_missing_caller_is_a_usage_error() {
    let db_path = setup_test_db("cli_no_caller");
    init(&db_path);

    rti()
        .args(["--db", &db_path, "in"])
        .assert()
        .failure()
        .stderr(contains("--user"));
}

#[test]
fn test_break_requires_check_in_then_toggles() {
    let db_path = setup_test_db("cli_breaks");
    init(&db_path);

    as_user(&db_path, "10", "2026-10-05 07:00", &["register", "--handle", "alice", "Alice"]).success();

    as_user(&db_path, "10", "2026-10-05 10:00", &["toilet"])
        .failure()
        .stderr(contains("Not checked in"));

    as_user(&db_path, "10", "2026-10-05 08:00", &["in"]).success();

    as_user(&db_path, "10", "2026-10-05 10:00", &["toilet"])
        .success()
        .stdout(contains("restroom break started at 10:00"));

    // 20 minutes later the scan flags the running break
    as_user(&db_path, OWNER, "2026-10-05 10:20", &["scan"])
        .success()
        .stdout(contains("@alice restroom break has lasted 20 minutes"))
        .stdout(contains("1 overtime alert(s) sent"));

    as_user(&db_path, "10", "2026-10-05 10:21", &["toilet"])
        .success()
        .stdout(contains("restroom break ended after 21 min"));

    as_user(&db_path, OWNER, "2026-10-05 10:30", &["scan"])
        .success()
        .stdout(contains("0 overtime alert(s) sent"));
}

#[test]
fn test_admin_commands_are_gated() {
    let db_path = setup_test_db("cli_admin_gate");
    init(&db_path);

    as_user(&db_path, "10", "2026-10-05 07:00", &["register", "--handle", "alice", "Alice"]).success();

    as_user(&db_path, "10", "2026-10-05 09:00", &["set-bonus", "100"])
        .failure()
        .stderr(contains("Unauthorized"));

    as_user(&db_path, OWNER, "2026-10-05 09:00", &["setadmin", "@alice", "7"])
        .success()
        .stdout(contains("Admin rights granted until 2026-10-12 09:00"));

    as_user(&db_path, "10", "2026-10-05 09:00", &["set-bonus", "100"])
        .success()
        .stdout(contains("bonus set to 100"));

    as_user(&db_path, "10", "2026-10-05 09:00", &["set-toilet", "0"])
        .failure()
        .stderr(contains("Invalid argument"));
}

#[test]
fn test_report_month_exports_json() {
    let db_path = setup_test_db("cli_payroll");
    init(&db_path);

    as_user(&db_path, "10", "2026-10-01 07:00", &["register", "--handle", "alice", "Alice"]).success();
    as_user(&db_path, "11", "2026-10-01 07:00", &["register", "--handle", "bob", "Bob"]).success();
    as_user(&db_path, OWNER, "2026-10-01 07:00", &["set-salary", "@alice", "1000"]).success();
    as_user(&db_path, OWNER, "2026-10-01 07:00", &["set-salary", "@bob", "1000"]).success();
    as_user(&db_path, OWNER, "2026-10-01 07:00", &["set-bonus", "50"]).success();

    as_user(&db_path, "10", "2026-10-01 07:58", &["in"]).success();
    as_user(&db_path, "11", "2026-10-01 08:15", &["in"]).success();

    let out = temp_out("cli_payroll", "json");
    as_user(
        &db_path,
        OWNER,
        "2026-10-31 18:00",
        &["report-month", "--month", "10", "--year", "2026", "--format", "json", "--file", &out],
    )
    .success()
    .stdout(contains("Payroll 2026-10"));

    let content = fs::read_to_string(&out).expect("export written");
    let lines: Value = serde_json::from_str(&content).expect("valid json");
    let lines = lines.as_array().expect("array");
    assert_eq!(lines.len(), 2);

    assert_eq!(lines[0]["full_name"], "Alice");
    assert_eq!(lines[0]["bonus_eligible"], true);
    assert_eq!(lines[0]["final_pay"], "1050");

    assert_eq!(lines[1]["late_minutes"], 15);
    assert_eq!(lines[1]["bonus_eligible"], false);
    assert_eq!(lines[1]["final_pay"], "1000");
}

#[test]
fn test_report_day_and_log() {
    let db_path = setup_test_db("cli_report_day");
    init(&db_path);

    as_user(&db_path, "10", "2026-10-05 07:00", &["register", "--handle", "alice", "Alice Doe"]).success();
    as_user(&db_path, "10", "2026-10-05 08:03", &["in"]).success();

    as_user(&db_path, OWNER, "2026-10-05 12:00", &["report-day"])
        .success()
        .stdout(contains("Attendance 2026-10-05"))
        .stdout(contains("Alice Doe"))
        .stdout(contains("3 min"));

    as_user(&db_path, OWNER, "2026-10-05 12:00", &["log", "--print"])
        .success()
        .stdout(contains("check_in"))
        .stdout(contains("register"));
}

#[test]
fn test_fire_and_leave() {
    let db_path = setup_test_db("cli_fire");
    init(&db_path);

    as_user(&db_path, "11", "2026-10-05 07:00", &["register", "--handle", "bob", "Bob"]).success();

    as_user(&db_path, "11", "2026-10-05 07:05", &["leave", "sick", "fever"])
        .success()
        .stdout(contains("Leave recorded (sick)"));

    as_user(&db_path, OWNER, "2026-10-05 09:00", &["fire", "@bob"])
        .success()
        .stdout(contains("Bob has been terminated"));

    as_user(&db_path, "11", "2026-10-06 08:00", &["in"])
        .failure()
        .stderr(contains("terminated"));
}

#[test]
fn test_report_month_exports_csv() {
    let db_path = setup_test_db("cli_payroll_csv");
    init(&db_path);

    as_user(&db_path, "10", "2026-10-01 07:00", &["register", "--handle", "alice", "Alice"]).success();
    as_user(&db_path, "11", "2026-10-01 07:00", &["register", "--handle", "bob", "Bob"]).success();
    as_user(&db_path, OWNER, "2026-10-01 07:00", &["set-salary", "@alice", "1200.50"]).success();
    as_user(&db_path, OWNER, "2026-10-01 07:00", &["set-salary", "@bob", "900"]).success();
    as_user(&db_path, OWNER, "2026-10-01 07:00", &["set-bonus", "99.50"]).success();

    as_user(&db_path, "10", "2026-10-01 08:00", &["in"]).success();
    as_user(&db_path, "11", "2026-10-01 08:09", &["in"]).success();

    let out = temp_out("cli_payroll_csv", "csv");
    as_user(
        &db_path,
        OWNER,
        "2026-10-31 18:00",
        &["report-month", "--month", "10", "--year", "2026", "--format", "csv", "--file", &out],
    )
    .success()
    .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("export written");
    let rows: Vec<&str> = content.lines().collect();
    assert_eq!(rows.len(), 3, "header plus one line per active user");
    assert_eq!(
        rows[0],
        "user_id,full_name,work_days,late_minutes,approved_leaves,bonus_eligible,base_salary,final_pay"
    );
    assert_eq!(rows[1], "10,Alice,1,0,0,true,1200.50,1300.00");
    assert_eq!(rows[2], "11,Bob,1,9,0,false,900,900");
}

#[test]
fn test_export_file_requires_format() {
    let db_path = setup_test_db("cli_file_no_format");
    init(&db_path);

    let out = temp_out("cli_file_no_format", "csv");
    as_user(&db_path, OWNER, "2026-10-31 18:00", &["report-month", "--file", &out])
        .failure()
        .stderr(contains("--format"));
    assert!(!std::path::Path::new(&out).exists());
}
