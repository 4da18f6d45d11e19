use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20260301_0001_core_tables",
        description: "Created users, admins, chat_settings, attendance, activity_logs, leave_requests",
        sql: r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id      INTEGER NOT NULL,
            chat_id      INTEGER NOT NULL,
            username     TEXT NOT NULL DEFAULT '',
            full_name    TEXT NOT NULL DEFAULT '',
            base_salary  TEXT NOT NULL DEFAULT '0',
            is_active    INTEGER NOT NULL DEFAULT 1,
            PRIMARY KEY (user_id, chat_id)
        );

        CREATE TABLE IF NOT EXISTS admins (
            user_id      INTEGER PRIMARY KEY,
            expire_date  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS chat_settings (
            chat_id      INTEGER PRIMARY KEY,
            off_days     TEXT NOT NULL DEFAULT 'Sunday',
            bonus        TEXT NOT NULL DEFAULT '0',
            toilet_limit INTEGER NOT NULL DEFAULT 15,
            smoke_limit  INTEGER NOT NULL DEFAULT 10,
            work_hours   TEXT NOT NULL DEFAULT '08:00-17:00'
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      INTEGER NOT NULL,
            chat_id      INTEGER NOT NULL,
            work_date    TEXT NOT NULL,
            check_in     TEXT NOT NULL,
            check_out    TEXT,
            late_mins    INTEGER NOT NULL DEFAULT 0,
            UNIQUE (user_id, chat_id, work_date)
        );

        CREATE TABLE IF NOT EXISTS activity_logs (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      INTEGER NOT NULL,
            chat_id      INTEGER NOT NULL,
            type         TEXT NOT NULL,
            start_at     TEXT NOT NULL,
            end_at       TEXT
        );

        CREATE TABLE IF NOT EXISTS leave_requests (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      INTEGER NOT NULL,
            chat_id      INTEGER NOT NULL,
            kind         TEXT NOT NULL,
            reason       TEXT NOT NULL DEFAULT '',
            timestamp    TEXT NOT NULL,
            status       TEXT NOT NULL DEFAULT 'APPROVED'
                         CHECK(status IN ('APPROVED','PENDING','REJECTED'))
        );
        "#,
    },
    Migration {
        version: "20260301_0002_open_break_guard",
        description: "At most one open break per user and type",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_activity_open
            ON activity_logs(user_id, type) WHERE end_at IS NULL;
        "#,
    },
    Migration {
        version: "20260301_0003_report_indexes",
        description: "Indexes for monthly and open-break lookups",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_attendance_chat_date ON attendance(chat_id, work_date);
        CREATE INDEX IF NOT EXISTS idx_activity_chat_open ON activity_logs(chat_id, end_at);
        CREATE INDEX IF NOT EXISTS idx_leave_user_chat ON leave_requests(user_id, chat_id);
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()?;

    tracing::info!(version = m.version, "migration applied");
    Ok(())
}

/// Public entry point: apply every migration not yet recorded in `log`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}
