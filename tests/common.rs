#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, FixedOffset};
use rattendance::core::Caller;
use rattendance::core::clock::Clock;
use rattendance::core::roles::RoleResolver;
use rattendance::db::pool::DbPool;
use rattendance::errors::{AppError, AppResult};
use rattendance::notify::Notifier;
use rattendance::utils::time::parse_local_datetime;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

pub const OWNER: i64 = 1;
pub const CHAT: i64 = -100;
pub const ALICE: Caller = Caller { user_id: 10, chat_id: CHAT };
pub const BOB: Caller = Caller { user_id: 11, chat_id: CHAT };

pub fn rti() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Temporary output file path, removed beforehand
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn bkk() -> FixedOffset {
    FixedOffset::east_opt(7 * 3600).expect("offset")
}

pub fn clock() -> Clock {
    Clock::new(bkk())
}

pub fn roles() -> RoleResolver {
    RoleResolver::new(Some(OWNER))
}

/// Wall-clock time in the test zone.
pub fn at(s: &str) -> DateTime<FixedOffset> {
    parse_local_datetime(s, bkk()).expect("valid test time")
}

pub fn pool() -> DbPool {
    DbPool::in_memory().expect("in-memory db")
}

/// Register users directly through the store.
pub fn register(pool: &DbPool, who: Caller, handle: &str, name: &str) {
    rattendance::db::users::upsert_user(&pool.conn, who.user_id, who.chat_id, handle, name)
        .expect("register user");
}

pub fn pool_with_staff() -> DbPool {
    let p = pool();
    register(&p, ALICE, "alice", "Alice Doe");
    register(&p, BOB, "bob", "Bob Roe");
    p
}

/// Keeps every delivered message; workspaces in `failing` reject delivery.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<(i64, String)>>,
    failing: Vec<i64>,
}

impl MemoryNotifier {
    pub fn failing_for(chats: &[i64]) -> Self {
        Self {
            sent: Mutex::default(),
            failing: chats.to_vec(),
        }
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for MemoryNotifier {
    fn deliver(&self, chat_id: i64, text: &str) -> AppResult<()> {
        if self.failing.contains(&chat_id) {
            return Err(AppError::Notify(format!("chat {chat_id} unreachable")));
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}
