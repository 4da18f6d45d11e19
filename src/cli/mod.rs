pub mod commands;
pub mod parser;

use crate::config::Config;
use crate::core::Caller;
use crate::core::clock::Clock;
use crate::core::roles::RoleResolver;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_local_datetime;
use chrono::{DateTime, FixedOffset};
use parser::Cli;

/// Per-invocation context: immutable configuration plus who is asking and when.
pub struct Ctx<'a> {
    pub cfg: &'a Config,
    pub clock: Clock,
    pub roles: RoleResolver,
    pub now: DateTime<FixedOffset>,
    user: Option<i64>,
    chat: Option<i64>,
}

impl<'a> Ctx<'a> {
    pub fn from_cli(cli: &Cli, cfg: &'a Config) -> AppResult<Self> {
        let clock = Clock::new(cfg.offset()?);
        let now = match &cli.now {
            Some(raw) => parse_local_datetime(raw, clock.offset())?,
            None => clock.now(),
        };

        Ok(Self {
            cfg,
            clock,
            roles: RoleResolver::new(cfg.owner_id),
            now,
            user: cli.user,
            chat: cli.chat,
        })
    }

    pub fn caller(&self) -> AppResult<Caller> {
        match (self.user, self.chat) {
            (Some(u), Some(c)) => Ok(Caller::new(u, c)),
            _ => Err(AppError::Validation(
                "this command needs --user <id> and --chat <id>".into(),
            )),
        }
    }

    pub fn open_db(&self) -> AppResult<DbPool> {
        DbPool::new(&self.cfg.database)
    }
}
