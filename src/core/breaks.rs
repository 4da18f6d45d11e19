//! Timed breaks as a two-state machine per (user, kind).

use crate::core::Caller;
use crate::core::clock::Clock;
use crate::core::roles::RoleResolver;
use crate::db::{attendance, breaks, log};
use crate::errors::{AppError, AppResult};
use crate::models::break_interval::BreakInterval;
use crate::models::break_kind::BreakKind;
use chrono::{DateTime, FixedOffset, Utc};
use rusqlite::{Connection, TransactionBehavior};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakState {
    Idle,
    OnBreak {
        interval_id: i64,
        started_at: DateTime<FixedOffset>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakTransition {
    /// Idle → on-break: a new interval opens at `at`.
    Started { at: DateTime<FixedOffset> },
    /// On-break → idle: the open interval is closed.
    Ended {
        interval_id: i64,
        started_at: DateTime<FixedOffset>,
        ended_at: DateTime<FixedOffset>,
    },
}

impl BreakState {
    pub fn from_open(open: Option<&BreakInterval>) -> Self {
        match open {
            Some(iv) => BreakState::OnBreak {
                interval_id: iv.id,
                started_at: iv.start_at,
            },
            None => BreakState::Idle,
        }
    }

    /// The only transition available from this state.
    /// A clock running behind the stored start never yields end < start.
    pub fn next(&self, now: DateTime<FixedOffset>) -> BreakTransition {
        match self {
            BreakState::Idle => BreakTransition::Started { at: now },
            BreakState::OnBreak {
                interval_id,
                started_at,
            } => BreakTransition::Ended {
                interval_id: *interval_id,
                started_at: *started_at,
                ended_at: now.max(*started_at),
            },
        }
    }
}

impl BreakTransition {
    pub fn is_start(&self) -> bool {
        matches!(self, BreakTransition::Started { .. })
    }

    /// Whole minutes spent on a finished break.
    pub fn duration_minutes(&self) -> Option<i64> {
        match self {
            BreakTransition::Started { .. } => None,
            BreakTransition::Ended {
                started_at,
                ended_at,
                ..
            } => Some((*ended_at - *started_at).num_minutes()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BreakTracker {
    roles: RoleResolver,
    clock: Clock,
}

impl BreakTracker {
    pub fn new(roles: RoleResolver, clock: Clock) -> Self {
        Self { roles, clock }
    }

    /// Single entry point: starts a break when idle, ends it when running.
    /// Requires a check-in for today in any workspace; the open break is
    /// looked up per (user, kind), so it can be closed from another
    /// workspace. Lookup and write share one immediate transaction.
    pub fn toggle(
        &self,
        conn: &mut Connection,
        caller: Caller,
        kind: BreakKind,
        now: DateTime<FixedOffset>,
    ) -> AppResult<BreakTransition> {
        let now = self.clock.localize(now);
        self.roles
            .resolve(conn, caller.user_id, caller.chat_id, now.with_timezone(&Utc))?
            .require_active()?;

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        if !attendance::checked_in_anywhere(&tx, caller.user_id, now.date_naive())? {
            return Err(AppError::NotCheckedIn);
        }

        let open = breaks::find_open(&tx, caller.user_id, kind)?;
        let transition = BreakState::from_open(open.as_ref()).next(now);

        match &transition {
            BreakTransition::Started { at } => {
                breaks::open_interval(&tx, caller.user_id, caller.chat_id, kind, at)?;
            }
            BreakTransition::Ended {
                interval_id,
                ended_at,
                ..
            } => {
                breaks::close_interval(&tx, *interval_id, ended_at)?;
            }
        }

        tx.commit()?;

        let verb = if transition.is_start() { "started" } else { "ended" };
        log::audit(
            conn,
            "break",
            &caller.to_string(),
            &format!("{} break {}", kind.to_db_str(), verb),
        );
        tracing::info!(user = caller.user_id, kind = kind.to_db_str(), verb, "break toggled");

        Ok(transition)
    }

    /// Current state for (user, kind), read straight from the store.
    pub fn state(&self, conn: &Connection, user_id: i64, kind: BreakKind) -> AppResult<BreakState> {
        let open = breaks::find_open(conn, user_id, kind)?;
        Ok(BreakState::from_open(open.as_ref()))
    }
}
