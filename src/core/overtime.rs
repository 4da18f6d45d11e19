use crate::core::clock::Clock;
use crate::db::{breaks, settings};
use crate::errors::AppResult;
use crate::models::break_interval::OpenBreak;
use crate::models::breach::Breach;
use crate::models::settings::WorkspaceSettings;
use crate::utils::time::elapsed_minutes;
use chrono::{DateTime, FixedOffset};
use rusqlite::Connection;

/// Read-only sweep over running breaks. Repeated scans re-report a breach
/// for as long as the interval stays open.
#[derive(Debug, Clone, Copy)]
pub struct OvertimeScanner {
    clock: Clock,
}

impl OvertimeScanner {
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    /// Breaches of one workspace at `now`.
    pub fn scan(&self, conn: &Connection, chat_id: i64, now: DateTime<FixedOffset>) -> AppResult<Vec<Breach>> {
        let ws = settings::load_settings(conn, chat_id)?;
        let open = breaks::open_in_workspace(conn, chat_id)?;
        Ok(self.detect(&ws, &open, now))
    }

    /// Breaches across every known workspace, in workspace order.
    pub fn scan_all(&self, conn: &Connection, now: DateTime<FixedOffset>) -> AppResult<Vec<Breach>> {
        let mut out = Vec::new();
        for chat_id in settings::known_workspaces(conn)? {
            out.extend(self.scan(conn, chat_id, now)?);
        }
        Ok(out)
    }

    /// A break is a breach iff its elapsed minutes strictly exceed the limit.
    pub fn detect(
        &self,
        ws: &WorkspaceSettings,
        open: &[OpenBreak],
        now: DateTime<FixedOffset>,
    ) -> Vec<Breach> {
        let now = self.clock.localize(now);

        open.iter()
            .filter_map(|b| {
                let elapsed = elapsed_minutes(self.clock.localize(b.start_at), now);
                let limit = ws.limit_for(b.kind);
                (elapsed > limit as f64).then(|| Breach {
                    chat_id: ws.chat_id,
                    user_id: b.user_id,
                    handle: b.handle.clone(),
                    kind: b.kind,
                    label: b.kind.label().to_string(),
                    elapsed_minutes: elapsed.floor() as i64,
                })
            })
            .collect()
    }
}
