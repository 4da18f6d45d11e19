//! Single fixed civil time zone for every wall-clock computation.

use chrono::{DateTime, FixedOffset, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    offset: FixedOffset,
}

impl Clock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.localize(Utc::now())
    }

    pub fn localize<Tz: chrono::TimeZone>(&self, ts: DateTime<Tz>) -> DateTime<FixedOffset> {
        ts.with_timezone(&self.offset)
    }
}
