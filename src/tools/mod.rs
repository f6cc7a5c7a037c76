//! TriFit tools module
//!
//! Tool implementations behind the MCP server. Each call loads the state
//! tree, applies one update and writes the tree back.

use chrono::{DateTime, Local, NaiveDate, Timelike, Utc};

pub mod dashboard;
pub mod fasting;
pub mod nutrition;
pub mod profile;
pub mod status;
pub mod workouts;

/// The moment a tool call happens, on both clocks the tools need
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    pub now: DateTime<Utc>,
    /// Local calendar day, used for the daily reset
    pub today: NaiveDate,
    /// Local hour of day, used to suggest a meal slot
    pub hour: u32,
}

impl Clock {
    pub fn current() -> Self {
        let local = Local::now();
        Self {
            now: local.with_timezone(&Utc),
            today: local.date_naive(),
            hour: local.hour(),
        }
    }

    /// Fixed clock for tests. The UTC date and hour stand in for local ones.
    #[cfg(test)]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            today: now.date_naive(),
            hour: now.hour(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::TimeZone;

    use super::Clock;
    use crate::db::{migrations::run_migrations, Database};
    use crate::store::StateStore;

    pub fn store() -> StateStore {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();
        StateStore::new(db)
    }

    pub fn clock(hour: u32, minute: u32) -> Clock {
        Clock::at(chrono::Utc.with_ymd_and_hms(2026, 8, 12, hour, minute, 0).unwrap())
    }
}
