//! State store
//!
//! Owns the persisted state tree. Loading applies the shape upgrade and the
//! daily reset; every successful update is written back as a whole.

use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde_json::Value;

use super::upgrade;
use crate::db::{Database, DbError, DbResult};
use crate::error::TrackerError;
use crate::models::AppState;

/// Key the state tree is stored under
pub const STATE_KEY: &str = "trifitnityData";

/// Errors from a store update
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Rejected(#[from] TrackerError),
}

/// Today's date on the local calendar
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Shape version recorded in a stored blob, if it parses
pub fn stored_version_of(blob: &str) -> Option<u32> {
    serde_json::from_str::<Value>(blob)
        .ok()
        .map(|tree| upgrade::stored_version(&tree))
}

#[derive(Clone)]
pub struct StateStore {
    db: Database,
}

impl StateStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Load the tree as of `today`. A missing or unreadable blob yields the
    /// initial state.
    pub fn load(&self, today: NaiveDate) -> DbResult<AppState> {
        self.db.with_conn(|conn| load_state(conn, today))
    }

    /// Persist the whole tree
    pub fn save(&self, state: &AppState) -> DbResult<()> {
        self.db.with_conn(|conn| save_state(conn, state))
    }

    /// Load, apply `f`, and save the result inside one write transaction.
    /// A rejected update rolls back and writes nothing.
    pub fn update<F>(&self, today: NaiveDate, f: F) -> Result<AppState, StoreError>
    where
        F: FnOnce(&AppState) -> Result<AppState, TrackerError>,
    {
        let mut conn = self.db.get_conn()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(DbError::from)?;

        let current = load_state(&tx, today)?;
        let next = f(&current)?;
        save_state(&tx, &next)?;
        tx.commit().map_err(DbError::from)?;
        Ok(next)
    }

    /// Raw stored blob, if any
    pub fn raw(&self) -> DbResult<Option<String>> {
        self.db.with_conn(|conn| read_blob(conn))
    }

    /// Drop the stored tree; the next load starts from defaults
    pub fn clear(&self) -> DbResult<()> {
        self.db.with_conn(|conn| {
            conn.execute("DELETE FROM app_state WHERE key = ?1", params![STATE_KEY])?;
            tracing::info!("Stored state cleared");
            Ok(())
        })
    }
}

fn read_blob(conn: &Connection) -> DbResult<Option<String>> {
    let blob = conn
        .query_row(
            "SELECT value FROM app_state WHERE key = ?1",
            params![STATE_KEY],
            |row| row.get(0),
        )
        .optional()?;
    Ok(blob)
}

fn load_state(conn: &Connection, today: NaiveDate) -> DbResult<AppState> {
    let Some(blob) = read_blob(conn)? else {
        return Ok(AppState::initial(today));
    };

    let mut state = match parse_state(&blob, today) {
        Ok((state, 0)) => state,
        // backfilled instance ids must survive the next load
        Ok((state, steps)) => {
            save_state(conn, &state)?;
            tracing::info!(steps, "Stored state upgraded and saved");
            state
        }
        Err(e) => {
            tracing::warn!("Discarding unreadable stored state: {}", e);
            AppState::initial(today)
        }
    };

    if state.nutrition.reset_if_stale(today) {
        tracing::info!(%today, "New day, consumed log cleared");
    }
    Ok(state)
}

/// Parse a stored blob, returning the state and the number of upgrade steps applied
fn parse_state(blob: &str, today: NaiveDate) -> DbResult<(AppState, usize)> {
    let mut tree: Value = serde_json::from_str(blob)?;
    let steps = upgrade::upgrade(&mut tree, today)?;
    Ok((serde_json::from_value(tree)?, steps))
}

fn save_state(conn: &Connection, state: &AppState) -> DbResult<()> {
    let blob = serde_json::to_string(state)?;
    conn.execute(
        "INSERT INTO app_state (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![STATE_KEY, blob],
    )?;
    tracing::debug!(bytes = blob.len(), "State saved");
    Ok(())
}
