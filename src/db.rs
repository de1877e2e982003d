//! SQLite storage for imported statistics
//!
//! Two denormalized tables, `States` and `Counties`, dropped and recreated
//! on every import run. A connection is opened and closed per logical
//! operation; batch inserts run inside a single transaction. There is no
//! pooling and no cross-operation transaction.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::data::StateStats;

/// Default database file name
pub const DEFAULT_DB_NAME: &str = "coronavirus_data.sqlite";

/// Errors that can occur when reading or writing the database
#[derive(Debug, Error)]
pub enum DbError {
    /// Underlying SQLite failure
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// One row of the `States` table as the web pages read it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRow {
    pub name: String,
    pub total_confirmed: u64,
    pub total_deaths: u64,
}

/// One row of the `Counties` table as the web pages read it
///
/// `total_deaths` is nullable in the schema while the state-level column is
/// NOT NULL; the asymmetry mirrors the upstream feed and is kept on purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountyRow {
    pub name: String,
    pub total_confirmed: u64,
    pub total_deaths: Option<u64>,
}

/// Counters from a county insert pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountyInsertStats {
    /// County rows written
    pub inserted: u64,
    /// County rows whose owning state lookup failed (stored with NULL ref)
    pub without_state: u64,
}

/// Handle to the statistics database
///
/// Holds only the file path; every method opens a fresh connection and
/// closes it on return.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Creates a handle for the database at `path`. The file is created
    /// lazily by the first operation.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn connect(&self) -> Result<Connection, DbError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Drops and recreates both tables. Every import is a full replace;
    /// there is no migration path for existing rows.
    pub fn create_schema(&self) -> Result<(), DbError> {
        let conn = self.connect()?;
        conn.execute_batch(
            r#"
            DROP TABLE IF EXISTS "Counties";
            DROP TABLE IF EXISTS "States";
            CREATE TABLE "States" (
                "Id" INTEGER PRIMARY KEY AUTOINCREMENT,
                "Name" TEXT NOT NULL,
                "TotalConfirmed" INTEGER NOT NULL,
                "TotalDeaths" INTEGER NOT NULL
            );
            CREATE TABLE "Counties" (
                "Id" INTEGER PRIMARY KEY AUTOINCREMENT,
                "Name" TEXT NOT NULL,
                "StateId" INTEGER REFERENCES "States"("Id"),
                "TotalConfirmed" INTEGER NOT NULL,
                "TotalDeaths" INTEGER
            );
            "#,
        )?;
        Ok(())
    }

    /// Inserts all state rows in one transaction.
    pub fn insert_states(&self, states: &[StateStats]) -> Result<(), DbError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"INSERT INTO "States" ("Name", "TotalConfirmed", "TotalDeaths")
                   VALUES (?1, ?2, ?3)"#,
            )?;
            for state in states {
                stmt.execute(params![state.name, state.total_confirmed, state.total_deaths])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Inserts the county rows of every state in one transaction, looking
    /// up each owning state by name as it goes.
    ///
    /// A failed lookup stores a NULL state reference for that state's
    /// counties instead of failing the batch.
    pub fn insert_counties(&self, states: &[StateStats]) -> Result<CountyInsertStats, DbError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let mut stats = CountyInsertStats::default();
        {
            let mut lookup =
                tx.prepare(r#"SELECT "Id" FROM "States" WHERE "Name" = ?1"#)?;
            let mut insert = tx.prepare(
                r#"INSERT INTO "Counties" ("Name", "StateId", "TotalConfirmed", "TotalDeaths")
                   VALUES (?1, ?2, ?3, ?4)"#,
            )?;
            for state in states {
                let state_id: Option<i64> = lookup
                    .query_row(params![state.name], |row| row.get(0))
                    .optional()?;
                for county in &state.counties {
                    if state_id.is_none() {
                        stats.without_state += 1;
                    }
                    insert.execute(params![
                        county.name,
                        state_id,
                        county.total_confirmed,
                        county.total_deaths
                    ])?;
                    stats.inserted += 1;
                }
            }
        }
        tx.commit()?;
        Ok(stats)
    }

    /// Looks up a state's row id by exact name.
    pub fn state_id_by_name(&self, name: &str) -> Result<Option<i64>, DbError> {
        let conn = self.connect()?;
        let id = conn
            .query_row(
                r#"SELECT "Id" FROM "States" WHERE "Name" = ?1"#,
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Returns every state row in insertion order.
    pub fn list_states(&self) -> Result<Vec<StateRow>, DbError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r#"SELECT "Name", "TotalConfirmed", "TotalDeaths" FROM "States""#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StateRow {
                    name: row.get(0)?,
                    total_confirmed: row.get(1)?,
                    total_deaths: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Returns the counties belonging to the named state (exact match).
    pub fn counties_for_state(&self, state_name: &str) -> Result<Vec<CountyRow>, DbError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r#"SELECT "Counties"."Name", "Counties"."TotalConfirmed", "Counties"."TotalDeaths"
               FROM "Counties"
               JOIN "States" ON "Counties"."StateId" = "States"."Id"
               WHERE "States"."Name" = ?1"#,
        )?;
        let rows = stmt
            .query_map(params![state_name], |row| {
                Ok(CountyRow {
                    name: row.get(0)?,
                    total_confirmed: row.get(1)?,
                    total_deaths: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Returns the stored totals for the named state, if present.
    pub fn state_totals(&self, state_name: &str) -> Result<Option<(u64, u64)>, DbError> {
        let conn = self.connect()?;
        let totals = conn
            .query_row(
                r#"SELECT "TotalConfirmed", "TotalDeaths" FROM "States" WHERE "Name" = ?1"#,
                params![state_name],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(totals)
    }
}
