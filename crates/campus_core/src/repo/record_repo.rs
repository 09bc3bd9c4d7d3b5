//! Generic record repository contract and its SQLite implementation.
//!
//! # Responsibility
//! - Provide find-all / find-by-id / save / delete over one entity table.
//! - Keep SQL text inside the persistence boundary.
//!
//! # Invariants
//! - `find_all` returns rows in insertion order.
//! - `save` with an assigned key overwrites the whole row (last write wins).
//! - Read paths surface malformed rows as errors instead of skipping them.

use super::tables::TableRecord;
use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::record::{KeyStrategy, Record, RecordKey};
use log::debug;
use rusqlite::{params_from_iter, Connection, OptionalExtension, ToSql};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound {
        entity: &'static str,
        key: String,
    },
    /// Natural-key record saved without its key.
    MissingKey(&'static str),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, key } => write!(f, "{entity} with id {key} not found"),
            Self::MissingKey(entity) => write!(f, "{entity} cannot be saved without a key"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for one entity table.
pub trait Repository<R: Record> {
    fn find_all(&self) -> RepoResult<Vec<R>>;
    fn find_by_id(&self, key: &R::Key) -> RepoResult<Option<R>>;
    /// Inserts when the key is unassigned, otherwise overwrites the keyed row.
    fn save(&self, record: R) -> RepoResult<R>;
    fn delete(&self, record: &R) -> RepoResult<()>;
}

/// SQLite-backed repository for any record with a table mapping.
pub struct SqliteRepository<'conn, R> {
    conn: &'conn Connection,
    _record: PhantomData<fn() -> R>,
}

impl<'conn, R: TableRecord> SqliteRepository<'conn, R> {
    /// Wraps a migrated connection after checking the table layout.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not match this record mapping.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        ensure_table_layout::<R>(conn)?;

        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }

    fn select_sql() -> String {
        format!(
            "SELECT {}, {} FROM {}",
            R::KEY_COLUMN,
            R::COLUMNS.join(", "),
            R::TABLE
        )
    }

    fn insert_generated(&self, mut record: R) -> RepoResult<R> {
        let placeholders = placeholders(1, R::COLUMNS.len());
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            R::TABLE,
            R::COLUMNS.join(", ")
        );

        self.conn
            .execute(&sql, params_from_iter(record.column_values()))?;

        let rowid = self.conn.last_insert_rowid();
        let key = R::Key::from_generated(rowid).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "{} key cannot hold generated row id {rowid}",
                R::TABLE
            ))
        })?;
        record.set_key(key);

        debug!(
            "event=record_insert module=repo status=ok table={} key={}",
            R::TABLE,
            record.key()
        );
        Ok(record)
    }

    fn upsert(&self, record: R) -> RepoResult<R> {
        let placeholders = placeholders(1, R::COLUMNS.len() + 1);
        let assignments = R::COLUMNS
            .iter()
            .map(|column| format!("{column} = excluded.{column}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {table} ({key}, {columns}) VALUES ({placeholders})
             ON CONFLICT({key}) DO UPDATE SET {assignments};",
            table = R::TABLE,
            key = R::KEY_COLUMN,
            columns = R::COLUMNS.join(", "),
        );

        {
            let mut values: Vec<&dyn ToSql> = vec![record.key() as &dyn ToSql];
            values.extend(record.column_values());
            self.conn.execute(&sql, params_from_iter(values))?;
        }

        debug!(
            "event=record_upsert module=repo status=ok table={} key={}",
            R::TABLE,
            record.key()
        );
        Ok(record)
    }
}

impl<R: TableRecord> Repository<R> for SqliteRepository<'_, R> {
    fn find_all(&self) -> RepoResult<Vec<R>> {
        let sql = format!("{} ORDER BY rowid ASC;", Self::select_sql());
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(R::from_row(row)?);
        }

        Ok(records)
    }

    fn find_by_id(&self, key: &R::Key) -> RepoResult<Option<R>> {
        let sql = format!("{} WHERE {} = ?1;", Self::select_sql(), R::KEY_COLUMN);
        let record = self
            .conn
            .query_row(&sql, [key as &dyn ToSql], |row| R::from_row(row))
            .optional()?;
        Ok(record)
    }

    fn save(&self, record: R) -> RepoResult<R> {
        if !record.key().is_unassigned() {
            return self.upsert(record);
        }

        match R::KEY_STRATEGY {
            KeyStrategy::Generated => self.insert_generated(record),
            KeyStrategy::Natural => Err(RepoError::MissingKey(R::ENTITY_NAME)),
        }
    }

    fn delete(&self, record: &R) -> RepoResult<()> {
        let sql = format!("DELETE FROM {} WHERE {} = ?1;", R::TABLE, R::KEY_COLUMN);
        let changed = self.conn.execute(&sql, [record.key() as &dyn ToSql])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: R::ENTITY_NAME,
                key: record.key().to_string(),
            });
        }

        debug!(
            "event=record_delete module=repo status=ok table={} key={}",
            R::TABLE,
            record.key()
        );
        Ok(())
    }
}

fn ensure_table_layout<R: TableRecord>(conn: &Connection) -> RepoResult<()> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [R::TABLE],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(RepoError::MissingRequiredTable(R::TABLE));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", R::TABLE))?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;

    let required = std::iter::once(R::KEY_COLUMN).chain(R::COLUMNS.iter().copied());
    for column in required {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: R::TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn placeholders(first: usize, count: usize) -> String {
    (first..first + count)
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ")
}
