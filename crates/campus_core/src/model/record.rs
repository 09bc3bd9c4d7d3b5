//! Shared record contract implemented by every entity type.
//!
//! # Responsibility
//! - Describe how a flat record exposes its primary key.
//! - Define full-replacement update semantics in one place.
//!
//! # Invariants
//! - `overwrite_from` never touches the key.
//! - An unassigned key is `0` for generated keys and `""` for natural keys.

use rusqlite::types::{FromSql, ToSql};
use serde::{Deserialize, Deserializer};
use std::fmt::{Debug, Display};

/// How a table obtains primary keys for new rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Store assigns an increasing numeric key on insert.
    Generated,
    /// Caller supplies the key (for example an organization code).
    Natural,
}

/// Primary key value usable across store, service and HTTP layers.
pub trait RecordKey:
    Clone + Debug + Display + PartialEq + ToSql + FromSql + Send + Sync + 'static
{
    /// Returns whether this value stands for "no key assigned yet".
    fn is_unassigned(&self) -> bool;

    /// Converts a store-generated row id into a key, when the key type allows it.
    fn from_generated(rowid: i64) -> Option<Self>;

    /// Parses a key from its textual request form.
    fn parse_key(raw: &str) -> Option<Self>;
}

impl RecordKey for i64 {
    fn is_unassigned(&self) -> bool {
        *self == 0
    }

    fn from_generated(rowid: i64) -> Option<Self> {
        Some(rowid)
    }

    fn parse_key(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl RecordKey for String {
    fn is_unassigned(&self) -> bool {
        self.is_empty()
    }

    fn from_generated(_rowid: i64) -> Option<Self> {
        None
    }

    fn parse_key(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// Deserializes a key field, reading JSON `null` as the unassigned key.
pub fn nullable_key<'de, D, K>(deserializer: D) -> Result<K, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Default,
{
    Ok(Option::<K>::deserialize(deserializer)?.unwrap_or_default())
}

/// One flat entity record with a primary key and scalar fields.
pub trait Record: Clone + Debug + Send + 'static {
    type Key: RecordKey;

    /// Name used in user-facing messages (`"<name> with id <key> not found"`).
    const ENTITY_NAME: &'static str;
    const KEY_STRATEGY: KeyStrategy;

    fn key(&self) -> &Self::Key;
    fn set_key(&mut self, key: Self::Key);

    /// Replaces every mutable field with the values from `incoming`.
    fn overwrite_from(&mut self, incoming: Self);
}
