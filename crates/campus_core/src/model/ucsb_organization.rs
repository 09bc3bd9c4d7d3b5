//! Student organization keyed by its official organization code.
//!
//! # Invariants
//! - `org_code` is a natural key chosen by the caller; it is never generated
//!   and never rewritten by an update.

use super::record::{KeyStrategy, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UcsbOrganization {
    /// Absent in update bodies; the request's `orgCode` parameter is used instead.
    #[serde(default, deserialize_with = "super::record::nullable_key")]
    pub org_code: String,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

impl UcsbOrganization {
    pub fn new(
        org_code: impl Into<String>,
        org_translation_short: impl Into<String>,
        org_translation: impl Into<String>,
        inactive: bool,
    ) -> Self {
        Self {
            org_code: org_code.into(),
            org_translation_short: org_translation_short.into(),
            org_translation: org_translation.into(),
            inactive,
        }
    }
}

impl Record for UcsbOrganization {
    type Key = String;

    const ENTITY_NAME: &'static str = "UCSBOrganization";
    const KEY_STRATEGY: KeyStrategy = KeyStrategy::Natural;

    fn key(&self) -> &String {
        &self.org_code
    }

    fn set_key(&mut self, key: String) {
        self.org_code = key;
    }

    fn overwrite_from(&mut self, incoming: Self) {
        self.org_translation_short = incoming.org_translation_short;
        self.org_translation = incoming.org_translation;
        self.inactive = incoming.inactive;
    }
}
