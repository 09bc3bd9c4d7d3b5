//! Menu item served at a dining commons station.

use super::record::{KeyStrategy, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UcsbDiningCommonsMenuItem {
    #[serde(default, deserialize_with = "super::record::nullable_key")]
    pub id: i64,
    /// Short code of the dining commons (for example `DLG`).
    pub dining_commons_code: String,
    pub name: String,
    pub station: String,
}

impl UcsbDiningCommonsMenuItem {
    pub fn new(
        dining_commons_code: impl Into<String>,
        name: impl Into<String>,
        station: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            dining_commons_code: dining_commons_code.into(),
            name: name.into(),
            station: station.into(),
        }
    }
}

impl Record for UcsbDiningCommonsMenuItem {
    type Key = i64;

    const ENTITY_NAME: &'static str = "UCSBDiningCommonsMenuItem";
    const KEY_STRATEGY: KeyStrategy = KeyStrategy::Generated;

    fn key(&self) -> &i64 {
        &self.id
    }

    fn set_key(&mut self, key: i64) {
        self.id = key;
    }

    fn overwrite_from(&mut self, incoming: Self) {
        self.dining_commons_code = incoming.dining_commons_code;
        self.name = incoming.name;
        self.station = incoming.station;
    }
}
