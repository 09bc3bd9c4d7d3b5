//! Article link shared with the course.

use super::record::{KeyStrategy, Record};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A link to an external article with the poster's explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Store-generated key; `0` until persisted.
    #[serde(default, deserialize_with = "super::record::nullable_key")]
    pub id: i64,
    pub title: String,
    pub url: String,
    pub explanation: String,
    /// Email of the person who added the article.
    pub email: String,
    pub date_added: NaiveDateTime,
}

impl Article {
    /// Builds an unsaved article.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        explanation: impl Into<String>,
        email: impl Into<String>,
        date_added: NaiveDateTime,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            url: url.into(),
            explanation: explanation.into(),
            email: email.into(),
            date_added,
        }
    }
}

impl Record for Article {
    type Key = i64;

    const ENTITY_NAME: &'static str = "Articles";
    const KEY_STRATEGY: KeyStrategy = KeyStrategy::Generated;

    fn key(&self) -> &i64 {
        &self.id
    }

    fn set_key(&mut self, key: i64) {
        self.id = key;
    }

    fn overwrite_from(&mut self, incoming: Self) {
        self.title = incoming.title;
        self.url = incoming.url;
        self.explanation = incoming.explanation;
        self.email = incoming.email;
        self.date_added = incoming.date_added;
    }
}
