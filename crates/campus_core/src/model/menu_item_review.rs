//! Review of a dining-commons menu item.

use super::record::{KeyStrategy, Record};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Star rating left by a reviewer for one menu item.
///
/// `item_id` is a plain number; it is not checked against the menu item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemReview {
    #[serde(default, deserialize_with = "super::record::nullable_key")]
    pub id: i64,
    pub item_id: i64,
    pub reviewer_email: String,
    pub stars: i32,
    pub date_reviewed: NaiveDateTime,
    pub comments: String,
}

impl MenuItemReview {
    pub fn new(
        item_id: i64,
        reviewer_email: impl Into<String>,
        stars: i32,
        date_reviewed: NaiveDateTime,
        comments: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            item_id,
            reviewer_email: reviewer_email.into(),
            stars,
            date_reviewed,
            comments: comments.into(),
        }
    }
}

impl Record for MenuItemReview {
    type Key = i64;

    const ENTITY_NAME: &'static str = "MenuItemReview";
    const KEY_STRATEGY: KeyStrategy = KeyStrategy::Generated;

    fn key(&self) -> &i64 {
        &self.id
    }

    fn set_key(&mut self, key: i64) {
        self.id = key;
    }

    fn overwrite_from(&mut self, incoming: Self) {
        self.item_id = incoming.item_id;
        self.reviewer_email = incoming.reviewer_email;
        self.stars = incoming.stars;
        self.date_reviewed = incoming.date_reviewed;
        self.comments = incoming.comments;
    }
}
