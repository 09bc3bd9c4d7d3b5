//! Table mappings between entity records and SQLite rows.
//!
//! # Invariants
//! - `COLUMNS` lists every non-key column in record declaration order.
//! - `column_values` yields values in exactly the `COLUMNS` order.

use crate::model::article::Article;
use crate::model::dining_commons_menu_item::UcsbDiningCommonsMenuItem;
use crate::model::help_request::HelpRequest;
use crate::model::menu_item_review::MenuItemReview;
use crate::model::recommendation_request::RecommendationRequest;
use crate::model::record::Record;
use crate::model::ucsb_organization::UcsbOrganization;
use rusqlite::{Row, ToSql};

/// SQL layout of a record type.
pub trait TableRecord: Record {
    const TABLE: &'static str;
    const KEY_COLUMN: &'static str;
    const COLUMNS: &'static [&'static str];

    fn column_values(&self) -> Vec<&dyn ToSql>;
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

impl TableRecord for Article {
    const TABLE: &'static str = "articles";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] =
        &["title", "url", "explanation", "email", "date_added"];

    fn column_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.title as &dyn ToSql,
            &self.url as &dyn ToSql,
            &self.explanation as &dyn ToSql,
            &self.email as &dyn ToSql,
            &self.date_added as &dyn ToSql,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            url: row.get("url")?,
            explanation: row.get("explanation")?,
            email: row.get("email")?,
            date_added: row.get("date_added")?,
        })
    }
}

impl TableRecord for HelpRequest {
    const TABLE: &'static str = "help_requests";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "requester_email",
        "team_id",
        "table_or_breakout_room",
        "request_time",
        "explanation",
        "solved",
    ];

    fn column_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.requester_email as &dyn ToSql,
            &self.team_id as &dyn ToSql,
            &self.table_or_breakout_room as &dyn ToSql,
            &self.request_time as &dyn ToSql,
            &self.explanation as &dyn ToSql,
            &self.solved as &dyn ToSql,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            requester_email: row.get("requester_email")?,
            team_id: row.get("team_id")?,
            table_or_breakout_room: row.get("table_or_breakout_room")?,
            request_time: row.get("request_time")?,
            explanation: row.get("explanation")?,
            solved: row.get("solved")?,
        })
    }
}

impl TableRecord for MenuItemReview {
    const TABLE: &'static str = "menu_item_reviews";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "item_id",
        "reviewer_email",
        "stars",
        "date_reviewed",
        "comments",
    ];

    fn column_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.item_id as &dyn ToSql,
            &self.reviewer_email as &dyn ToSql,
            &self.stars as &dyn ToSql,
            &self.date_reviewed as &dyn ToSql,
            &self.comments as &dyn ToSql,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            item_id: row.get("item_id")?,
            reviewer_email: row.get("reviewer_email")?,
            stars: row.get("stars")?,
            date_reviewed: row.get("date_reviewed")?,
            comments: row.get("comments")?,
        })
    }
}

impl TableRecord for RecommendationRequest {
    const TABLE: &'static str = "recommendation_requests";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "requester_email",
        "professor_email",
        "explanation",
        "date_requested",
        "date_needed",
        "done",
    ];

    fn column_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.requester_email as &dyn ToSql,
            &self.professor_email as &dyn ToSql,
            &self.explanation as &dyn ToSql,
            &self.date_requested as &dyn ToSql,
            &self.date_needed as &dyn ToSql,
            &self.done as &dyn ToSql,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            requester_email: row.get("requester_email")?,
            professor_email: row.get("professor_email")?,
            explanation: row.get("explanation")?,
            date_requested: row.get("date_requested")?,
            date_needed: row.get("date_needed")?,
            done: row.get("done")?,
        })
    }
}

impl TableRecord for UcsbOrganization {
    const TABLE: &'static str = "ucsb_organizations";
    const KEY_COLUMN: &'static str = "org_code";
    const COLUMNS: &'static [&'static str] =
        &["org_translation_short", "org_translation", "inactive"];

    fn column_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.org_translation_short as &dyn ToSql,
            &self.org_translation as &dyn ToSql,
            &self.inactive as &dyn ToSql,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            org_code: row.get("org_code")?,
            org_translation_short: row.get("org_translation_short")?,
            org_translation: row.get("org_translation")?,
            inactive: row.get("inactive")?,
        })
    }
}

impl TableRecord for UcsbDiningCommonsMenuItem {
    const TABLE: &'static str = "ucsb_dining_commons_menu_items";
    const KEY_COLUMN: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["dining_commons_code", "name", "station"];

    fn column_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.dining_commons_code as &dyn ToSql,
            &self.name as &dyn ToSql,
            &self.station as &dyn ToSql,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            dining_commons_code: row.get("dining_commons_code")?,
            name: row.get("name")?,
            station: row.get("station")?,
        })
    }
}
