//! Letter-of-recommendation request addressed to a professor.

use super::record::{KeyStrategy, Record};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default, deserialize_with = "super::record::nullable_key")]
    pub id: i64,
    pub requester_email: String,
    pub professor_email: String,
    pub explanation: String,
    pub date_requested: NaiveDateTime,
    pub date_needed: NaiveDateTime,
    pub done: bool,
}

impl RecommendationRequest {
    pub fn new(
        requester_email: impl Into<String>,
        professor_email: impl Into<String>,
        explanation: impl Into<String>,
        date_requested: NaiveDateTime,
        date_needed: NaiveDateTime,
        done: bool,
    ) -> Self {
        Self {
            id: 0,
            requester_email: requester_email.into(),
            professor_email: professor_email.into(),
            explanation: explanation.into(),
            date_requested,
            date_needed,
            done,
        }
    }
}

impl Record for RecommendationRequest {
    type Key = i64;

    const ENTITY_NAME: &'static str = "RecommendationRequest";
    const KEY_STRATEGY: KeyStrategy = KeyStrategy::Generated;

    fn key(&self) -> &i64 {
        &self.id
    }

    fn set_key(&mut self, key: i64) {
        self.id = key;
    }

    fn overwrite_from(&mut self, incoming: Self) {
        self.requester_email = incoming.requester_email;
        self.professor_email = incoming.professor_email;
        self.explanation = incoming.explanation;
        self.date_requested = incoming.date_requested;
        self.date_needed = incoming.date_needed;
        self.done = incoming.done;
    }
}
