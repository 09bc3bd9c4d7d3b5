//! Help request raised by a team during section.

use super::record::{KeyStrategy, Record};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    #[serde(default, deserialize_with = "super::record::nullable_key")]
    pub id: i64,
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    pub request_time: NaiveDateTime,
    pub explanation: String,
    pub solved: bool,
}

impl HelpRequest {
    /// Builds an unsaved help request.
    pub fn new(
        requester_email: impl Into<String>,
        team_id: impl Into<String>,
        table_or_breakout_room: impl Into<String>,
        request_time: NaiveDateTime,
        explanation: impl Into<String>,
        solved: bool,
    ) -> Self {
        Self {
            id: 0,
            requester_email: requester_email.into(),
            team_id: team_id.into(),
            table_or_breakout_room: table_or_breakout_room.into(),
            request_time,
            explanation: explanation.into(),
            solved,
        }
    }
}

impl Record for HelpRequest {
    type Key = i64;

    const ENTITY_NAME: &'static str = "HelpRequest";
    const KEY_STRATEGY: KeyStrategy = KeyStrategy::Generated;

    fn key(&self) -> &i64 {
        &self.id
    }

    fn set_key(&mut self, key: i64) {
        self.id = key;
    }

    fn overwrite_from(&mut self, incoming: Self) {
        self.requester_email = incoming.requester_email;
        self.team_id = incoming.team_id;
        self.table_or_breakout_room = incoming.table_or_breakout_room;
        self.request_time = incoming.request_time;
        self.explanation = incoming.explanation;
        self.solved = incoming.solved;
    }
}
