//! HTTP binding for each entity: mount path, key parameter and the
//! query parameters accepted by `POST .../post`.

use campus_core::{
    Article, HelpRequest, MenuItemReview, RecommendationRequest, TableRecord,
    UcsbDiningCommonsMenuItem, UcsbOrganization,
};
use chrono::NaiveDateTime;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub trait Resource: TableRecord + Serialize + DeserializeOwned + Sync {
    /// Segment under `/api/`.
    const PATH: &'static str;
    /// Query parameter naming the key on get / put / delete.
    const KEY_PARAM: &'static str;

    type CreateParams: DeserializeOwned + Send + 'static;

    /// Builds an unsaved record from create parameters.
    fn from_params(params: Self::CreateParams) -> Self;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleParams {
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub email: String,
    pub date_added: NaiveDateTime,
}

impl Resource for Article {
    const PATH: &'static str = "articles";
    const KEY_PARAM: &'static str = "id";

    type CreateParams = ArticleParams;

    fn from_params(p: ArticleParams) -> Self {
        Article::new(p.title, p.url, p.explanation, p.email, p.date_added)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestParams {
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    pub request_time: NaiveDateTime,
    pub explanation: String,
    pub solved: bool,
}

impl Resource for HelpRequest {
    const PATH: &'static str = "helprequests";
    const KEY_PARAM: &'static str = "id";

    type CreateParams = HelpRequestParams;

    fn from_params(p: HelpRequestParams) -> Self {
        HelpRequest::new(
            p.requester_email,
            p.team_id,
            p.table_or_breakout_room,
            p.request_time,
            p.explanation,
            p.solved,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemReviewParams {
    pub item_id: i64,
    pub reviewer_email: String,
    pub stars: i32,
    pub date_reviewed: NaiveDateTime,
    pub comments: String,
}

impl Resource for MenuItemReview {
    const PATH: &'static str = "MenuItemReviews";
    const KEY_PARAM: &'static str = "id";

    type CreateParams = MenuItemReviewParams;

    fn from_params(p: MenuItemReviewParams) -> Self {
        MenuItemReview::new(
            p.item_id,
            p.reviewer_email,
            p.stars,
            p.date_reviewed,
            p.comments,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequestParams {
    pub requester_email: String,
    pub professor_email: String,
    pub explanation: String,
    pub date_requested: NaiveDateTime,
    pub date_needed: NaiveDateTime,
    pub done: bool,
}

impl Resource for RecommendationRequest {
    const PATH: &'static str = "recommendationrequest";
    const KEY_PARAM: &'static str = "id";

    type CreateParams = RecommendationRequestParams;

    fn from_params(p: RecommendationRequestParams) -> Self {
        RecommendationRequest::new(
            p.requester_email,
            p.professor_email,
            p.explanation,
            p.date_requested,
            p.date_needed,
            p.done,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UcsbOrganizationParams {
    pub org_code: String,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

impl Resource for UcsbOrganization {
    const PATH: &'static str = "ucsborganization";
    const KEY_PARAM: &'static str = "orgCode";

    type CreateParams = UcsbOrganizationParams;

    fn from_params(p: UcsbOrganizationParams) -> Self {
        UcsbOrganization::new(
            p.org_code,
            p.org_translation_short,
            p.org_translation,
            p.inactive,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningCommonsMenuItemParams {
    pub dining_commons_code: String,
    pub name: String,
    pub station: String,
}

impl Resource for UcsbDiningCommonsMenuItem {
    const PATH: &'static str = "ucsbdiningcommonsmenuitem";
    const KEY_PARAM: &'static str = "id";

    type CreateParams = DiningCommonsMenuItemParams;

    fn from_params(p: DiningCommonsMenuItemParams) -> Self {
        UcsbDiningCommonsMenuItem::new(p.dining_commons_code, p.name, p.station)
    }
}
