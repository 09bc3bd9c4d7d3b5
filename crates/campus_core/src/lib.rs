//! Core domain logic for the campus records service.
//! Entity models, the SQLite record store, repositories, the record service
//! and the access guard live here; the HTTP surface is a thin layer on top.

pub mod access;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use access::capability::{parse_role, Capability, Role, RoleParseError};
pub use access::guard::{
    authorize, is_admin_email, AccessError, DirectoryError, Principal, PrincipalDirectory,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::article::Article;
pub use model::dining_commons_menu_item::UcsbDiningCommonsMenuItem;
pub use model::help_request::HelpRequest;
pub use model::menu_item_review::MenuItemReview;
pub use model::recommendation_request::RecommendationRequest;
pub use model::record::{KeyStrategy, Record, RecordKey};
pub use model::ucsb_organization::UcsbOrganization;
pub use repo::record_repo::{RepoError, RepoResult, Repository, SqliteRepository};
pub use repo::tables::TableRecord;
pub use service::record_service::{RecordService, ServiceError, ServiceResult};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
