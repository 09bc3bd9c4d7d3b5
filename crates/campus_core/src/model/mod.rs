//! Flat entity records served by the campus API.
//!
//! # Responsibility
//! - Define one record type per table with its JSON wire shape.
//! - Keep key handling and update semantics behind the `Record` contract.
//!
//! # Invariants
//! - No record references another; there are no joins or cascades.
//! - JSON field names are camelCase in declaration order.

pub mod article;
pub mod dining_commons_menu_item;
pub mod help_request;
pub mod menu_item_review;
pub mod recommendation_request;
pub mod record;
pub mod ucsb_organization;
