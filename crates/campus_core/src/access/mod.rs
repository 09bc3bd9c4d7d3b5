//! Access guard contracts.
//!
//! Two capability tiers gate every operation: `user` for reads and `admin`
//! for mutations. Callers without a principal are rejected before any
//! controller logic runs.

pub mod capability;
pub mod guard;
