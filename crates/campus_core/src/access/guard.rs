//! Principals, the token directory, and the authorization predicate.
//!
//! # Invariants
//! - Every principal holds `Role::User`; admins additionally hold `Role::Admin`.
//! - `authorize` has no state of its own beyond the caller's role set.

use super::capability::{Capability, Role};
use log::warn;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Authenticated caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub email: String,
    pub roles: BTreeSet<Role>,
}

impl Principal {
    /// Builds a principal with `Role::User`, plus `Role::Admin` when `admin`.
    pub fn new(email: impl Into<String>, admin: bool) -> Self {
        let mut roles = BTreeSet::from([Role::User]);
        if admin {
            roles.insert(Role::Admin);
        }
        Self {
            email: email.into(),
            roles,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

/// Returns whether `email` appears in the configured admin list
/// (case-insensitive, surrounding whitespace ignored).
pub fn is_admin_email(email: &str, admin_emails: &[String]) -> bool {
    admin_emails
        .iter()
        .any(|candidate| candidate.trim().eq_ignore_ascii_case(email.trim()))
}

/// Access guard failures. Both map to "forbidden" at the HTTP edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    Unauthenticated,
    MissingRole { email: String, required: Role },
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "Access Denied"),
            Self::MissingRole { email, required } => {
                write!(f, "Access Denied: {email} lacks {required}")
            }
        }
    }
}

impl Error for AccessError {}

/// Checks that `caller` may exercise `capability`.
pub fn authorize(caller: Option<&Principal>, capability: Capability) -> Result<(), AccessError> {
    let Some(principal) = caller else {
        return Err(AccessError::Unauthenticated);
    };

    let required = capability.required_role();
    if principal.has_role(required) {
        return Ok(());
    }

    warn!(
        "event=access_denied module=access status=error capability={} email={}",
        capability.as_str(),
        principal.email
    );
    Err(AccessError::MissingRole {
        email: principal.email.clone(),
        required,
    })
}

/// Errors raised while building the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    EmptyToken,
    DuplicateToken(String),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "principal token must not be empty"),
            Self::DuplicateToken(email) => {
                write!(f, "principal token already registered (second owner: {email})")
            }
        }
    }
}

impl Error for DirectoryError {}

/// In-process mapping from opaque bearer tokens to principals.
///
/// Tokens are provisioned by configuration; this type never issues them.
#[derive(Debug, Clone, Default)]
pub struct PrincipalDirectory {
    entries: BTreeMap<String, Principal>,
}

impl PrincipalDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the principal presenting `token`.
    pub fn register(&mut self, token: &str, principal: Principal) -> Result<(), DirectoryError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DirectoryError::EmptyToken);
        }
        if self.entries.contains_key(token) {
            return Err(DirectoryError::DuplicateToken(principal.email));
        }

        self.entries.insert(token.to_string(), principal);
        Ok(())
    }

    pub fn resolve(&self, token: &str) -> Option<&Principal> {
        self.entries.get(token.trim())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
