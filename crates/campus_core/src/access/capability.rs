//! Role and capability declarations for the access guard.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Granted authority held by an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    User,
    Admin,
}

/// Authority string for the regular user role.
pub const ROLE_USER: &str = "ROLE_USER";
/// Authority string for the admin role.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

impl Role {
    /// Stable authority string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => ROLE_USER,
            Self::Admin => ROLE_ADMIN,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one authority string, accepting the bare role name as well.
pub fn parse_role(value: &str) -> Result<Role, RoleParseError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(RoleParseError::EmptyRole);
    }

    match normalized {
        ROLE_USER | "USER" => Ok(Role::User),
        ROLE_ADMIN | "ADMIN" => Ok(Role::Admin),
        other => Err(RoleParseError::UnsupportedRole(other.to_string())),
    }
}

/// Role parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleParseError {
    EmptyRole,
    UnsupportedRole(String),
}

impl Display for RoleParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRole => write!(f, "role value must not be empty"),
            Self::UnsupportedRole(value) => write!(f, "role is unsupported: {value}"),
        }
    }
}

impl Error for RoleParseError {}

/// Capability an operation requires before it may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Read-only operations (list, get).
    User,
    /// Mutations (create, update, delete).
    Admin,
}

impl Capability {
    /// Role a caller must hold for this capability.
    pub fn required_role(self) -> Role {
        match self {
            Self::User => Role::User,
            Self::Admin => Role::Admin,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}
