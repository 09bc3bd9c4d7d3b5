//! Environment-driven server configuration.
//!
//! # Responsibility
//! - Read listen port, store location, logging options and the principal
//!   source from the process environment.
//! - Build the token directory, deciding admin status from the configured
//!   admin email list and optional per-entry roles.

use std::{env, fmt::Display, fs::read_to_string, path::PathBuf, str::FromStr};

use campus_core::{
    default_log_level, is_admin_email, parse_role, DirectoryError, Principal, PrincipalDirectory,
    Role, RoleParseError,
};
use serde::Deserialize;
use thiserror::Error;

/// Database path value selecting a private in-memory store.
pub const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub db_path: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub principals_file: Option<PathBuf>,
    pub admin_emails: Vec<String>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key} value `{value}`: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to read principals file {path}: {source}")]
    ReadPrincipals {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse principals file {path}: {source}")]
    ParsePrincipals {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid role for {email}: {source}")]
    InvalidRole {
        email: String,
        source: RoleParseError,
    },

    #[error("invalid principal entry: {0}")]
    Directory(#[from] DirectoryError),
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Ok(Self {
            port: try_load("CAMPUS_PORT", var("CAMPUS_PORT"), 8080)?,
            db_path: var("CAMPUS_DB_PATH").unwrap_or_else(|| "campus.sqlite3".to_string()),
            log_level: var("CAMPUS_LOG_LEVEL").unwrap_or_else(|| default_log_level().to_string()),
            log_dir: var("CAMPUS_LOG_DIR"),
            principals_file: var("CAMPUS_PRINCIPALS_FILE").map(PathBuf::from),
            admin_emails: var("ADMIN_EMAILS")
                .map(|raw| split_list(&raw))
                .unwrap_or_default(),
        })
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path == IN_MEMORY_DB
    }

    /// Loads the token directory from `principals_file`; no file means no principals.
    pub fn load_principals(&self) -> Result<PrincipalDirectory, ConfigError> {
        let Some(path) = &self.principals_file else {
            return Ok(PrincipalDirectory::new());
        };

        let raw = read_to_string(path).map_err(|source| ConfigError::ReadPrincipals {
            path: path.clone(),
            source,
        })?;
        let entries: Vec<PrincipalEntry> =
            serde_json::from_str(&raw).map_err(|source| ConfigError::ParsePrincipals {
                path: path.clone(),
                source,
            })?;

        build_directory(entries, &self.admin_emails)
    }
}

/// One provisioned caller in the principals file.
#[derive(Debug, Clone, Deserialize)]
pub struct PrincipalEntry {
    pub token: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

pub fn build_directory(
    entries: Vec<PrincipalEntry>,
    admin_emails: &[String],
) -> Result<PrincipalDirectory, ConfigError> {
    let mut directory = PrincipalDirectory::new();

    for entry in entries {
        let mut admin = is_admin_email(&entry.email, admin_emails);
        for role in &entry.roles {
            let role = parse_role(role).map_err(|source| ConfigError::InvalidRole {
                email: entry.email.clone(),
                source,
            })?;
            admin |= role == Role::Admin;
        }

        directory.register(&entry.token, Principal::new(entry.email, admin))?;
    }

    Ok(directory)
}

fn try_load<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|err: T::Err| ConfigError::InvalidValue {
            key,
            reason: err.to_string(),
            value,
        }),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
