//! Record use-case service shared by every entity controller.
//!
//! # Responsibility
//! - Provide list / get / create / update / delete entry points over a
//!   repository, with uniform not-found handling.
//! - Remain storage-agnostic so HTTP and test callers share one path.
//!
//! # Invariants
//! - `get_by_id`, `update` and `delete` report `NotFound` for missing keys,
//!   never a silent success.
//! - `update` keeps the stored key and overwrites every other field.
//! - A natural-key record without its key is a caller error (`MissingKey`),
//!   not a storage fault.

use crate::model::record::Record;
use crate::repo::record_repo::{RepoError, Repository};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for record use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// No record with this key exists.
    NotFound { entity: &'static str, key: String },
    /// Natural-key record submitted without its key.
    MissingKey(&'static str),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    pub fn not_found<R: Record>(key: &R::Key) -> Self {
        Self::NotFound {
            entity: R::ENTITY_NAME,
            key: key.to_string(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, key } => write!(f, "{entity} with id {key} not found"),
            Self::MissingKey(entity) => write!(f, "{entity} cannot be saved without a key"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NotFound { .. } | Self::MissingKey(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, key } => Self::NotFound { entity, key },
            RepoError::MissingKey(entity) => Self::MissingKey(entity),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service wrapper for one entity's CRUD operations.
pub struct RecordService<R: Record, P: Repository<R>> {
    repo: P,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record, P: Repository<R>> RecordService<R, P> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: P) -> Self {
        Self {
            repo,
            _record: PhantomData,
        }
    }

    /// Returns every stored record in storage order.
    pub fn list_all(&self) -> ServiceResult<Vec<R>> {
        Ok(self.repo.find_all()?)
    }

    pub fn get_by_id(&self, key: &R::Key) -> ServiceResult<R> {
        self.repo
            .find_by_id(key)?
            .ok_or_else(|| ServiceError::not_found::<R>(key))
    }

    /// Persists a newly built record.
    ///
    /// # Contract
    /// - Generated-key records must arrive with key `0`; the stored copy is
    ///   returned with its new key.
    /// - Natural-key records keep the caller's key.
    pub fn create(&self, record: R) -> ServiceResult<R> {
        let saved = self.repo.save(record)?;
        info!(
            "event=record_create module=service status=ok entity={} key={}",
            R::ENTITY_NAME,
            saved.key()
        );
        Ok(saved)
    }

    /// Replaces every mutable field of the record stored under `key`.
    ///
    /// Any key carried by `incoming` is ignored.
    pub fn update(&self, key: &R::Key, incoming: R) -> ServiceResult<R> {
        let mut stored = self.get_by_id(key)?;
        stored.overwrite_from(incoming);

        let saved = self.repo.save(stored)?;
        info!(
            "event=record_update module=service status=ok entity={} key={}",
            R::ENTITY_NAME,
            key
        );
        Ok(saved)
    }

    /// Removes the record stored under `key` and returns a confirmation message.
    pub fn delete(&self, key: &R::Key) -> ServiceResult<String> {
        let stored = self.get_by_id(key)?;
        self.repo.delete(&stored)?;

        info!(
            "event=record_delete module=service status=ok entity={} key={}",
            R::ENTITY_NAME,
            key
        );
        Ok(format!("{} with id {} deleted", R::ENTITY_NAME, key))
    }
}
