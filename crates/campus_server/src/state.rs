use std::sync::{Arc, Mutex};

use campus_core::{PrincipalDirectory, RecordService, ServiceResult, SqliteRepository, TableRecord};
use rusqlite::Connection;

use crate::{config::Config, error::ApiError};

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    conn: Arc<Mutex<Connection>>,
    principals: Arc<PrincipalDirectory>,
}

impl AppState {
    pub fn new(config: Config, conn: Connection, principals: PrincipalDirectory) -> Self {
        Self {
            config: Arc::new(config),
            conn: Arc::new(Mutex::new(conn)),
            principals: Arc::new(principals),
        }
    }

    pub fn principals(&self) -> &PrincipalDirectory {
        &self.principals
    }

    /// Runs one service call for `R` while holding the store connection.
    pub fn with_service<R, T, F>(&self, f: F) -> Result<T, ApiError>
    where
        R: TableRecord,
        F: for<'c> FnOnce(&RecordService<R, SqliteRepository<'c, R>>) -> ServiceResult<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| ApiError::Internal("record store lock poisoned".to_string()))?;

        let repo = SqliteRepository::<R>::try_new(&conn)
            .map_err(|err| ApiError::Internal(err.to_string()))?;
        let service = RecordService::new(repo);

        Ok(f(&service)?)
    }
}
