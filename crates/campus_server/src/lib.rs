//! HTTP surface of the campus records service.
//!
//! Six record types share one controller shape:
//! - `GET /api/<path>/all` and `GET /api/<path>?<key>=` for any signed-in user
//! - `POST /api/<path>/post`, `PUT /api/<path>?<key>=` and
//!   `DELETE /api/<path>?<key>=` for admins
//!
//! Callers authenticate with `Authorization: Bearer <token>`; tokens are
//! provisioned through `CAMPUS_PRINCIPALS_FILE`.

use axum::{middleware::from_fn, routing::get, Router};
use campus_core::db::{open_db, open_db_in_memory};
use campus_core::{
    init_logging, Article, HelpRequest, MenuItemReview, RecommendationRequest,
    UcsbDiningCommonsMenuItem, UcsbOrganization,
};
use log::{error, info};
use rusqlite::Connection;
use tokio::{net::TcpListener, signal::ctrl_c};

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use config::Config;
use error::StartupError;
use routes::{healthz, resource_routes, version};
use state::AppState;

/// Builds the full router over `state`.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/version", get(version));

    let router = resource_routes::<Article>(router);
    let router = resource_routes::<HelpRequest>(router);
    let router = resource_routes::<MenuItemReview>(router);
    let router = resource_routes::<RecommendationRequest>(router);
    let router = resource_routes::<UcsbOrganization>(router);
    let router = resource_routes::<UcsbDiningCommonsMenuItem>(router);

    router.layer(from_fn(middleware::log_requests)).with_state(state)
}

pub async fn start_server() -> Result<(), StartupError> {
    let config = Config::load()?;
    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(StartupError::Logging)?;

    info!(
        "event=server_init module=server status=start port={} db_path={} admins={}",
        config.port,
        config.db_path,
        config.admin_emails.len()
    );

    let principals = config.load_principals()?;
    info!(
        "event=principals_load module=server status=ok count={}",
        principals.len()
    );

    let conn = open_store(&config)?;
    let state = AppState::new(config, conn, principals);

    let address = format!("0.0.0.0:{}", state.config.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;
    info!("event=server_listen module=server status=ok address={address}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

fn open_store(config: &Config) -> Result<Connection, StartupError> {
    let conn = if config.is_in_memory() {
        open_db_in_memory()?
    } else {
        open_db(&config.db_path)?
    };
    Ok(conn)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = ctrl_c().await {
            error!("event=signal_install module=server status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
        info!("event=shutdown module=server status=start signal=ctrl_c");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("event=shutdown module=server status=start signal=terminate");
            }
            Err(err) => {
                error!("event=signal_install module=server status=error signal=terminate error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
