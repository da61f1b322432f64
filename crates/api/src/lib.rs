//! Product & User API Library
//!
//! HTTP service exposing product and user CRUD with bearer-token
//! authentication, backed by PostgreSQL or in-memory stores.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod infra;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod types;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ApiConfig;
use crate::infra::Database;
use crate::routes::create_router;
use crate::state::AppState;

/// Options for the `serve` command.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Overrides `WEB_SERVER_HOST`
    pub host: Option<String>,
    /// Overrides `WEB_SERVER_PORT`
    pub port: Option<u16>,
    /// Use in-memory stores instead of PostgreSQL
    pub in_memory: bool,
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run the HTTP server until it is stopped.
pub async fn run_server(options: ServeOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ApiConfig::from_env()?;
    if let Some(host) = options.host {
        config.server.host = host;
    }
    if let Some(port) = options.port {
        config.server.port = port;
    }

    let state = if options.in_memory {
        info!("Using in-memory storage");
        AppState::in_memory(config.jwt.clone(), config.hash_cost)
    } else {
        let db = Database::connect(&config.database).await?;
        AppState::with_database(db, config.jwt.clone(), config.hash_cost)
    };

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server.addr().parse()?;
    info!("API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env()?;
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}
