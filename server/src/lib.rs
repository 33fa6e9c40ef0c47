//! Grocery Deals Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: axum handlers

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

pub mod commands;
pub mod config;
pub mod domain;
pub mod repository;

pub use config::ServerConfig;

use domain::OwnerId;
use repository::{init_db, DbState, GroceryListRepository, ItemRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_state: DbState,
    pub item_repo: ItemRepository,
    pub list_repo: GroceryListRepository,
    pub default_owner: OwnerId,
}

impl AppState {
    pub fn new(db_state: DbState, default_owner: OwnerId) -> Self {
        Self {
            item_repo: ItemRepository::new(db_state.conn.clone()),
            list_repo: GroceryListRepository::new(db_state.conn.clone()),
            db_state,
            default_owner,
        }
    }
}

/// All routes of the API
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(commands::health))
        .route(
            "/api/grocery-lists",
            get(commands::list_grocery_lists).post(commands::create_grocery_list),
        )
        .route("/api/grocery-lists/:listId", get(commands::get_grocery_list))
        .route(
            "/api/grocery-lists/:listId/add-item",
            post(commands::add_item_to_list),
        )
        .route(
            "/api/items",
            get(commands::list_items).post(commands::create_item),
        )
        .route("/api/items/:itemId", get(commands::get_item))
        .layer(axum::middleware::from_fn(commands::request_tracing_middleware))
        .with_state(state)
}

/// Start the server and block until it exits
///
/// The listener comes up immediately; the database opens in the background
/// and requests answer 503 until it is ready.
pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_file = rolling_logger::init_logger(
        config.log_dir.clone(),
        "grocery-server",
        rolling_logger::LoggerConfig {
            default_directive: config.log_level.clone(),
            ..Default::default()
        },
    )?;

    let default_owner = OwnerId::new(&config.default_owner)?;
    let db_state = DbState::new(config.db_path.clone());
    let state = AppState::new(db_state.clone(), default_owner);

    let db_path = config.db_path.clone();
    tokio::spawn(async move {
        tracing::info!(path = %db_path.display(), "starting DB initialization");
        match init_db(&db_path).await {
            Ok(initialized) => {
                db_state.adopt(initialized).await;
                let _ = rolling_logger::info("Async DB init success");
            }
            Err(e) => {
                let _ = rolling_logger::error(&format!("Async DB init failed: {}", e));
                db_state.record_failure(e).await;
            }
        }
    });

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, log_file = %log_file.display(), "listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
    }
}
