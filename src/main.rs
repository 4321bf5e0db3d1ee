//! Coffee Lab Menu Backend
//!
//! REST backend for the café menu, served from SQLite or from process memory.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod query;
mod store;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::{CredentialVerifier, StaticCredentials};
use config::Config;
use store::{ItemStore, OfferBoard};

/// Maximum request body size; item images arrive as data URIs.
const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    pub offers: Arc<OfferBoard>,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub config: Arc<Config>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>, config: Config) -> Self {
        let verifier = Arc::new(StaticCredentials::new(
            config.admin_username.clone(),
            config.admin_password.clone(),
        ));

        Self {
            store,
            offers: Arc::new(OfferBoard::new()),
            verifier,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Coffee Lab Menu Backend");
    tracing::info!("Environment: {}", config.environment.as_str());
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.uses_default_credentials() {
        tracing::warn!(
            "Admin credentials are the built-in defaults (set MENU_ADMIN_USERNAME / MENU_ADMIN_PASSWORD)"
        );
    }

    // Initialize storage
    let store = store::open_store(&config).await?;
    match store.mode() {
        store::StoreMode::Database => tracing::info!("Using SQLite database storage"),
        store::StoreMode::Memory => {
            tracing::warn!("MENU_DATABASE_URL not set, using in-memory storage")
        }
    }

    if config.seed {
        store::seed_menu(store.as_ref()).await?;
    }

    // Create application state
    let bind_addr = config.bind_addr;
    let state = AppState::new(store, config);

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Clone verifier for the auth layer
    let verifier = state.verifier.clone();

    // Public routes
    let public_routes = Router::new()
        .route("/menu-items", get(api::list_menu_items))
        .route("/menu-items/category/{category}", get(api::list_by_category))
        .route("/menu-items/search", get(api::search_menu_items))
        .route("/special-offer", get(api::get_special_offer))
        .route("/health", get(api::health_check));

    // Admin routes behind Basic auth
    let admin_routes = Router::new()
        .route("/menu-items/stats", get(api::get_stats))
        .route("/menu-items", post(api::create_menu_item))
        .route("/menu-items/{id}", delete(api::delete_menu_item))
        .route("/special-offer", put(api::update_special_offer))
        .route_layer(middleware::from_fn(move |req, next| {
            auth::basic_auth_layer(verifier.clone(), req, next)
        }));

    // Wrong methods on a known path answer 404 before any credential check
    let api_routes = public_routes
        .merge(admin_routes)
        .method_not_allowed_fallback(api::route_not_found);

    let routes = Router::new()
        .route("/", get(api::service_index))
        .route("/api-docs", get(api::api_docs))
        .nest("/api", api_routes);

    with_service_layers(routes, state)
}

/// Attach the JSON fallbacks and the middleware stack shared by every route.
fn with_service_layers(routes: Router<AppState>, state: AppState) -> Router {
    let expose_internal = !state.config.is_production();
    let cors = cors_layer(&state.config);

    routes
        .fallback(api::route_not_found)
        .method_not_allowed_fallback(api::route_not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn std::any::Any + Send + 'static>| {
                api::panic_response(panic, expose_internal)
            },
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Permissive CORS in development, an origin allow-list in production.
fn cors_layer(config: &Config) -> CorsLayer {
    if !config.is_production() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid allowed origin {:?}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::warn!("No MENU_ALLOWED_ORIGINS configured; cross-origin requests will be refused");
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
