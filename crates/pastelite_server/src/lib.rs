//! HTTP server wiring for pastelite (API, handlers, and shared state).

/// HTTP error mapping for API handlers.
pub mod error;
/// HTTP handlers for paste and health endpoints.
pub mod handlers;
/// Share-link construction.
pub mod url;

pub use pastelite_core::{
    clock, config, db, models, AppError, Clock, Config, Database, PasteService, PasteStore,
    DEFAULT_PORT,
};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use pastelite_core::{
    deadline::{run_with_deadline, CommitGate},
    SystemClock,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

/// Paste service as held by the server: any store, any clock.
pub type SharedService = PasteService<dyn PasteStore, Arc<dyn Clock>>;

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SharedService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Construct state over an open database and the system clock.
    pub fn new(config: Config, db: Database) -> Self {
        let store: Arc<dyn PasteStore> = Arc::new(db.pastes.clone());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self::with_service(config, PasteService::new(store, clock))
    }

    /// Construct state around a pre-built service (custom store or clock).
    pub fn with_service(config: Config, service: SharedService) -> Self {
        Self {
            service: Arc::new(service),
            config: Arc::new(config),
        }
    }

    /// Run a blocking service call under the configured store deadline.
    ///
    /// Writes made by `op` must go through the supplied gate so that a call
    /// the client already got a 503 for cannot commit afterwards.
    ///
    /// # Errors
    /// The call's own error, or [`AppError::StorageTimeout`] when the deadline
    /// passes first.
    pub async fn call<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&SharedService, &CommitGate) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let service = self.service.clone();
        run_with_deadline(self.config.store_timeout(), move |gate| {
            op(service.as_ref(), gate)
        })
        .await
    }
}

/// Create the application router with all routes and middleware.
///
/// # Arguments
/// - `state`: Shared application state.
/// - `allow_public_access`: Whether to allow cross-origin requests from any origin.
pub fn create_app(state: AppState, allow_public_access: bool) -> Router {
    let cors_port = state.config.port;
    create_app_with_cors_port(state, allow_public_access, cors_port)
}

/// Resolve the listener address from env var overrides and security policy.
///
/// # Returns
/// A validated socket address that enforces loopback when public access is disabled.
pub fn resolve_bind_address(config: &Config, allow_public_access: bool) -> SocketAddr {
    let default_bind = SocketAddr::from(([127, 0, 0, 1], config.port));
    let requested = match std::env::var("BIND") {
        Ok(value) => match value.trim().parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(err) => {
                tracing::warn!(
                    "Invalid BIND='{}': {}. Falling back to {}",
                    value,
                    err,
                    default_bind
                );
                default_bind
            }
        },
        Err(_) => default_bind,
    };

    if allow_public_access || requested.ip().is_loopback() {
        return requested;
    }

    tracing::warn!(
        "Non-loopback bind {} requested without ALLOW_PUBLIC_ACCESS; forcing 127.0.0.1",
        requested
    );
    SocketAddr::from(([127, 0, 0, 1], requested.port()))
}

fn cors_layer(allow_public_access: bool, cors_port: u16) -> CorsLayer {
    let methods = [Method::GET, Method::POST];
    if allow_public_access {
        return CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any);
    }

    let origins: Vec<HeaderValue> = [
        format!("http://localhost:{}", cors_port),
        format!("http://127.0.0.1:{}", cors_port),
    ]
    .iter()
    .filter_map(|origin| HeaderValue::from_str(origin).ok())
    .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

fn create_app_with_cors_port(state: AppState, allow_public_access: bool, cors_port: u16) -> Router {
    let max_body = state.config.max_paste_size;

    Router::new()
        .route("/api/pastes", post(handlers::paste::create_paste))
        .route("/api/pastes/:id", get(handlers::paste::get_paste))
        .route("/api/healthz", get(handlers::health::healthz))
        .route("/p/:id", get(handlers::paste::view_shared_paste))
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(max_body))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors_layer(allow_public_access, cors_port))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                )),
        )
}

fn listener_cors_port(listener: &tokio::net::TcpListener, fallback_port: u16) -> u16 {
    listener
        .local_addr()
        .map(|addr| addr.port())
        .unwrap_or(fallback_port)
}

/// Run the Axum server with graceful shutdown support.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    allow_public_access: bool,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let cors_port = listener_cors_port(&listener, state.config.port);
    let app = create_app_with_cors_port(state, allow_public_access, cors_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}
