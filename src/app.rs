use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::SessionAuthenticator;
use crate::config::AppConfig;
use crate::database::DocumentStore;
use crate::handlers;
use crate::middleware::session_middleware;
use crate::services::DocumentService;

/// Shared per-process handles; every field is cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub documents: DocumentService,
    pub store: Arc<dyn DocumentStore>,
    pub authenticator: Arc<dyn SessionAuthenticator>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, authenticator: Arc<dyn SessionAuthenticator>) -> Self {
        Self {
            documents: DocumentService::new(store.clone()),
            store,
            authenticator,
        }
    }
}

/// Full router with global middleware applied per configuration
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = routes(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

/// Routes without the optional global layers
pub fn routes(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        // Session-scoped
        .merge(document_routes(state.clone()))
        .with_state(state)
}

fn document_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::documents;

    Router::new()
        .route(
            "/documents/:id",
            get(documents::document_get).delete(documents::document_delete),
        )
        .route_layer(from_fn_with_state(state, session_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
}
