mod sequence;
mod service_info;

pub use sequence::get_sequence;
pub use service_info::service_info;

use crate::service::QueryService;
use crate::types::Backend;
use axum::{Router, routing::get};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: QueryService,
    pub backend: Backend,
}

/// All routes, with tracing and compression
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/sequence/region/:system/:location", get(get_sequence))
        .route("/", get(service_info))
        .route("/service-info", get(service_info))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// [`create_router`] plus permissive CORS when `cors` is set
pub fn create_app(state: AppState, cors: bool) -> Router {
    let app = create_router(state);
    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
