use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::posts::repository::PostRepository;
use service::posts::PostService;
use service::errors::ServiceError;

use crate::envelope::normalize_response;
use crate::errors::ApiError;
use crate::openapi::ApiDoc;

pub mod posts;

#[derive(Clone)]
pub struct ServerState {
    pub posts: Arc<PostService<dyn PostRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { posts: Arc::new(PostService::new(repo)) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn not_found() -> ApiError {
    ApiError(ServiceError::not_found("resource"))
}

/// Build the application router: enveloped API routes plus the OpenAPI document.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/posts", get(posts::list).post(posts::create))
        .route("/posts/published", get(posts::list_published))
        .route("/posts/slug/:slug", get(posts::get_by_slug))
        .route("/posts/:id", get(posts::get).patch(posts::update).delete(posts::remove))
        .route("/posts/:id/publish", patch(posts::publish))
        .route("/posts/:id/unpublish", patch(posts::unpublish))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(normalize_response));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
