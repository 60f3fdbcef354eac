pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::document_service::DocumentService;
use crate::services::storage::StorageService;
use axum::{
    Router,
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::auth::me,
        api::handlers::auth::logout,
        api::handlers::documents::upload::upload_document,
        api::handlers::documents::list::list_documents,
        api::handlers::documents::list::my_documents,
        api::handlers::documents::manage::get_document,
        api::handlers::documents::manage::delete_document,
        api::handlers::documents::download::record_download,
        api::handlers::metadata::list_universities,
        api::handlers::metadata::list_faculties,
        api::handlers::metadata::list_majors,
        api::handlers::metadata::list_courses,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::MessageResponse,
            api::handlers::auth::RegisterRequest,
            api::handlers::auth::LoginRequest,
            api::handlers::auth::AuthResponse,
            api::handlers::auth::UserResponse,
            api::handlers::documents::DocumentResponse,
            api::handlers::documents::DocumentSummaryResponse,
            api::handlers::documents::DocumentDetailResponse,
            api::handlers::documents::OwnedDocumentResponse,
            api::handlers::documents::Pagination,
            api::handlers::documents::DocumentListResponse,
            api::handlers::documents::MyDocumentsResponse,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "documents", description = "Document catalog endpoints"),
        (name = "metadata", description = "University hierarchy endpoints"),
        (name = "system", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: Arc<dyn StorageService>,
    pub documents: Arc<DocumentService>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/api/auth/register", post(api::handlers::auth::register))
        .route("/api/auth/login", post(api::handlers::auth::login))
        .route(
            "/api/auth/me",
            get(api::handlers::auth::me).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/api/auth/logout",
            post(api::handlers::auth::logout).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/api/documents",
            get(api::handlers::documents::list_documents),
        )
        .route(
            "/api/documents",
            post(api::handlers::documents::upload_document)
                .layer(axum::extract::DefaultBodyLimit::max(
                    state.config.max_file_size + 1024 * 1024, // multipart overhead
                ))
                .layer(from_fn_with_state(
                    state.clone(),
                    api::middleware::auth::auth_middleware,
                )),
        )
        .route(
            "/api/documents/my/uploads",
            get(api::handlers::documents::my_documents).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/api/documents/:id",
            get(api::handlers::documents::get_document),
        )
        .route(
            "/api/documents/:id",
            delete(api::handlers::documents::delete_document).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/api/documents/:id/download",
            post(api::handlers::documents::record_download).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/api/metadata/universities",
            get(api::handlers::metadata::list_universities),
        )
        .route(
            "/api/metadata/faculties",
            get(api::handlers::metadata::list_faculties),
        )
        .route(
            "/api/metadata/majors",
            get(api::handlers::metadata::list_majors),
        )
        .route(
            "/api/metadata/courses",
            get(api::handlers::metadata::list_courses),
        )
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .layer(from_fn(api::middleware::metrics::metrics_middleware))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
