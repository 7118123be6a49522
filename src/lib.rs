use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::path::PathBuf;
// Conditionally import SwaggerUi only when needed (not test)
#[cfg(not(test))]
use utoipa_swagger_ui::SwaggerUi;
// Conditionally import CORS only when needed (not test)
#[cfg(not(test))]
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

pub mod db;
pub mod entities;
pub mod error;
pub mod import;
pub mod routes;
pub mod seed;
pub mod slug;

/// Shared per-request context: the database handle and the well-known
/// location of the seed document.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub seed_path: PathBuf,
}

impl AppState {
    pub fn new(db: DatabaseConnection, seed_path: impl Into<PathBuf>) -> Self {
        Self {
            db,
            seed_path: seed_path.into(),
        }
    }

    /// Read `SEED_PATH` from the environment, defaulting to `data/seed.json`.
    pub fn from_env(db: DatabaseConnection) -> Self {
        let seed_path =
            std::env::var("SEED_PATH").unwrap_or_else(|_| "data/seed.json".to_string());
        Self::new(db, seed_path)
    }
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok", "time": Utc::now() })))
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Careers Page Builder API",
        version = "0.1.0"
    ),
    paths(
        health_check,
        routes::import::upload_xlsx,
        routes::import::import_seed,
        routes::companies::list_companies,
        routes::companies::get_company_by_slug,
        routes::jobs::list_jobs,
        routes::jobs::get_job,
        routes::admin::update_company,
        routes::admin::add_section,
        routes::admin::update_section,
        routes::admin::delete_section,
        routes::admin::preview_company,
        routes::features::save_features,
        routes::features::get_features
    ),
    components(schemas(
        entities::company::Model,
        entities::section::Model,
        entities::job::Model,
        routes::companies::CompanyPage,
        routes::admin::CompanyUpdate,
        routes::admin::SectionCreate,
        routes::admin::SectionUpdate,
        import::ImportSummary
    ))
)]
struct ApiDoc;

/// Create the application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // Build our API documentation (needed regardless for ApiDoc::openapi())
    let api_doc = ApiDoc::openapi();

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/upload-xlsx", post(routes::import::upload_xlsx))
        .route("/api/import-seed", post(routes::import::import_seed))
        .route("/api/companies", get(routes::companies::list_companies))
        .route("/api/companies/{slug}", get(routes::companies::get_company_by_slug))
        .route("/api/jobs", get(routes::jobs::list_jobs))
        .route("/api/jobs/{id}", get(routes::jobs::get_job))
        .route("/api/company/{id}/update", put(routes::admin::update_company))
        .route("/api/company/{id}/sections", post(routes::admin::add_section))
        .route(
            "/api/section/{id}",
            put(routes::admin::update_section).delete(routes::admin::delete_section),
        )
        .route("/api/company/{id}/preview", get(routes::admin::preview_company))
        .route("/api/save-features", post(routes::features::save_features))
        .route("/api/get-features/{company_id}", get(routes::features::get_features))
        .with_state(state);

    // --- Conditionally mount Swagger UI only when NOT running tests ---
    #[cfg(not(test))]
    let docs_router: Router = SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", api_doc)
        .into();

    #[cfg(test)]
    let docs_router = {
        let _ = api_doc;
        Router::new()
    };

    let mut app = Router::new().merge(api_routes).merge(docs_router);

    // --- Apply CORS to the whole app if needed ---
    #[cfg(not(test))]
    {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app
}
