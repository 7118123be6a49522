use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::{company, job, section};
use crate::error::AppError;
use crate::AppState;

/// A company together with the content shown on its public careers page:
/// visible sections in display order, and published jobs.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyPage {
    pub company: company::Model,
    pub sections: Vec<section::Model>,
    pub jobs: Vec<job::Model>,
}

/// List all companies
#[utoipa::path(
    get,
    path = "/api/companies",
    responses(
        (status = 200, description = "All companies", body = Vec<company::Model>)
    )
)]
pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<company::Model>>, AppError> {
    Ok(Json(company::Entity::find().all(&state.db).await?))
}

/// Fetch a company by slug for the public careers page
#[utoipa::path(
    get,
    path = "/api/companies/{slug}",
    params(("slug" = String, Path, description = "Company slug")),
    responses(
        (status = 200, description = "Company with visible sections and published jobs", body = CompanyPage),
        (status = 404, description = "Unknown slug")
    )
)]
pub async fn get_company_by_slug(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CompanyPage>, AppError> {
    let found = company::Entity::find()
        .filter(company::Column::Slug.eq(&slug))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    Ok(Json(company_page(&state.db, found).await?))
}

/// Assemble the public-facing page view: only visible sections (ordered by
/// `position`, ties by insertion order) and only published jobs.
pub(crate) async fn company_page(
    db: &DatabaseConnection,
    found: company::Model,
) -> Result<CompanyPage, AppError> {
    let sections = section::Entity::find()
        .filter(section::Column::CompanyId.eq(&found.id))
        .filter(section::Column::IsVisible.eq(true))
        .order_by_asc(section::Column::Position)
        .all(db)
        .await?;

    let jobs = job::Entity::find()
        .filter(job::Column::CompanyId.eq(&found.id))
        .filter(job::Column::Published.eq(true))
        .all(db)
        .await?;

    Ok(CompanyPage {
        company: found,
        sections,
        jobs,
    })
}
