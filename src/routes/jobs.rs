use axum::{
    extract::{Path, Query, State},
    Json,
};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::entities::job;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JobsQuery {
    /// Case-insensitive substring match on the job title
    pub q: Option<String>,
    /// Exact match on location
    pub location: Option<String>,
    /// Exact match on employment type
    #[serde(rename = "type")]
    pub employment_type: Option<String>,
    /// Exact match on the owning company id
    pub company: Option<String>,
}

/// List jobs with optional filters; filters compose conjunctively
#[utoipa::path(
    get,
    path = "/api/jobs",
    params(JobsQuery),
    responses(
        (status = 200, description = "Matching jobs", body = Vec<job::Model>)
    )
)]
pub async fn list_jobs(
    Query(query): Query<JobsQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<job::Model>>, AppError> {
    let mut select = job::Entity::find();

    if let Some(q) = query.q.filter(|s| !s.is_empty()) {
        // lower() on both sides keeps the match case-insensitive on SQLite
        // and Postgres alike.
        select = select.filter(
            Expr::expr(Func::lower(Expr::col((job::Entity, job::Column::Title))))
                .like(format!("%{}%", q.to_lowercase())),
        );
    }
    if let Some(location) = query.location.filter(|s| !s.is_empty()) {
        select = select.filter(job::Column::Location.eq(location));
    }
    if let Some(employment_type) = query.employment_type.filter(|s| !s.is_empty()) {
        select = select.filter(job::Column::Type.eq(employment_type));
    }
    if let Some(company) = query.company.filter(|s| !s.is_empty()) {
        select = select.filter(job::Column::CompanyId.eq(company));
    }

    Ok(Json(select.all(&state.db).await?))
}

/// Fetch a single job by id
#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(("id" = String, Path, description = "Job id")),
    responses(
        (status = 200, description = "The job", body = job::Model),
        (status = 404, description = "Unknown job id")
    )
)]
pub async fn get_job(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<job::Model>, AppError> {
    let found = job::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    Ok(Json(found))
}
