use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{company, section};
use crate::error::AppError;
use crate::routes::companies::{company_page, CompanyPage};
use crate::AppState;

/// Partial update of a company's editable fields. Unknown fields and nulls
/// are ignored; anything outside this set (id, slug, website) is not
/// mutable through the admin API.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub banner_url: Option<String>,
    pub video_url: Option<String>,
    pub theme_color: Option<String>,
    pub description: Option<String>,
}

/// Partially update a company
#[utoipa::path(
    put,
    path = "/api/company/{id}/update",
    params(("id" = String, Path, description = "Company id")),
    request_body = CompanyUpdate,
    responses(
        (status = 200, description = "Updated company"),
        (status = 404, description = "Unknown company id")
    )
)]
pub async fn update_company(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(update): Json<CompanyUpdate>,
) -> Result<Json<Value>, AppError> {
    let found = company::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    let mut active: company::ActiveModel = found.clone().into();
    if let Some(name) = update.name {
        active.name = Set(name);
    }
    if let Some(logo) = update.logo {
        active.logo = Set(Some(logo));
    }
    if let Some(banner_url) = update.banner_url {
        active.banner_url = Set(Some(banner_url));
    }
    if let Some(video_url) = update.video_url {
        active.video_url = Set(Some(video_url));
    }
    if let Some(theme_color) = update.theme_color {
        active.theme_color = Set(theme_color);
    }
    if let Some(description) = update.description {
        active.description = Set(Some(description));
    }

    let updated = if active.is_changed() {
        active.update(&state.db).await?
    } else {
        found
    };

    Ok(Json(json!({ "ok": true, "company": updated })))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SectionCreate {
    #[serde(default, rename = "type")]
    pub section_type: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default = "default_position")]
    pub position: i32,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_position() -> i32 {
    1
}

fn default_visible() -> bool {
    true
}

/// Create a section under a company
#[utoipa::path(
    post,
    path = "/api/company/{id}/sections",
    params(("id" = String, Path, description = "Company id")),
    request_body = SectionCreate,
    responses(
        (status = 200, description = "Created section"),
        (status = 404, description = "Unknown company id")
    )
)]
pub async fn add_section(
    Path(company_id): Path<String>,
    State(state): State<AppState>,
    Json(create): Json<SectionCreate>,
) -> Result<Json<Value>, AppError> {
    company::Entity::find_by_id(&company_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    let created = section::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        company_id: Set(company_id),
        r#type: Set(create.section_type),
        title: Set(create.title),
        content: Set(create.content),
        position: Set(create.position),
        is_visible: Set(create.is_visible),
    }
    .insert(&state.db)
    .await?;

    Ok(Json(json!({ "ok": true, "section": created })))
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SectionUpdate {
    #[serde(default, rename = "type")]
    pub section_type: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub position: Option<i32>,
    pub is_visible: Option<bool>,
}

/// Partially update a section
#[utoipa::path(
    put,
    path = "/api/section/{id}",
    params(("id" = String, Path, description = "Section id")),
    request_body = SectionUpdate,
    responses(
        (status = 200, description = "Updated section"),
        (status = 404, description = "Unknown section id")
    )
)]
pub async fn update_section(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(update): Json<SectionUpdate>,
) -> Result<Json<Value>, AppError> {
    let found = section::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Section not found".to_string()))?;

    let mut active: section::ActiveModel = found.clone().into();
    if let Some(section_type) = update.section_type {
        active.r#type = Set(Some(section_type));
    }
    if let Some(title) = update.title {
        active.title = Set(title);
    }
    if let Some(content) = update.content {
        active.content = Set(Some(content));
    }
    if let Some(position) = update.position {
        active.position = Set(position);
    }
    if let Some(is_visible) = update.is_visible {
        active.is_visible = Set(is_visible);
    }

    let updated = if active.is_changed() {
        active.update(&state.db).await?
    } else {
        found
    };

    Ok(Json(json!({ "ok": true, "section": updated })))
}

/// Delete a section
#[utoipa::path(
    delete,
    path = "/api/section/{id}",
    params(("id" = String, Path, description = "Section id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Unknown section id")
    )
)]
pub async fn delete_section(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let found = section::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Section not found".to_string()))?;

    section::Entity::delete_by_id(&found.id)
        .exec(&state.db)
        .await?;

    Ok(Json(json!({ "ok": true, "deleted": found.id })))
}

/// Admin preview of the public careers page for a company
#[utoipa::path(
    get,
    path = "/api/company/{id}/preview",
    params(("id" = String, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company with visible sections and published jobs", body = CompanyPage),
        (status = 404, description = "Unknown company id")
    )
)]
pub async fn preview_company(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CompanyPage>, AppError> {
    let found = company::Entity::find_by_id(&id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    Ok(Json(company_page(&state.db, found).await?))
}
