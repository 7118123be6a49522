use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};
use serde_json::{json, Value};

use crate::entities::feature_settings;
use crate::error::AppError;
use crate::AppState;

/// Save per-company feature settings
///
/// Deliberately lenient: a malformed body is treated as an empty payload
/// rather than rejected, and the endpoint always answers 200. The payload is
/// only persisted when it carries a `company_id`.
#[utoipa::path(
    post,
    path = "/api/save-features",
    request_body = Value,
    responses(
        (status = 200, description = "Settings accepted")
    )
)]
pub async fn save_features(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let data: Value = serde_json::from_slice(&body).unwrap_or_else(|err| {
        tracing::warn!("ignoring malformed feature-settings body: {}", err);
        json!({})
    });

    if let Some(company_id) = data.get("company_id").and_then(Value::as_str) {
        let row = feature_settings::ActiveModel {
            company_id: Set(company_id.to_string()),
            data: Set(data.to_string()),
            updated_at: Set(Utc::now()),
        };
        feature_settings::Entity::insert(row)
            .on_conflict(
                OnConflict::column(feature_settings::Column::CompanyId)
                    .update_columns([
                        feature_settings::Column::Data,
                        feature_settings::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&state.db)
            .await?;
    }

    Ok(Json(json!({ "ok": true, "message": "Features saved", "data": data })))
}

/// Fetch stored feature settings for a company
#[utoipa::path(
    get,
    path = "/api/get-features/{company_id}",
    params(("company_id" = String, Path, description = "Company id")),
    responses(
        (status = 200, description = "Stored settings object"),
        (status = 404, description = "No settings stored for this company")
    )
)]
pub async fn get_features(
    Path(company_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let row = feature_settings::Entity::find_by_id(&company_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Settings not found".to_string()))?;

    Ok(Json(serde_json::from_str(&row.data)?))
}
