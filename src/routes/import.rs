use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::{import, seed, AppState};

/// Upload a spreadsheet and convert it into the seed document
///
/// Accepts a multipart form with one `.xlsx` file. The converted seed
/// document fully overwrites any previous one.
#[utoipa::path(
    post,
    path = "/api/upload-xlsx",
    responses(
        (status = 200, description = "Seed document written"),
        (status = 400, description = "Not an .xlsx upload")
    )
)]
pub async fn upload_xlsx(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut workbook: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidUpload(format!("invalid multipart body: {}", e)))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if !file_name.to_ascii_lowercase().ends_with(".xlsx") {
            return Err(AppError::InvalidUpload(
                "Only .xlsx files are allowed".to_string(),
            ));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidUpload(format!("could not read upload: {}", e)))?;
        workbook = Some(bytes.to_vec());
        break;
    }

    let bytes =
        workbook.ok_or_else(|| AppError::InvalidUpload("no spreadsheet attached".to_string()))?;

    let document = seed::seed_from_xlsx(&bytes)?;
    seed::write_seed(&state.seed_path, &document)?;
    tracing::info!(
        "wrote seed document with {} jobs to {}",
        document.jobs.len(),
        state.seed_path.display()
    );

    Ok(Json(json!({ "ok": true, "imported": document.jobs.len() })))
}

/// Import the persisted seed document into the store
///
/// Wipes and repopulates companies, sections and jobs in one transaction.
/// Concurrent imports are caller responsibility; serialize them.
#[utoipa::path(
    post,
    path = "/api/import-seed",
    responses(
        (status = 200, description = "Store repopulated from the seed document"),
        (status = 404, description = "No seed document has been uploaded"),
        (status = 500, description = "Import failed and was rolled back")
    )
)]
pub async fn import_seed(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let document = seed::read_seed(&state.seed_path)?;
    let summary = import::import_seed(&state.db, &document).await?;
    tracing::info!(
        "seed import complete: {} companies, {} sections, {} jobs",
        summary.companies,
        summary.sections,
        summary.jobs
    );

    Ok(Json(json!({
        "ok": true,
        "message": "Seed imported successfully",
        "imported": summary,
    })))
}
