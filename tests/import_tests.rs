use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use careers_api::entities::{company, job, section};
use careers_api::{create_app, AppState};
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use rust_xlsxwriter::Workbook;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use tower::ServiceExt;

async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn seed_path() -> PathBuf {
    std::env::temp_dir().join(format!("careers-seed-{}.json", uuid::Uuid::new_v4()))
}

async fn test_app() -> (Router, DatabaseConnection, PathBuf) {
    let db = test_db().await;
    let path = seed_path();
    let app = create_app(AppState::new(db.clone(), path.clone()));
    (app, db, path)
}

/// Build a small workbook with a header row and one row per job.
fn workbook_bytes(rows: &[(&str, &str)]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "title").unwrap();
    sheet.write_string(0, 1, "location").unwrap();
    for (i, (title, location)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, *title).unwrap();
        sheet.write_string(row, 1, *location).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

fn multipart_request(file_name: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "careers-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        b"Content-Type: application/vnd.openxmlformats-officedocument.spreadsheetml.sheet\r\n\r\n",
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/upload-xlsx")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

async fn post(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    response_json(response).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    response_json(response).await
}

#[tokio::test]
async fn test_upload_then_import_roundtrip() {
    let (app, db, path) = test_app().await;

    let xlsx = workbook_bytes(&[("Engineer", "Remote"), ("Engineer", "NYC")]);
    let (status, body) = response_json(
        app.clone().oneshot(multipart_request("jobs.xlsx", &xlsx)).await.unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["imported"], 2);
    assert!(path.exists());

    let (status, body) = post(&app, "/api/import-seed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["imported"]["companies"], 1);
    assert_eq!(body["imported"]["sections"], 1);
    assert_eq!(body["imported"]["jobs"], 2);

    let (_, companies) = get(&app, "/api/companies").await;
    assert_eq!(companies.as_array().unwrap().len(), 1);
    assert_eq!(companies[0]["slug"], "imported-company-co1");

    // Identical titles still end up with distinct slugs.
    let jobs = job::Entity::find().all(&db).await.unwrap();
    assert_eq!(jobs.len(), 2);
    assert_ne!(jobs[0].slug, jobs[1].slug);
    assert!(jobs[0].slug.starts_with("engineer-"));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_upload_rejects_non_xlsx() {
    let (app, _db, _path) = test_app().await;

    let (status, body) = response_json(
        app.clone()
            .oneshot(multipart_request("jobs.csv", b"title,location\nEngineer,Remote"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_import_without_seed_is_404() {
    let (app, _db, _path) = test_app().await;

    let (status, _) = post(&app, "/api/import-seed").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_import_resolves_company_slug_references() {
    let (app, db, path) = test_app().await;

    let seed = json!({
        "companies": [{ "id": "co_9", "slug": "acme", "name": "Acme" }],
        "sections": [{ "company_id": "acme", "title": "About Acme" }],
        "jobs": [{ "company_id": "acme", "title": "Engineer" }]
    });
    std::fs::write(&path, seed.to_string()).unwrap();

    let (status, _) = post(&app, "/api/import-seed").await;
    assert_eq!(status, StatusCode::OK);

    // A company_id holding a known slug is a soft reference to the real id.
    let sections = section::Entity::find().all(&db).await.unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].company_id, "co_9");

    let jobs = job::Entity::find().all(&db).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].company_id, "co_9");
    // No slug supplied, so one was generated from the title.
    assert!(jobs[0].slug.starts_with("engineer-"));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_reimport_is_idempotent() {
    let (app, db, path) = test_app().await;

    let seed = json!({
        "companies": [{ "id": "co_1", "slug": "acme", "name": "Acme" }],
        "sections": [{ "id": "sec_1", "company_id": "acme", "title": "About" }],
        "jobs": [
            { "id": "job_1", "company_id": "acme", "title": "Engineer", "slug": "engineer-aaaaaa" },
            { "id": "job_2", "company_id": "acme", "title": "Engineer", "slug": "engineer-bbbbbb" }
        ]
    });
    std::fs::write(&path, seed.to_string()).unwrap();

    let (status, _) = post(&app, "/api/import-seed").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post(&app, "/api/import-seed").await;
    assert_eq!(status, StatusCode::OK);

    // No duplication, and supplied job slugs survive re-import unchanged.
    assert_eq!(company::Entity::find().all(&db).await.unwrap().len(), 1);
    assert_eq!(section::Entity::find().all(&db).await.unwrap().len(), 1);
    let mut slugs: Vec<String> = job::Entity::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|j| j.slug)
        .collect();
    slugs.sort();
    assert_eq!(slugs, vec!["engineer-aaaaaa", "engineer-bbbbbb"]);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_duplicate_supplied_job_slugs_are_regenerated() {
    let (app, db, path) = test_app().await;

    let seed = json!({
        "companies": [{ "id": "co_1", "slug": "acme", "name": "Acme" }],
        "jobs": [
            { "id": "job_1", "company_id": "acme", "title": "Engineer", "slug": "engineer" },
            { "id": "job_2", "company_id": "acme", "title": "Engineer", "slug": "engineer" }
        ]
    });
    std::fs::write(&path, seed.to_string()).unwrap();

    let (status, _) = post(&app, "/api/import-seed").await;
    assert_eq!(status, StatusCode::OK);

    let jobs = job::Entity::find().all(&db).await.unwrap();
    assert_eq!(jobs.len(), 2);
    assert_ne!(jobs[0].slug, jobs[1].slug);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_failed_import_rolls_back() {
    let (app, db, path) = test_app().await;

    // Pre-existing content that a failed import must not destroy.
    company::ActiveModel {
        id: Set("co_old".to_string()),
        name: Set("Old Co".to_string()),
        slug: Set("old-co".to_string()),
        website: Set(None),
        logo: Set(None),
        banner_url: Set(None),
        video_url: Set(None),
        description: Set(None),
        theme_color: Set("#0a66c2".to_string()),
    }
    .insert(&db)
    .await
    .unwrap();

    // Two companies sharing a slug violate the unique constraint mid-insert.
    let seed = json!({
        "companies": [
            { "id": "co_1", "slug": "acme", "name": "Acme" },
            { "id": "co_2", "slug": "acme", "name": "Acme Again" }
        ]
    });
    std::fs::write(&path, seed.to_string()).unwrap();

    let (status, body) = post(&app, "/api/import-seed").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Import failed"));

    // The wipe was rolled back along with the partial insert.
    let companies = company::Entity::find().all(&db).await.unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].id, "co_old");

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_company_delete_cascades() {
    let (_app, db, _path) = test_app().await;

    company::ActiveModel {
        id: Set("co_1".to_string()),
        name: Set("Acme".to_string()),
        slug: Set("acme".to_string()),
        website: Set(None),
        logo: Set(None),
        banner_url: Set(None),
        video_url: Set(None),
        description: Set(None),
        theme_color: Set("#0a66c2".to_string()),
    }
    .insert(&db)
    .await
    .unwrap();
    section::ActiveModel {
        id: Set("sec_1".to_string()),
        company_id: Set("co_1".to_string()),
        r#type: Set(Some("about".to_string())),
        title: Set("About".to_string()),
        content: Set(None),
        position: Set(1),
        is_visible: Set(true),
    }
    .insert(&db)
    .await
    .unwrap();
    job::ActiveModel {
        id: Set("job_1".to_string()),
        slug: Set("engineer-abc123".to_string()),
        title: Set("Engineer".to_string()),
        location: Set(None),
        r#type: Set(None),
        description: Set(None),
        apply_url: Set(None),
        posted_at: Set(Utc::now()),
        published: Set(true),
        company_id: Set("co_1".to_string()),
    }
    .insert(&db)
    .await
    .unwrap();

    // Deleting a section removes only that section.
    section::Entity::delete_by_id("sec_1").exec(&db).await.unwrap();
    assert_eq!(job::Entity::find().all(&db).await.unwrap().len(), 1);

    // Deleting the company cascades to its jobs.
    company::Entity::delete_by_id("co_1").exec(&db).await.unwrap();
    assert_eq!(
        job::Entity::find()
            .filter(job::Column::CompanyId.eq("co_1"))
            .all(&db)
            .await
            .unwrap()
            .len(),
        0
    );
}
