use careers_api::{create_app, db, AppState};
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load .env (if present) so DATABASE_URL from file is visible
    let _ = dotenv();

    let conn = db::connect().await.expect("failed to connect to database");
    Migrator::up(&conn, None)
        .await
        .expect("failed to run migrations");

    // Run our server
    let app = create_app(AppState::from_env(conn));
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await.unwrap();
}
