//! Stitchtrack - Knitting Pattern & Project Tracker Backend

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::{env, sync::Arc};
use stitchtrack_backend::auth::JwtHandler;
use stitchtrack_backend::patterns::PatternStore;
use stitchtrack_backend::projects::ProjectStore;
use stitchtrack_backend::users::UserStore;
use stitchtrack_backend::{build_router, server::cors_layer, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();

    info!("🧶 Stitchtrack backend starting");

    let db_path = resolve_data_path(env::var("DATABASE_PATH").ok(), "stitchtrack.db");
    let jwt_secret = env::var("JWT_SECRET")
        .unwrap_or_else(|_| "dev-secret-change-in-production-minimum-32-characters".to_string());
    let jwt_expiry_days = env::var("JWT_EXPIRY_DAYS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(7);

    let user_store = Arc::new(UserStore::new(&db_path)?);
    let pattern_store = Arc::new(PatternStore::new(&db_path)?);
    let project_store = Arc::new(ProjectStore::new(&db_path)?);
    let jwt_handler = Arc::new(JwtHandler::with_expiry_days(jwt_secret, jwt_expiry_days));

    info!("📊 Database initialized at: {}", db_path);

    let state = AppState {
        user_store,
        pattern_store,
        project_store,
        jwt_handler,
    };

    let app = build_router(state).layer(cors_layer());

    let port = env::var("PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stitchtrack_backend=debug,stitchtrack=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn resolve_data_path(env_value: Option<String>, default_filename: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Some(raw) = env_value.filter(|v| !v.trim().is_empty()) else {
        return base.join(default_filename).to_string_lossy().to_string();
    };

    let p = PathBuf::from(raw);
    if p.is_absolute() {
        return p.to_string_lossy().to_string();
    }

    // Treat relative paths as relative to the crate root, not the caller's cwd.
    base.join(p).to_string_lossy().to_string()
}

fn load_env() {
    // Standard dotenv search (cwd + parents)
    let _ = dotenv::dotenv();

    // Also try the crate-root .env when running with --manifest-path from elsewhere
    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}
