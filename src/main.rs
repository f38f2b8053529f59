use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use auth_api::{
    auth::{AuthService, PasswordService, PgUserStore, TokenService},
    config::Config,
    create_router, db, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("auth_api=info,tower_http=info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Auth API - Starting...");

    let config = Config::from_env().context("Invalid configuration")?;
    tracing::debug!("Loaded {:?}", config);

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to create database pool")?;

    db::run_migrations(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    // Explicit wiring: store -> hashing/tokens -> service -> router
    let auth_service = AuthService::new(
        Arc::new(PgUserStore::new(db_pool)),
        PasswordService::new(),
        TokenService::new(&config.jwt_secret),
    );
    let state = AppState {
        auth_service: Arc::new(auth_service),
    };

    if !config.users_list_requires_auth {
        tracing::warn!("GET /auth/users is open to unauthenticated callers");
    }
    let app = create_router(state, config.users_list_requires_auth);

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Auth API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
