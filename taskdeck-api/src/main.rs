//! # taskdeck API Server
//!
//! HTTP server for taskdeck: user registration and sign-in issuing JWTs, and
//! per-user task CRUD with status filtering and free-text search.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/taskdeck \
//! JWT_SECRET=$(openssl rand -hex 32) \
//! cargo run -p taskdeck-api
//! ```

use std::sync::Arc;

use chrono::Duration;
use taskdeck_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskdeck_shared::{
    db::{migrations::run_migrations, pool::create_pool, pool::DatabaseConfig},
    service::{auth::AuthService, tasks::TaskService},
    store::postgres::{PgTaskStore, PgUserStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "taskdeck API server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let auth = AuthService::with_token_ttl(
        Arc::new(PgUserStore::new(pool.clone())),
        config.jwt.secret.clone(),
        Duration::hours(config.jwt.token_ttl_hours),
    );
    let tasks = TaskService::new(Arc::new(PgTaskStore::new(pool)));

    let bind_address = config.bind_address();
    let state = AppState::new(auth, tasks, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
