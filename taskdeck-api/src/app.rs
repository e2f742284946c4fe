/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskdeck_api::{app::AppState, config::Config};
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskdeck_shared::service::{auth::AuthService, tasks::TaskService};
/// use taskdeck_shared::store::postgres::{PgTaskStore, PgUserStore};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     ..Default::default()
/// })
/// .await?;
///
/// let auth = AuthService::new(
///     Arc::new(PgUserStore::new(pool.clone())),
///     config.jwt.secret.clone(),
/// );
/// let tasks = TaskService::new(Arc::new(PgTaskStore::new(pool)));
///
/// let state = AppState::new(auth, tasks, config);
/// let app = taskdeck_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use crate::error::ApiError;
use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use taskdeck_shared::{
    models::user::User,
    service::{auth::AuthService, tasks::TaskService},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses Arc
/// internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Authentication core
    pub auth: Arc<AuthService>,

    /// Task ownership core
    pub tasks: Arc<TaskService>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(auth: AuthService, tasks: TaskService, config: Config) -> Self {
        Self {
            auth: Arc::new(auth),
            tasks: Arc::new(tasks),
            config: Arc::new(config),
        }
    }
}

/// The authenticated identity injected into request extensions
///
/// Handlers behind the bearer-token middleware extract this with Axum's
/// `Extension` extractor.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                   # Health check (public)
/// └── /v1/                      # API v1 (versioned)
///     ├── /auth/                # Authentication endpoints (public)
///     │   ├── POST /signup
///     │   └── POST /signin
///     └── /tasks/               # Task endpoints (bearer token required)
///         ├── POST   /
///         ├── GET    /?status=&search=
///         ├── GET    /:id
///         ├── PATCH  /:id/status
///         └── DELETE /:id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Request tracing (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer, permissive)
/// 3. Authentication (tasks subtree only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/signup", post(routes::auth::sign_up))
        .route("/signin", post(routes::auth::sign_in));

    // Task routes (require a bearer token)
    let task_routes = Router::new()
        .route("/", post(routes::tasks::create_task))
        .route("/", get(routes::tasks::list_tasks))
        .route("/:id", get(routes::tasks::get_task))
        .route("/:id/status", patch(routes::tasks::update_task_status))
        .route("/:id", delete(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/tasks", task_routes);

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer-token authentication middleware
///
/// Extracts the token from the Authorization header, resolves the user
/// through the authentication core (signature, expiry, issuer, and account
/// existence are all checked), and injects [`CurrentUser`] into request
/// extensions.
async fn bearer_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::BadRequest("Expected Bearer token".to_string()))?;

    let user = state.auth.verify(token).await?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
