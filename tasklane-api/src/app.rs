/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tasklane_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = tasklane_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, patch, post},
    Router,
};
use jsonwebtoken::Algorithm;
use sqlx::PgPool;
use std::sync::Arc;
use tasklane_shared::auth::guard;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the signing secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.auth.secret
    }

    /// Gets the configured signing algorithm
    pub fn jwt_algorithm(&self) -> Algorithm {
        self.config.auth.algorithm
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /                               # Welcome message (public)
/// ├── /health                         # Health check (public)
/// └── /api/
///     ├── POST /register              # Create account, returns token
///     ├── POST /login                 # Returns token
///     └── /:user_id/tasks...          # Task CRUD (Bearer auth)
///         ├── GET    /                # List tasks
///         ├── POST   /                # Create task
///         ├── GET    /:id             # Get task
///         ├── PUT    /:id             # Partial update
///         ├── DELETE /:id             # Delete task
///         └── PATCH  /:id/complete    # Set completion flag
/// ```
///
/// # Middleware Stack
///
/// 1. Request tracing (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Bearer authentication on the task routes only
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes (no auth)
    let public_routes = Router::new()
        .route("/", get(routes::health::welcome))
        .route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Task routes (require Bearer authentication)
    let task_routes = Router::new()
        .route(
            "/:user_id/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/:user_id/tasks/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route(
            "/:user_id/tasks/:id/complete",
            patch(routes::tasks::complete_task),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Everything under /api
    let api_routes = Router::new().merge(auth_routes).merge(task_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::PATCH,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer authentication middleware layer
///
/// Runs the first half of the authorization state machine: extract and
/// validate the token, then inject the verified [`guard::Principal`] into
/// request extensions. The per-resource ownership check
/// ([`guard::require_owner`]) runs inside each handler, where the path
/// user id is known.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let principal =
        guard::authenticate(req.headers(), state.jwt_secret(), state.jwt_algorithm())?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
