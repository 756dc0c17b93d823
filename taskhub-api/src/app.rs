/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskhub_shared::auth::{jwt, middleware::AuthUser};
use taskhub_shared::cache::KeyValueCache;
use taskhub_shared::services::{TagService, TaskService};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; the
/// services inside hold their pool and cache handles by injection, so
/// cloning is cheap and there is no process-global store or cache.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Task service (authorization-scoped CRUD + caching)
    pub tasks: TaskService,

    /// Tag service
    pub tags: TagService,
}

impl AppState {
    /// Creates new application state over injected capabilities
    pub fn new(db: PgPool, cache: Arc<dyn KeyValueCache>, config: Config) -> Self {
        let tasks = TaskService::new(db.clone(), cache);
        let tags = TagService::new(db.clone());

        Self {
            db,
            config: Arc::new(config),
            tasks,
            tags,
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                                # Health check (public)
/// ├── /users/                                # Account endpoints (public)
/// │   ├── POST /signup
/// │   └── POST /login
/// └── /tasks/                                # Task endpoints (bearer auth)
///     ├── POST   /create
///     ├── GET    /user
///     ├── GET    /:id
///     ├── POST   /:id/update
///     ├── DELETE /:id
///     ├── POST   /:id/assign
///     ├── POST   /tag
///     ├── GET    /:id/tags
///     ├── POST   /:id/tags
///     ├── DELETE /:id/tags/:tag_id
///     ├── DELETE /tags/:id
///     ├── GET    /filter/:status
///     ├── GET    /sort/:field/:order
///     └── GET    /filter/:status/sort/:field/:order
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Account routes (public, no auth required)
    let user_routes = Router::new()
        .route("/signup", post(routes::users::signup))
        .route("/login", post(routes::users::login));

    // Task and tag routes (require bearer authentication)
    let task_routes = Router::new()
        .route("/create", post(routes::tasks::create_task))
        .route("/user", get(routes::tasks::get_user_tasks))
        .route("/tag", post(routes::tags::create_tag))
        .route("/tags/:id", delete(routes::tags::remove_tag))
        .route("/filter/:status", get(routes::tasks::filter_tasks))
        .route("/sort/:field/:order", get(routes::tasks::sort_tasks))
        .route(
            "/filter/:status/sort/:field/:order",
            get(routes::tasks::filter_and_sort_tasks),
        )
        .route(
            "/:id",
            get(routes::tasks::get_task).delete(routes::tasks::delete_task),
        )
        .route("/:id/update", post(routes::tasks::update_task))
        .route("/:id/assign", post(routes::tasks::assign_task))
        .route(
            "/:id/tags",
            get(routes::tags::get_task_tags).post(routes::tags::add_tag_to_task),
        )
        .route(
            "/:id/tags/:tag_id",
            delete(routes::tags::remove_tag_from_task),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // CORS: allow configured headers/methods for browser clients
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .merge(health_routes)
        .nest("/users", user_routes)
        .nest("/tasks", task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Extracts and validates the bearer token from the Authorization
/// header, then injects `AuthUser` into request extensions.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| crate::error::ApiError::Unauthorized("No token provided".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        crate::error::ApiError::BadRequest("Expected Bearer token".to_string())
    })?;

    let claims = jwt::validate_token(token, state.jwt_secret())?;

    let auth_user = AuthUser::from_claims(claims.id);
    req.extensions_mut().insert(auth_user);

    Ok(next.run(req).await)
}
