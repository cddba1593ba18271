//! # api-adapters
//!
//! The HTTP surface of Rusty-Posts. Handlers only translate between wire
//! payloads and service calls; every rule lives in `services`.
//!
//! | Route                | Auth   | Handler                        |
//! |----------------------|--------|--------------------------------|
//! | `GET  /health`       | none   | [`handlers::health::health`]   |
//! | `POST /auth/register`| none   | [`handlers::auth::register`]   |
//! | `POST /auth/login`   | none   | [`handlers::auth::login`]      |
//! | `GET  /posts`        | none   | [`handlers::posts::list_posts`]|
//! | `POST /posts`        | bearer | [`handlers::posts::create_post`]|

pub mod dto;

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod extractors;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod middleware;
#[cfg(feature = "web-axum")]
pub mod state;

#[cfg(feature = "web-axum")]
pub use error::ApiError;
#[cfg(feature = "web-axum")]
pub use state::AppState;

#[cfg(feature = "web-axum")]
use axum::{
    routing::{get, post},
    Router,
};

/// Assembles the full application router.
///
/// The binary mounts this at `/`; tests drive it directly with `oneshot`.
#[cfg(feature = "web-axum")]
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route(
            "/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .with_state(state);

    middleware::standard_middleware(router)
}
