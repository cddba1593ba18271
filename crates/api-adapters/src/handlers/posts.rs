use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use domains::{PageRequest, Paginated, PostSummary};

use crate::dto::{CreatePostRequest, CreatePostResponse, ListPostsQuery};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `POST /posts` — the author is always the authenticated caller.
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePostResponse>), ApiError> {
    let Json(request) = payload?;
    let post = state.posts.create(&request.content, &caller).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            message: "Post created successfully".to_string(),
            post,
        }),
    ))
}

/// `GET /posts?page=&limit=` — public feed, newest first.
pub async fn list_posts(
    State(state): State<AppState>,
    query: Result<Query<ListPostsQuery>, QueryRejection>,
) -> Result<Json<Paginated<PostSummary>>, ApiError> {
    let Query(query) = query?;
    let request = PageRequest::new(query.page, query.limit)?;
    let page = state.posts.list(request).await?;
    Ok(Json(page))
}
