use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use domains::{CommentId, PostId};

use crate::dto::{parse_actor, ActorRequest, CommentRequest, CreatePostRequest};
use crate::error::ApiError;
use crate::handlers::{json_body, path_id};
use crate::state::AppState;

/// `GET /posts`
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.posts.list_posts().await?))
}

/// `POST /posts`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request: CreatePostRequest = json_body(body)?;
    let post = state
        .posts
        .create_post(
            parse_actor(request.user_id.as_deref()),
            request.title.as_deref(),
            request.content.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `GET /posts/{id}`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: PostId = path_id("Post", &id)?;
    Ok(Json(state.posts.get_post(id).await?))
}

/// `POST /posts/{id}/like`
pub async fn like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ActorRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: PostId = path_id("Post", &id)?;
    let request: ActorRequest = json_body(body)?;
    let post = state
        .posts
        .toggle_like(id, parse_actor(request.user_id.as_deref()))
        .await?;
    Ok(Json(post))
}

/// `POST /posts/{id}/dislike`
pub async fn dislike(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ActorRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: PostId = path_id("Post", &id)?;
    let request: ActorRequest = json_body(body)?;
    let post = state
        .posts
        .toggle_dislike(id, parse_actor(request.user_id.as_deref()))
        .await?;
    Ok(Json(post))
}

/// `POST /posts/{id}/comments`
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: PostId = path_id("Post", &id)?;
    let request: CommentRequest = json_body(body)?;
    let post = state
        .posts
        .add_comment(
            id,
            parse_actor(request.user_id.as_deref()),
            request.text.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `DELETE /posts/{id}/comments/{comment_id}`
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(String, String)>,
    body: Result<Json<ActorRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: PostId = path_id("Post", &id)?;
    let comment_id: CommentId = path_id("Comment", &comment_id)?;
    let request: ActorRequest = json_body(body)?;
    let post = state
        .posts
        .delete_comment(id, parse_actor(request.user_id.as_deref()), comment_id)
        .await?;
    Ok(Json(post))
}

/// `DELETE /posts/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ActorRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: PostId = path_id("Post", &id)?;
    let request: ActorRequest = json_body(body)?;
    state
        .posts
        .delete_post(id, parse_actor(request.user_id.as_deref()))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
