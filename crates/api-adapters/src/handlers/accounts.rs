use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use domains::UserId;

use crate::dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::error::ApiError;
use crate::handlers::{json_body, path_id};
use crate::state::AppState;

/// `POST /accounts`
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = json_body(body)?;
    let user = state.accounts.register(request.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /sessions`
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request: LoginRequest = json_body(body)?;
    let user = state
        .accounts
        .login(
            request.email.as_deref().unwrap_or_default(),
            request.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful",
        user,
    }))
}

/// `GET /accounts`
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.accounts.list().await?))
}

/// `GET /accounts/{id}`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: UserId = path_id("User", &id)?;
    Ok(Json(state.accounts.get(id).await?))
}

/// `DELETE /accounts/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: UserId = path_id("User", &id)?;
    state.accounts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
