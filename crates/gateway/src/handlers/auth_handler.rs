//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::UserResponse;

use crate::extractors::ValidatedJson;
use crate::middleware::CurrentUser;
use crate::session::TokenResponse;
use crate::state::AppState;

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "admin")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "admin123")]
    pub password: String,
}

/// Login response: the session token and who it belongs to
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: TokenResponse,
    pub user: UserResponse,
}

/// Routes open to anonymous callers
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Routes that need an open session
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// Log in and open a session
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .gate
        .authenticate(&payload.username, &payload.password)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let token = state.sessions.issue(&user).await?;

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// Close the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn logout(
    Extension(current): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> StatusCode {
    state.sessions.revoke(current.session_id).await;
    let active_sessions = state.sessions.active_sessions().await;
    tracing::info!(user_id = current.user.id, active_sessions, "User logged out");
    StatusCode::NO_CONTENT
}

/// Get the authenticated user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(Extension(current): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(UserResponse::from(current.user))
}
