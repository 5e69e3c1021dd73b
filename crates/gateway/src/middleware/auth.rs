//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Action, User, BEARER_TOKEN_PREFIX};

use crate::state::AppState;

/// Authenticated caller, resolved from the session token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub session_id: Uuid,
}

/// Fail with 403 unless the caller's role permits the action.
pub fn require_permission(
    state: &AppState,
    current: &CurrentUser,
    action: Action,
) -> AppResult<()> {
    if state.gate.authorize(&current.user, action) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Authentication middleware that validates session tokens.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request)?;
    let claims = state.sessions.verify(&token).await?;

    // The account may have been removed since login
    let user = state
        .gate
        .find_user(claims.sub)
        .await?
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser {
        user,
        session_id: claims.jti,
    });

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::to_string)
        .ok_or(AppError::Unauthorized)
}
