//! Handlers for account and session endpoints.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::StatusCode,
};
use axum_auth::AuthBearer;
use serde_json::json;
use validator::Validate;

use crate::api::dto::users::{CredentialsRequest, SessionResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account and returns a session token.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "correct horse battery staple" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "user_id": "5b0c3c1e-8f9e-4a57-9a53-1e1d3f0f8b8a",
///   "username": "alice",
///   "is_pro": false,
///   "is_admin": false,
///   "token": "..."
/// }
/// ```
///
/// # Errors
///
/// - 400 on empty fields or a password over 72 bytes
/// - 409 if the username is taken
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    payload.validate()?;

    let (user, token) = state
        .user_service
        .register(payload.username, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::new(user, token))))
}

/// Exchanges credentials for a new session token.
///
/// # Endpoint
///
/// `POST /api/users/login`
///
/// # Errors
///
/// - 400 on empty fields
/// - 401 on unknown username or wrong password
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    payload.validate()?;

    let (user, token) = state
        .user_service
        .login(payload.username, payload.password)
        .await?;

    Ok(Json(SessionResponse::new(user, token)))
}

/// Revokes the session whose token authenticated this request.
///
/// # Endpoint
///
/// `POST /api/users/logout`
///
/// Returns `204 No Content`. The token stops working immediately.
///
/// # Errors
///
/// Returns 401 if no valid bearer token is supplied.
pub async fn logout_handler(
    State(state): State<AppState>,
    req: Request,
) -> Result<StatusCode, AppError> {
    let (mut parts, _body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    state.user_service.logout(&token).await?;

    Ok(StatusCode::NO_CONTENT)
}
