//! Bearer token authentication middleware.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;
use uuid::Uuid;

use crate::{domain::Caller, error::AppError, state::AppState};

/// Resolves the caller identity from the `Authorization` header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. No `Authorization` header: the request continues as anonymous
/// 2. Extract the bearer token
/// 3. Resolve it to a live session and its user
/// 4. Insert the resulting [`Caller`] into request extensions
///
/// Handlers read the outcome through [`MaybeCaller`].
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is present but malformed, or the
/// token is unknown or revoked.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::post, middleware};
/// use crate::api::middleware::auth;
///
/// let api = Router::new()
///     .route("/links", post(create_link_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !req.headers().contains_key(AUTHORIZATION) {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let caller = st.auth_service.resolve_caller(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

/// Extractor for the caller resolved by [`layer`]; `None` for anonymous requests.
#[derive(Debug, Clone, Copy)]
pub struct MaybeCaller(pub Option<Caller>);

impl MaybeCaller {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.map(|c| c.user_id)
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_some_and(|c| c.is_admin)
    }

    /// Returns the caller, or `Unauthorized` for anonymous requests.
    pub fn require(self) -> Result<Caller, AppError> {
        self.0.ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authentication required"}),
            )
        })
    }
}

impl<S> FromRequestParts<S> for MaybeCaller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeCaller(parts.extensions.get::<Caller>().copied()))
    }
}
