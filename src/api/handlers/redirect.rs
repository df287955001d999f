//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a link identifier to its original URL and counts the visit.
///
/// # Endpoint
///
/// `GET /{link_id}`
///
/// The visit is recorded before the response is sent; the count and
/// `last_accessed_on` update atomically in the database, so concurrent
/// visits are never lost.
///
/// # Response
///
/// `301 Moved Permanently` with `Location: <original_url>`.
///
/// # Errors
///
/// Returns 404 Not Found if the identifier is unknown. No record is created.
pub async fn redirect_handler(
    Path(link_id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state
        .link_service
        .resolve_and_record_visit(&link_id)
        .await?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, original_url)]))
}
