//! Handlers for link registry endpoints (create, fetch, delete, list).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, CreatedLinkResponse, LinkResponse};
use crate::api::middleware::MaybeCaller;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link owned by the caller.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "link_id": "q1Xo3Zb_A",
///   "original_url": "https://example.com/some/long/path",
///   "short_url": "http://localhost:3000/q1Xo3Zb_A"
/// }
/// ```
///
/// # Errors
///
/// - 400 if `original_url` is missing or empty
/// - 401 for anonymous callers
/// - 403 `quota_exceeded` when a free account already has 5 links
/// - 409 when the same URL was already shortened by this caller
pub async fn create_link_handler(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreatedLinkResponse>), AppError> {
    let caller = caller.require()?;
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.original_url, caller.user_id)
        .await?;

    let short_url = state.short_url(&link.link_id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedLinkResponse {
            link_id: link.link_id,
            original_url: link.original_url,
            short_url,
        }),
    ))
}

/// Returns a link with its visit statistics. Owner only.
///
/// # Endpoint
///
/// `GET /api/links/{link_id}`
///
/// # Errors
///
/// - 401 for anonymous callers
/// - 404 if the link does not exist
/// - 403 if the caller does not own the link
pub async fn get_link_handler(
    Path(link_id): Path<String>,
    State(state): State<AppState>,
    caller: MaybeCaller,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .link_service
        .get_owned_link(&link_id, caller.user_id())
        .await?;

    let short_url = state.short_url(&link.link_id);

    Ok(Json(LinkResponse::from_link(link, short_url)))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{link_id}`
///
/// Allowed for the owner and for administrators. Returns `204 No Content`.
///
/// # Errors
///
/// - 401 for anonymous callers
/// - 404 if the link does not exist
/// - 403 if the caller is neither owner nor admin
pub async fn delete_link_handler(
    Path(link_id): Path<String>,
    State(state): State<AppState>,
    caller: MaybeCaller,
) -> Result<StatusCode, AppError> {
    state
        .link_service
        .delete_link(&link_id, caller.user_id(), caller.is_admin())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a link addressed through its owner.
///
/// # Endpoint
///
/// `DELETE /api/users/{user_id}/links/{link_id}`
///
/// Same access rules as [`delete_link_handler`]. Returns `204 No Content`.
///
/// # Errors
///
/// - 400 if `user_id` is not a UUID
/// - 401 for anonymous callers
/// - 404 if the user has no link with this identifier
/// - 403 if the caller is neither owner nor admin
pub async fn delete_owner_link_handler(
    Path((owner_id, link_id)): Path<(String, String)>,
    State(state): State<AppState>,
    caller: MaybeCaller,
) -> Result<StatusCode, AppError> {
    let owner_id = parse_user_id(&owner_id)?;

    state
        .link_service
        .delete_owner_link(owner_id, &link_id, caller.user_id(), caller.is_admin())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists the links of one owner in creation order.
///
/// # Endpoint
///
/// `GET /api/users/{user_id}/links`
///
/// # Access
///
/// - Admins may list anyone
/// - Authenticated users may list only themselves
/// - Anonymous callers may list anyone unless `ANONYMOUS_LISTING=false`
///
/// # Errors
///
/// - 400 if `user_id` is not a UUID
/// - 403 when an authenticated non-admin lists another user
/// - 401 for anonymous callers when anonymous listing is disabled
pub async fn list_owner_links_handler(
    Path(owner_id): Path<String>,
    State(state): State<AppState>,
    caller: MaybeCaller,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let owner_id = parse_user_id(&owner_id)?;

    let links = state
        .link_service
        .list_links_for_owner(owner_id, caller.user_id(), caller.is_admin())
        .await?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.short_url(&link.link_id);
            LinkResponse::from_link(link, short_url)
        })
        .collect();

    Ok(Json(items))
}

fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::bad_request("Invalid user id", json!({ "user_id": raw })))
}
