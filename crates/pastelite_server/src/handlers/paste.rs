//! Paste HTTP handlers.

use crate::{error::HttpError, url::share_url, AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use pastelite_core::models::paste::{CreatePasteRequest, PasteView};
use serde::Serialize;

/// Views left after this read, set on share-link responses for limited pastes.
pub const REMAINING_VIEWS_HEADER: HeaderName = HeaderName::from_static("x-remaining-views");
/// RFC 3339 expiry, set on share-link responses for pastes with a TTL.
pub const EXPIRES_AT_HEADER: HeaderName = HeaderName::from_static("x-expires-at");

/// Body of a successful `POST /api/pastes`.
#[derive(Debug, Serialize)]
pub struct CreatePasteResponse {
    pub id: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_views: Option<u32>,
}

/// Create a new paste.
///
/// # Returns
/// `201 Created` with the id, share link, and expiry policy.
///
/// # Errors
/// `400` for malformed JSON or failed validation, `413` past the body limit,
/// `500`/`503` when storage fails or times out.
pub async fn create_paste(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreatePasteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePasteResponse>), HttpError> {
    let Json(request) = payload?;
    let created = state
        .call(move |service, gate| service.create_within(request, gate))
        .await?;

    let url = share_url(&state.config, &headers, &created.id);
    Ok((
        StatusCode::CREATED,
        Json(CreatePasteResponse {
            id: created.id,
            url,
            created_at: created.created_at,
            expires_at: created.expires_at,
            max_views: created.max_views,
        }),
    ))
}

/// Spend one view of `id` under the request deadline.
async fn consume(state: &AppState, id: String) -> Result<PasteView, HttpError> {
    state
        .call(move |service, gate| service.consume_within(&id, gate))
        .await?
        .ok_or_else(HttpError::not_available)
}

/// Read a paste, spending one view.
///
/// # Errors
/// `404` when the paste is missing, expired, or exhausted. The three cases
/// share one response.
pub async fn get_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PasteView>, HttpError> {
    consume(&state, id).await.map(Json)
}

/// Target of share links: the raw content as `text/plain`, spending one view.
///
/// Remaining views and expiry travel in response headers when set.
///
/// # Errors
/// The same unified `404` as [`get_paste`].
pub async fn view_shared_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, HttpError> {
    let view = consume(&state, id).await?;

    let mut response = (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )],
        view.content,
    )
        .into_response();
    let headers = response.headers_mut();
    if let Some(remaining) = view.remaining_views {
        headers.insert(REMAINING_VIEWS_HEADER, HeaderValue::from(remaining));
    }
    if let Some(expires_at) = view.expires_at {
        if let Ok(value) = HeaderValue::from_str(&expires_at.to_rfc3339()) {
            headers.insert(EXPIRES_AT_HEADER, value);
        }
    }
    Ok(response)
}
