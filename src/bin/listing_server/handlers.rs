use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};

use drivepick::remote::types::{DriveFile, FileList, parent_from_query};
use drivepick::remote::{ListingClient, RemoteError};

use super::AppState;
use super::http_error::{bad_request, forbidden, not_found, unauthorized, unavailable};

const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListParams {
    q: String,

    #[serde(default)]
    page_token: Option<String>,

    #[serde(default)]
    page_size: Option<usize>,
}

pub(super) async fn healthz() -> &'static str {
    "ok"
}

pub(super) async fn call_stats(State(state): State<Arc<AppState>>) -> Json<BTreeMap<String, usize>> {
    Json(state.drive.call_counts().into_iter().collect())
}

pub(super) async fn list_files(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| token == state.token);
    if !authorized {
        return unauthorized();
    }

    let Some(parent) = parent_from_query(&params.q) else {
        return bad_request("unsupported query");
    };

    let offset = match params.page_token.as_deref() {
        None | Some("") => 0,
        Some(token) => match token.parse::<usize>() {
            Ok(offset) => offset,
            Err(_) => return bad_request("invalid page token"),
        },
    };

    // Only the first page counts as a listing call.
    let children = if offset == 0 {
        match state.drive.list_children(&parent) {
            Ok(children) => children,
            Err(RemoteError::Auth(msg)) => return forbidden(&msg),
            Err(RemoteError::Transient(msg)) if state.drive.peek_children(&parent).is_some() => {
                return unavailable(&msg);
            }
            Err(RemoteError::Transient(msg)) => return not_found(&msg),
        }
    } else {
        match state.drive.peek_children(&parent) {
            Some(children) => children,
            None => return not_found("file not found"),
        }
    };

    let mut page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    if let Some(max) = state.max_page_size {
        page_size = page_size.min(max.max(1));
    }

    let end = offset.saturating_add(page_size).min(children.len());
    let files = children
        .get(offset..end)
        .unwrap_or_default()
        .iter()
        .map(DriveFile::from)
        .collect();
    let next_page_token = (end < children.len()).then(|| end.to_string());

    Json(FileList {
        files,
        next_page_token,
    })
    .into_response()
}
