use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use gallery_core::ListFilter;

use crate::error::{HttpAppError, ResponseBody};
use crate::state::AppState;

async fn list(state: &AppState, filter: ListFilter) -> Result<impl IntoResponse, HttpAppError> {
    let filenames = state.query.list(filter).await?;
    Ok(Json(ResponseBody::ok(filenames)))
}

/// Every stored image, published or not. Filenames only.
pub async fn list_all(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, HttpAppError> {
    list(&state, ListFilter::All).await
}

/// Published images only.
pub async fn list_published(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    list(&state, ListFilter::PublishedOnly).await
}
