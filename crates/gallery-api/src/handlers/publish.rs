use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Query, State},
    response::IntoResponse,
    Form, Json,
};
use gallery_core::{AppError, PublishOutcome};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HttpAppError, ResponseBody};
use crate::state::AppState;

/// `i` may arrive in the query string or a url-encoded body.
#[derive(Debug, Default, Deserialize)]
pub struct PublishParams {
    i: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub id: Uuid,
    pub published: bool,
    pub outcome: PublishOutcome,
}

fn parse_identifier(raw: Option<String>) -> Result<Uuid, AppError> {
    let raw = raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("identifier required".to_string()))?;
    Ok(Uuid::parse_str(&raw)?)
}

/// Publish image handler. Requires publisher credentials (see `auth`).
///
/// Publishing an image that is already public succeeds without change.
pub async fn publish_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PublishParams>,
    form: Result<Form<PublishParams>, FormRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let from_form = form.ok().and_then(|Form(params)| params.i);
    let id = parse_identifier(from_form.or(query.i))?;

    let outcome = state.publication.publish(id).await?;

    let message = match outcome {
        PublishOutcome::Published => {
            tracing::info!(image_id = %id, "Image published");
            "Image published"
        }
        PublishOutcome::AlreadyPublished => "Image was already published",
    };

    Ok(Json(ResponseBody::ok_with_message(
        PublishResponse {
            id,
            published: true,
            outcome,
        },
        message,
    )))
}
