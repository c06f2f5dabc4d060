use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use gallery_core::{AppError, ImageRecord};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{HttpAppError, ResponseBody};
use crate::state::AppState;
use crate::utils::multipart::extract_upload_form;

/// What a client learns about an accepted upload. Submitter details are not echoed.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub filename: String,
    pub width: i32,
    pub height: i32,
    pub published: bool,
}

impl From<ImageRecord> for UploadResponse {
    fn from(record: ImageRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename,
            width: record.width,
            height: record.height,
            published: record.published,
        }
    }
}

/// Upload image handler
///
/// Accepts the submitter form plus one `file` part and runs it through the
/// ingestion pipeline. Responds 201 with the new record's id and filename.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let multipart = multipart.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let (submission, file) = extract_upload_form(multipart).await?;

    let record = state.ingestion.ingest(submission, file).await?;

    tracing::info!(
        image_id = %record.id,
        filename = %record.filename,
        width = record.width,
        height = record.height,
        "Image uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(ResponseBody::ok_with_message(
            UploadResponse::from(record),
            "Image uploaded",
        )),
    ))
}
