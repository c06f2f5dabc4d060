//! Reading the upload form.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use gallery_core::constants::form_fields;
use gallery_core::{AppError, Submission};

fn multipart_error(e: MultipartError) -> AppError {
    AppError::BadRequest(format!("Failed to read multipart: {}", e))
}

async fn text(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(multipart_error)
}

/// Collect the submitter fields and the image bytes from an upload form.
///
/// Missing text fields come back empty so that validation can report them
/// alongside every other violation. Unknown fields are ignored. Only one
/// field named `file` is accepted.
pub async fn extract_upload_form(
    mut multipart: Multipart,
) -> Result<(Submission, Option<Vec<u8>>), AppError> {
    let mut submission = Submission::default();
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            form_fields::FIRST_NAME => submission.first_name = text(field).await?,
            form_fields::LAST_NAME => submission.last_name = text(field).await?,
            form_fields::EMAIL => submission.email = text(field).await?,
            form_fields::ADDRESS => submission.address = text(field).await?,
            form_fields::CITY => submission.city = text(field).await?,
            form_fields::STATE => submission.state = text(field).await?,
            form_fields::ZIP => submission.zip = text(field).await?,
            form_fields::FILE => {
                if file_data.is_some() {
                    return Err(AppError::BadRequest(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let data = field.bytes().await.map_err(multipart_error)?;
                file_data = Some(data.to_vec());
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    Ok((submission, file_data))
}
