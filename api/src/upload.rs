use crate::api_error::ApiError;
use axum::extract::multipart::{Multipart, MultipartError};
use journal_scout::UploadedDocument;

/// Reads the `file` field out of a multipart upload. Other fields are
/// drained and ignored.
///
/// A `file` part without a `filename` parameter is a plain form value, not
/// an upload, so it counts as no file at all.
pub async fn read_upload(mut multipart: Multipart) -> Result<UploadedDocument, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read form field", e))?
    {
        let is_file_field = field.name() == Some("file") && upload.is_none();
        let filename = field.file_name().map(str::to_string);

        match filename {
            Some(filename) if is_file_field => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read file data", e))?;
                upload = Some((filename, data.to_vec()));
            }
            _ => {
                field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read form field", e))?;
            }
        }
    }

    let (filename, bytes) = upload.ok_or(ApiError::NoFile)?;
    if filename.is_empty() {
        return Err(ApiError::EmptyFilename);
    }

    Ok(UploadedDocument::new(filename, bytes))
}

/// Keeps axum's detailed reason, so an oversized upload says it hit the
/// length limit instead of a generic parse failure.
fn multipart_error(context: &str, e: MultipartError) -> ApiError {
    let detail = e.body_text().replace('\n', " ");
    ApiError::Multipart(format!("{}: {}", context, detail))
}
