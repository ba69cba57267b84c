//! Post creation handler.

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use futures::StreamExt;

use around_core::domain::Location;
use around_core::ports::MediaUpload;
use around_core::services::PostSubmission;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Cap on the text parts (`message`, `lat`, `lon`).
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

const DEFAULT_IMAGE_CONTENT_TYPE: &str = "application/octet-stream";

/// Drain a field, refusing to buffer more than `limit` bytes.
async fn read_field(field: &mut Field, limit: usize) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk =
            chunk.map_err(|e| AppError::BadRequest(format!("Failed to read multipart field: {e}")))?;
        if buf.len() + chunk.len() > limit {
            return Err(AppError::PayloadTooLarge(format!(
                "Field '{}' exceeds {} bytes",
                field.name().unwrap_or_default(),
                limit
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

async fn read_text(field: &mut Field) -> AppResult<String> {
    let bytes = read_field(field, MAX_TEXT_FIELD_BYTES).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Collect `message`, `lat`, `lon` and `image` from the form. Unknown parts
/// are drained and ignored; an empty image part counts as no image.
async fn read_submission(
    payload: &mut Multipart,
    max_image_bytes: usize,
) -> AppResult<PostSubmission> {
    let mut message = String::new();
    let mut lat = None;
    let mut lon = None;
    let mut image = None;

    while let Some(field) = payload.next().await {
        let mut field =
            field.map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;
        let name = field.name().unwrap_or_default().to_owned();

        match name.as_str() {
            "message" => message = read_text(&mut field).await?,
            "lat" => lat = Some(read_text(&mut field).await?),
            "lon" => lon = Some(read_text(&mut field).await?),
            "image" => {
                let content_type = field
                    .content_type()
                    .map(|mime| mime.to_string())
                    .unwrap_or_else(|| DEFAULT_IMAGE_CONTENT_TYPE.to_string());
                let bytes = read_field(&mut field, max_image_bytes).await?;
                if !bytes.is_empty() {
                    image = Some(MediaUpload::new(bytes, content_type));
                }
            }
            _ => {
                read_field(&mut field, max_image_bytes).await?;
            }
        }
    }

    Ok(PostSubmission {
        message,
        location: Location::from_raw(lat.as_deref(), lon.as_deref()),
        image,
    })
}

/// POST /post (multipart: message, lat, lon, image)
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    tracing::info!(username = %identity.username, "Received post request");

    let submission = read_submission(&mut payload, state.max_image_bytes).await?;
    let message = submission.message.clone();

    let receipt = state
        .ingestion
        .ingest(&identity.username, submission)
        .await?;
    tracing::debug!(post_id = %receipt.id, media_url = %receipt.media_url, "Post accepted");

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!("Post received: {}\n", message)))
}
