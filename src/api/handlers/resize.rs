use crate::api::error::AppError;
use crate::services::staging::StagedUpload;
use crate::utils::validation::parse_dimensions;
use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::Response,
};
use bytes::Bytes;
use futures::TryStreamExt;
use tokio_util::io::StreamReader;

#[utoipa::path(
    post,
    path = "/resize",
    request_body(content = Multipart, description = "Image upload with width/height form fields"),
    responses(
        (status = 200, description = "Resized image", content_type = "image/jpeg"),
        (status = 400, description = "Missing image or invalid dimensions"),
        (status = 413, description = "Upload exceeds the size limit"),
        (status = 500, description = "Decode, resize, or encode failure")
    ),
    tag = "resize"
)]
pub async fn resize_image(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut width_raw: Option<String> = None;
    let mut height_raw: Option<String> = None;
    let mut staged: Option<StagedUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        let err_msg = e.to_string();
        if err_msg.contains("length limit exceeded") {
            AppError::PayloadTooLarge("Request body exceeds the maximum allowed limit".to_string())
        } else {
            AppError::BadRequest(err_msg)
        }
    })? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let original_filename = field.file_name().unwrap_or("unnamed").to_string();
            tracing::info!("Receiving upload {}", original_filename);

            let body_with_io_error = field.map_err(std::io::Error::other);
            let reader = StreamReader::new(body_with_io_error);

            staged = Some(state.staging.stage(reader).await?);
        } else if name == "width" {
            width_raw = Some(field.text().await.unwrap_or_default());
        } else if name == "height" {
            height_raw = Some(field.text().await.unwrap_or_default());
        }
    }

    // File presence is checked before the dimension fields.
    let staged = staged.ok_or(AppError::MissingImage)?;
    let (width, height) = parse_dimensions(
        width_raw.as_deref(),
        height_raw.as_deref(),
        state.config.max_dimension,
    )?;

    let jpeg = state
        .resize
        .resize_to_jpeg(staged.input_path(), staged.output_path(), width, height)
        .await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime::IMAGE_JPEG.as_ref())
        .header(header::CONTENT_LENGTH, jpeg.len())
        .body(Body::from(Bytes::from(jpeg)))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    // The response body owns its bytes, so both staged files can go now.
    // On every earlier exit `staged` drops the same way.
    drop(staged);
    Ok(response)
}
