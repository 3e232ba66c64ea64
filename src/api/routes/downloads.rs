//! Video download and metadata preview handlers.

use super::DOWNLOAD_FILENAME_HEADER;
use crate::api::AppState;
use crate::error::{ApiError, Error};
use crate::types::FetchRequest;
use crate::utils::content_disposition;
use axum::{
    Json,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// POST /downloads - Download a video and return its bytes
///
/// The whole file is captured in memory before the response starts. A
/// download that finishes without error but yields zero bytes is reported as
/// `empty_result` rather than as an empty file.
#[utoipa::path(
    post,
    path = "/api/v1/downloads",
    tag = "downloads",
    request_body = crate::types::FetchRequest,
    responses(
        (status = 200, description = "The video file", content_type = "video/mp4", body = Vec<u8>,
            headers(
                ("content-disposition" = String, description = "attachment with the computed filename"),
                ("x-download-filename" = String, description = "Percent-encoded filename")
            )
        ),
        (status = 400, description = "Missing URL or malformed request", body = crate::error::ApiError),
        (status = 422, description = "The download produced no bytes", body = crate::error::ApiError),
        (status = 501, description = "No extractor available", body = crate::error::ApiError),
        (status = 502, description = "The extractor reported a failure", body = crate::error::ApiError),
        (status = 503, description = "The extractor could not be started", body = crate::error::ApiError),
        (status = 504, description = "A phase exceeded its time limit", body = crate::error::ApiError)
    )
)]
pub async fn download_video(
    State(state): State<AppState>,
    payload: Result<Json<FetchRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_body(rejection),
    };

    let artifact = match state.downloader.download_video(&request).await {
        Ok(artifact) => artifact,
        Err(e) => return e.into_response(),
    };

    if artifact.is_empty() {
        let url = request.target().unwrap_or_default().to_string();
        tracing::warn!(url = %url, "Download produced no bytes");
        return Error::EmptyResult { url }.into_response();
    }

    let mime_type = artifact.mime_type();
    let (bytes, filename) = artifact.into_parts();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime_type)
        .header(header::CONTENT_DISPOSITION, content_disposition(&filename))
        .header(
            DOWNLOAD_FILENAME_HEADER,
            urlencoding::encode(&filename).into_owned(),
        )
        .body(Body::from(bytes))
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to build download response");
            ApiError::internal(format!("Failed to build download response: {}", e))
                .into_response()
        })
}

/// POST /metadata - Preview a video's id, title, and filename
#[utoipa::path(
    post,
    path = "/api/v1/metadata",
    tag = "downloads",
    request_body = crate::types::FetchRequest,
    responses(
        (status = 200, description = "Metadata and the filename a download would use", body = crate::types::MetadataPreview),
        (status = 400, description = "Missing URL or malformed request", body = crate::error::ApiError),
        (status = 501, description = "No extractor available", body = crate::error::ApiError),
        (status = 502, description = "The extractor reported a failure", body = crate::error::ApiError),
        (status = 504, description = "The query exceeded its time limit", body = crate::error::ApiError)
    )
)]
pub async fn fetch_metadata(
    State(state): State<AppState>,
    payload: Result<Json<FetchRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_body(rejection),
    };

    match state.downloader.fetch_metadata(&request).await {
        Ok(preview) => (StatusCode::OK, Json(preview)).into_response(),
        Err(e) => e.into_response(),
    }
}

fn invalid_body(rejection: JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::validation(rejection.body_text())),
    )
        .into_response()
}
