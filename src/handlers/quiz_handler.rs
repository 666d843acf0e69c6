use actix_multipart::Multipart;
use actix_web::{post, web, HttpRequest, HttpResponse};
use futures::TryStreamExt;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    middleware::get_request_id,
    models::Upload,
    services::extraction_service,
};

/// Multipart field carrying the document on `/api/quiz`.
pub const QUIZ_FILE_FIELD: &str = "doc_file";
/// Multipart field carrying the document on the legacy `/api/generate-quiz`.
pub const LEGACY_QUIZ_FILE_FIELD: &str = "pdf_file";

#[post("/api/quiz")]
pub async fn generate_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    handle_quiz_upload(&req, &state, payload, QUIZ_FILE_FIELD).await
}

#[post("/api/generate-quiz")]
pub async fn generate_quiz_legacy(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    handle_quiz_upload(&req, &state, payload, LEGACY_QUIZ_FILE_FIELD).await
}

async fn handle_quiz_upload(
    req: &HttpRequest,
    state: &AppState,
    payload: Multipart,
    field_name: &str,
) -> AppResult<HttpResponse> {
    let request_id = get_request_id(req).unwrap_or_else(|| "-".to_string());

    let upload = read_upload(payload, field_name, state.config.max_upload_bytes)
        .await?
        .ok_or_else(|| {
            AppError::MissingFile(format!("No file found. Use the field name '{}'", field_name))
        })?;

    log::info!(
        "[{}] Received '{}' ({} bytes)",
        request_id,
        upload.filename,
        upload.bytes.len()
    );

    let text = web::block(move || extraction_service::extract_text(&upload))
        .await?
        .inspect_err(|e| log::warn!("[{}] {}", request_id, e))?;

    let quiz = state
        .quiz_service
        .generate_quiz(&text)
        .await
        .inspect_err(|e| log::error!("[{}] {}", request_id, e))?;

    log::info!(
        "[{}] Generated quiz with {} items",
        request_id,
        quiz.as_array().map_or(0, Vec::len)
    );

    Ok(HttpResponse::Ok().json(quiz))
}

/// Reads the first file part named `field_name` into memory.
///
/// Parts without a filename are form values, not files, and are ignored.
/// Returns `None` when no matching file part exists.
async fn read_upload(
    mut payload: Multipart,
    field_name: &str,
    max_bytes: usize,
) -> AppResult<Option<Upload>> {
    let mut upload = None;

    while let Some(mut field) = payload.try_next().await? {
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let wanted = upload.is_none() && field.name() == Some(field_name);
        let Some(filename) = filename.filter(|_| wanted) else {
            while field.try_next().await?.is_some() {}
            continue;
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "'{}' exceeds the {} byte limit",
                    filename, max_bytes
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        upload = Some(Upload::new(filename, bytes));
    }

    Ok(upload)
}
