use crate::api::error::AppError;
use crate::entities::users;
use crate::services::document_service::NewDocument;
use axum::{
    Extension, Json,
    extract::{Multipart, State},
    http::StatusCode,
};

use super::types::DocumentResponse;

#[utoipa::path(
    post,
    path = "/api/documents",
    request_body(content = Multipart, description = "PDF upload: file, title, description, course_id"),
    responses(
        (status = 201, description = "Document uploaded, uploader credited", body = DocumentResponse),
        (status = 400, description = "Invalid input or not a PDF"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Identical content already uploaded"),
        (status = 413, description = "File too large")
    ),
    security(("jwt" = [])),
    tag = "documents"
)]
pub async fn upload_document(
    State(state): State<crate::AppState>,
    Extension(user): Extension<users::Model>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentResponse>), AppError> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut course_id: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_err)? {
        match field.name().unwrap_or_default() {
            "file" => {
                content_type = field.content_type().map(|s| s.to_string());
                let bytes = field.bytes().await.map_err(map_multipart_err)?;
                file_bytes = Some(bytes.to_vec());
            }
            "title" => {
                title = Some(field.text().await.map_err(map_multipart_err)?);
            }
            "description" => {
                let text = field.text().await.map_err(map_multipart_err)?;
                if !text.is_empty() {
                    description = Some(text);
                }
            }
            "course_id" => {
                course_id = Some(field.text().await.map_err(map_multipart_err)?);
            }
            _ => {}
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let title = title.ok_or_else(|| AppError::BadRequest("Title is required".to_string()))?;
    let course_id =
        course_id.ok_or_else(|| AppError::BadRequest("Course id is required".to_string()))?;

    let document = state
        .documents
        .upload(
            &user.id,
            NewDocument {
                course_id,
                title,
                description,
                content_type,
                bytes,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(document.into())))
}

fn map_multipart_err(e: axum::extract::multipart::MultipartError) -> AppError {
    let msg = e.to_string();
    if msg.contains("length limit exceeded") {
        AppError::PayloadTooLarge("Request body exceeds the maximum allowed limit".to_string())
    } else {
        AppError::BadRequest(msg)
    }
}
