use crate::api::error::AppError;
use crate::api::handlers::MessageResponse;
use crate::entities::users;
use axum::{
    Extension, Json,
    extract::{Path, State},
};

use super::types::DocumentDetailResponse;

#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    params(("id" = String, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document with hierarchy and uploader names", body = DocumentDetailResponse),
        (status = 404, description = "Document not found")
    ),
    tag = "documents"
)]
pub async fn get_document(
    State(state): State<crate::AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentDetailResponse>, AppError> {
    let document = state.documents.get_by_id(&document_id).await?;
    Ok(Json(document.into()))
}

#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    params(("id" = String, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document deleted, uploader debited", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the uploader and not an admin"),
        (status = 404, description = "Document not found")
    ),
    security(("jwt" = [])),
    tag = "documents"
)]
pub async fn delete_document(
    State(state): State<crate::AppState>,
    Extension(user): Extension<users::Model>,
    Path(document_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.documents.delete(&user, &document_id).await?;

    Ok(Json(MessageResponse {
        message: "Document deleted successfully".to_string(),
    }))
}
