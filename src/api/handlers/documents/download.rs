use crate::api::error::AppError;
use crate::api::handlers::MessageResponse;
use crate::entities::users;
use axum::{
    Extension, Json,
    extract::{Path, State},
};

#[utoipa::path(
    post,
    path = "/api/documents/{id}/download",
    params(("id" = String, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Download recorded, caller debited", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Insufficient karma"),
        (status = 404, description = "Document not found")
    ),
    security(("jwt" = [])),
    tag = "documents"
)]
pub async fn record_download(
    State(state): State<crate::AppState>,
    Extension(user): Extension<users::Model>,
    Path(document_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.documents.record_download(&user.id, &document_id).await?;

    Ok(Json(MessageResponse {
        message: "Download recorded. -1 karma".to_string(),
    }))
}
