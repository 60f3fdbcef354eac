use crate::api::error::AppError;
use crate::entities::users;
use crate::services::document_service::DocumentFilter;
use axum::{
    Extension, Json,
    extract::{Query, State},
};

use super::types::*;

#[utoipa::path(
    get,
    path = "/api/documents",
    params(
        ("university_id" = Option<String>, Query, description = "Filter by university"),
        ("faculty_id" = Option<String>, Query, description = "Filter by faculty"),
        ("major_id" = Option<String>, Query, description = "Filter by major"),
        ("course_id" = Option<String>, Query, description = "Filter by course"),
        ("search" = Option<String>, Query, description = "Case-insensitive title/description search"),
        ("page" = Option<u64>, Query, description = "1-indexed page"),
        ("limit" = Option<u64>, Query, description = "Page size (max 100)")
    ),
    responses(
        (status = 200, description = "Approved documents, newest first", body = DocumentListResponse)
    ),
    tag = "documents"
)]
pub async fn list_documents(
    State(state): State<crate::AppState>,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<DocumentListResponse>, AppError> {
    let filter = DocumentFilter {
        university_id: query.university_id,
        faculty_id: query.faculty_id,
        major_id: query.major_id,
        course_id: query.course_id,
        search: query.search,
    };

    let page = state.documents.list(filter, query.page, query.limit).await?;

    let pages = page.total.div_ceil(page.page_size);
    Ok(Json(DocumentListResponse {
        documents: page.documents.into_iter().map(Into::into).collect(),
        pagination: Pagination {
            total: page.total,
            page: page.page,
            limit: page.page_size,
            pages,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/api/documents/my/uploads",
    responses(
        (status = 200, description = "Documents uploaded by the caller", body = MyDocumentsResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("jwt" = [])),
    tag = "documents"
)]
pub async fn my_documents(
    State(state): State<crate::AppState>,
    Extension(user): Extension<users::Model>,
) -> Result<Json<MyDocumentsResponse>, AppError> {
    let documents = state.documents.list_mine(&user.id).await?;

    let total = documents.len();
    Ok(Json(MyDocumentsResponse {
        documents: documents.into_iter().map(Into::into).collect(),
        total,
    }))
}
