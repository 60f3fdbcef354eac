use crate::entities::documents;
use crate::services::document_service::{DocumentDetail, DocumentSummary, OwnedDocument};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn file_url(file_key: &str) -> String {
    format!("/uploads/{}", file_key)
}

/// A freshly uploaded document as returned to its uploader.
#[derive(Serialize, ToSchema)]
pub struct DocumentResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub course_id: String,
    pub file_url: String,
    pub file_size: i64,
    pub file_hash: String,
    pub downloads_count: i32,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<documents::Model> for DocumentResponse {
    fn from(m: documents::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            course_id: m.course_id,
            file_url: file_url(&m.file_key),
            file_size: m.file_size,
            file_hash: m.file_hash,
            downloads_count: m.downloads_count,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DocumentSummaryResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_size: i64,
    pub downloads_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub course_name: String,
    pub course_code: String,
    pub semester: i32,
    pub major_name: String,
    pub faculty_name: String,
    pub university_name: String,
    pub uploaded_by_username: Option<String>,
}

impl From<DocumentSummary> for DocumentSummaryResponse {
    fn from(d: DocumentSummary) -> Self {
        Self {
            id: d.id,
            title: d.title,
            description: d.description,
            file_url: file_url(&d.file_key),
            file_size: d.file_size,
            downloads_count: d.downloads_count,
            created_at: d.created_at,
            course_name: d.course_name,
            course_code: d.course_code,
            semester: d.semester,
            major_name: d.major_name,
            faculty_name: d.faculty_name,
            university_name: d.university_name,
            uploaded_by_username: d.uploaded_by_username,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DocumentDetailResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_size: i64,
    pub downloads_count: i32,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub course_id: String,
    pub course_name: String,
    pub course_code: String,
    pub semester: i32,
    pub major_id: String,
    pub major_name: String,
    pub faculty_id: String,
    pub faculty_name: String,
    pub university_id: String,
    pub university_name: String,
    pub uploaded_by: Option<String>,
    pub uploaded_by_username: Option<String>,
}

impl From<DocumentDetail> for DocumentDetailResponse {
    fn from(d: DocumentDetail) -> Self {
        Self {
            id: d.id,
            title: d.title,
            description: d.description,
            file_url: file_url(&d.file_key),
            file_size: d.file_size,
            downloads_count: d.downloads_count,
            status: d.status,
            created_at: d.created_at,
            course_id: d.course_id,
            course_name: d.course_name,
            course_code: d.course_code,
            semester: d.semester,
            major_id: d.major_id,
            major_name: d.major_name,
            faculty_id: d.faculty_id,
            faculty_name: d.faculty_name,
            university_id: d.university_id,
            university_name: d.university_name,
            uploaded_by: d.uploaded_by,
            uploaded_by_username: d.uploaded_by_username,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct OwnedDocumentResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_url: String,
    pub file_size: i64,
    pub downloads_count: i32,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub course_name: String,
    pub course_code: String,
}

impl From<OwnedDocument> for OwnedDocumentResponse {
    fn from(d: OwnedDocument) -> Self {
        Self {
            id: d.id,
            title: d.title,
            description: d.description,
            file_url: file_url(&d.file_key),
            file_size: d.file_size,
            downloads_count: d.downloads_count,
            status: d.status,
            created_at: d.created_at,
            course_name: d.course_name,
            course_code: d.course_code,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

#[derive(Serialize, ToSchema)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummaryResponse>,
    pub pagination: Pagination,
}

#[derive(Serialize, ToSchema)]
pub struct MyDocumentsResponse {
    pub documents: Vec<OwnedDocumentResponse>,
    pub total: usize,
}

#[derive(Deserialize)]
pub struct ListDocumentsQuery {
    pub university_id: Option<String>,
    pub faculty_id: Option<String>,
    pub major_id: Option<String>,
    pub course_id: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
