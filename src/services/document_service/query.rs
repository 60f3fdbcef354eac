use crate::api::error::AppError;
use crate::entities::{courses, documents, faculties, majors, prelude::*, universities, users};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};

use super::types::{DocumentDetail, DocumentFilter, DocumentPage, DocumentSummary, OwnedDocument};
use super::DocumentService;

const MAX_PAGE_SIZE: u64 = 100;
const DEFAULT_PAGE_SIZE: u64 = 20;

impl DocumentService {
    /// Filtered, paginated listing of approved documents, newest first. The
    /// total reflects the filtered set before pagination.
    pub async fn list(
        &self,
        filter: DocumentFilter,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> Result<DocumentPage, AppError> {
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let backend = self.db.get_database_backend();

        let base = Documents::find()
            .join(JoinType::InnerJoin, documents::Relation::Courses.def())
            .join(JoinType::InnerJoin, courses::Relation::Majors.def())
            .join(JoinType::InnerJoin, majors::Relation::Faculties.def())
            .join(JoinType::InnerJoin, faculties::Relation::Universities.def())
            .join(JoinType::LeftJoin, documents::Relation::Users.def())
            .filter(documents::Column::Status.eq(documents::STATUS_APPROVED))
            .filter(filter.into_condition(backend));

        let total = base.clone().count(&self.db).await?;

        let documents = base
            .select_only()
            .columns([
                documents::Column::Id,
                documents::Column::Title,
                documents::Column::Description,
                documents::Column::FileKey,
                documents::Column::FileSize,
                documents::Column::DownloadsCount,
                documents::Column::CreatedAt,
            ])
            .column_as(courses::Column::Name, "course_name")
            .column_as(courses::Column::Code, "course_code")
            .column_as(courses::Column::Semester, "semester")
            .column_as(majors::Column::Name, "major_name")
            .column_as(faculties::Column::Name, "faculty_name")
            .column_as(universities::Column::Name, "university_name")
            .column_as(users::Column::Username, "uploaded_by_username")
            .order_by_desc(documents::Column::CreatedAt)
            .limit(page_size)
            .offset((page - 1) * page_size)
            .into_model::<DocumentSummary>()
            .all(&self.db)
            .await?;

        Ok(DocumentPage {
            documents,
            total,
            page,
            page_size,
        })
    }

    /// Single document with denormalized hierarchy and uploader names.
    /// Read-only: no counter or karma side effects.
    pub async fn get_by_id(&self, document_id: &str) -> Result<DocumentDetail, AppError> {
        Documents::find_by_id(document_id)
            .join(JoinType::InnerJoin, documents::Relation::Courses.def())
            .join(JoinType::InnerJoin, courses::Relation::Majors.def())
            .join(JoinType::InnerJoin, majors::Relation::Faculties.def())
            .join(JoinType::InnerJoin, faculties::Relation::Universities.def())
            .join(JoinType::LeftJoin, documents::Relation::Users.def())
            .select_only()
            .columns([
                documents::Column::Id,
                documents::Column::Title,
                documents::Column::Description,
                documents::Column::FileKey,
                documents::Column::FileSize,
                documents::Column::DownloadsCount,
                documents::Column::Status,
                documents::Column::CreatedAt,
                documents::Column::CourseId,
                documents::Column::UploadedBy,
            ])
            .column_as(courses::Column::Name, "course_name")
            .column_as(courses::Column::Code, "course_code")
            .column_as(courses::Column::Semester, "semester")
            .column_as(majors::Column::Id, "major_id")
            .column_as(majors::Column::Name, "major_name")
            .column_as(faculties::Column::Id, "faculty_id")
            .column_as(faculties::Column::Name, "faculty_name")
            .column_as(universities::Column::Id, "university_id")
            .column_as(universities::Column::Name, "university_name")
            .column_as(users::Column::Username, "uploaded_by_username")
            .into_model::<DocumentDetail>()
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))
    }

    /// Everything the given user uploaded, any status, newest first.
    pub async fn list_mine(&self, uploader_id: &str) -> Result<Vec<OwnedDocument>, AppError> {
        let documents = Documents::find()
            .join(JoinType::InnerJoin, documents::Relation::Courses.def())
            .filter(documents::Column::UploadedBy.eq(uploader_id))
            .select_only()
            .columns([
                documents::Column::Id,
                documents::Column::Title,
                documents::Column::Description,
                documents::Column::FileKey,
                documents::Column::FileSize,
                documents::Column::DownloadsCount,
                documents::Column::Status,
                documents::Column::CreatedAt,
            ])
            .column_as(courses::Column::Name, "course_name")
            .column_as(courses::Column::Code, "course_code")
            .order_by_desc(documents::Column::CreatedAt)
            .into_model::<OwnedDocument>()
            .all(&self.db)
            .await?;

        Ok(documents)
    }
}
