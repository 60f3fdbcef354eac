use crate::entities::{courses, documents, faculties, majors, universities};
use sea_orm::sea_query::{BinOper, Expr, Func};
use sea_orm::{ColumnTrait, Condition, DatabaseBackend, FromQueryResult};
use serde::Serialize;

/// Optional, conjunctive filters over the course hierarchy. Every supplied
/// field narrows the Course → Major → Faculty → University join; the search
/// term matches title or description case-insensitively. Translation into a
/// parameterized `Condition` is the only place filters touch the query
/// language.
#[derive(Debug, Default, Clone)]
pub struct DocumentFilter {
    pub university_id: Option<String>,
    pub faculty_id: Option<String>,
    pub major_id: Option<String>,
    pub course_id: Option<String>,
    pub search: Option<String>,
}

impl DocumentFilter {
    pub fn into_condition(self, backend: DatabaseBackend) -> Condition {
        let mut cond = Condition::all();

        if let Some(id) = self.university_id {
            cond = cond.add(universities::Column::Id.eq(id));
        }
        if let Some(id) = self.faculty_id {
            cond = cond.add(faculties::Column::Id.eq(id));
        }
        if let Some(id) = self.major_id {
            cond = cond.add(majors::Column::Id.eq(id));
        }
        if let Some(id) = self.course_id {
            cond = cond.add(courses::Column::Id.eq(id));
        }
        if let Some(term) = self.search {
            let term = term.trim();
            if !term.is_empty() {
                cond = cond.add(search_condition(backend, term));
            }
        }

        cond
    }
}

/// Case-insensitive substring match on title OR description. Postgres gets
/// ILIKE; other backends fall back to LOWER(...) LIKE.
fn search_condition(backend: DatabaseBackend, term: &str) -> Condition {
    if backend == DatabaseBackend::Postgres {
        let pattern = format!("%{}%", term);
        Condition::any()
            .add(
                Expr::col((documents::Entity, documents::Column::Title))
                    .binary(BinOper::Custom("ILIKE"), Expr::val(pattern.clone())),
            )
            .add(
                Expr::col((documents::Entity, documents::Column::Description))
                    .binary(BinOper::Custom("ILIKE"), Expr::val(pattern)),
            )
    } else {
        let pattern = format!("%{}%", term.to_lowercase());
        Condition::any()
            .add(
                Expr::expr(Func::lower(Expr::col((
                    documents::Entity,
                    documents::Column::Title,
                ))))
                .like(pattern.as_str()),
            )
            .add(
                Expr::expr(Func::lower(Expr::col((
                    documents::Entity,
                    documents::Column::Description,
                ))))
                .like(pattern.as_str()),
            )
    }
}

/// One row of a filtered listing, with denormalized hierarchy names.
#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_key: String,
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

/// A single document enriched for read-only clients.
#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct DocumentDetail {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_key: String,
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

/// A document as seen by its uploader (any status).
#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct OwnedDocument {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_key: String,
    pub file_size: i64,
    pub downloads_count: i32,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub course_name: String,
    pub course_code: String,
}

pub struct DocumentPage {
    pub documents: Vec<DocumentSummary>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_is_unrestricted() {
        let cond = DocumentFilter::default().into_condition(DatabaseBackend::Sqlite);
        assert!(cond.is_empty());
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let cond = DocumentFilter {
            major_id: Some("m1".to_string()),
            search: Some("algo".to_string()),
            ..Default::default()
        }
        .into_condition(DatabaseBackend::Sqlite);
        assert_eq!(cond.len(), 2);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let cond = DocumentFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        }
        .into_condition(DatabaseBackend::Sqlite);
        assert!(cond.is_empty());
    }
}
