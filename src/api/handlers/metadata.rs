use crate::api::error::AppError;
use crate::entities::{courses, faculties, majors, prelude::*, universities};
use axum::{
    Json,
    extract::{Query, State},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct FacultiesQuery {
    pub university_id: Option<String>,
}

#[derive(Deserialize)]
pub struct MajorsQuery {
    pub faculty_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CoursesQuery {
    pub major_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/metadata/universities",
    responses((status = 200, description = "All universities, ordered by name")),
    tag = "metadata"
)]
pub async fn list_universities(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<universities::Model>>, AppError> {
    let universities = Universities::find()
        .order_by_asc(universities::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(universities))
}

#[utoipa::path(
    get,
    path = "/api/metadata/faculties",
    params(("university_id" = Option<String>, Query, description = "Restrict to one university")),
    responses((status = 200, description = "Faculties, ordered by name")),
    tag = "metadata"
)]
pub async fn list_faculties(
    State(state): State<crate::AppState>,
    Query(query): Query<FacultiesQuery>,
) -> Result<Json<Vec<faculties::Model>>, AppError> {
    let mut select = Faculties::find();
    if let Some(university_id) = query.university_id {
        select = select.filter(faculties::Column::UniversityId.eq(university_id));
    }

    let faculties = select
        .order_by_asc(faculties::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(faculties))
}

#[utoipa::path(
    get,
    path = "/api/metadata/majors",
    params(("faculty_id" = Option<String>, Query, description = "Restrict to one faculty")),
    responses((status = 200, description = "Majors, ordered by name")),
    tag = "metadata"
)]
pub async fn list_majors(
    State(state): State<crate::AppState>,
    Query(query): Query<MajorsQuery>,
) -> Result<Json<Vec<majors::Model>>, AppError> {
    let mut select = Majors::find();
    if let Some(faculty_id) = query.faculty_id {
        select = select.filter(majors::Column::FacultyId.eq(faculty_id));
    }

    let majors = select
        .order_by_asc(majors::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(majors))
}

#[utoipa::path(
    get,
    path = "/api/metadata/courses",
    params(("major_id" = Option<String>, Query, description = "Restrict to one major")),
    responses((status = 200, description = "Courses, ordered by semester then name")),
    tag = "metadata"
)]
pub async fn list_courses(
    State(state): State<crate::AppState>,
    Query(query): Query<CoursesQuery>,
) -> Result<Json<Vec<courses::Model>>, AppError> {
    let mut select = Courses::find();
    if let Some(major_id) = query.major_id {
        select = select.filter(courses::Column::MajorId.eq(major_id));
    }

    let courses = select
        .order_by_asc(courses::Column::Semester)
        .order_by_asc(courses::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(courses))
}
