#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use polyshare_backend::config::AppConfig;
use polyshare_backend::entities::{courses, faculties, majors, universities, users};
use polyshare_backend::infrastructure::database::run_migrations;
use polyshare_backend::services::document_service::DocumentService;
use polyshare_backend::services::storage::LocalStorageService;
use polyshare_backend::{AppState, create_app};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

pub const BOUNDARY: &str = "---------------------------9051914041544843365972754266";

pub struct TestApp {
    pub app: Router,
    pub db: DatabaseConnection,
    // Held so the upload directory outlives the test
    pub upload_dir: TempDir,
}

pub async fn setup() -> TestApp {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    run_migrations(&db).await.unwrap();

    let upload_dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::development();
    config.upload_dir = upload_dir.path().to_string_lossy().to_string();

    let storage = Arc::new(LocalStorageService::new(upload_dir.path()));
    let documents = Arc::new(DocumentService::new(
        db.clone(),
        storage.clone(),
        config.clone(),
    ));

    let state = AppState {
        db: db.clone(),
        storage,
        documents,
        config,
    };

    TestApp {
        app: create_app(state),
        db,
        upload_dir,
    }
}

pub struct Hierarchy {
    pub university_id: String,
    pub faculty_id: String,
    pub major_id: String,
    pub course_id: String,
}

/// Inserts one university → faculty → major → course chain.
pub async fn seed_course(
    db: &DatabaseConnection,
    university: &str,
    faculty: &str,
    major: &str,
    course: &str,
    code: &str,
) -> Hierarchy {
    let university_id = Uuid::new_v4().to_string();
    universities::ActiveModel {
        id: Set(university_id.clone()),
        name: Set(university.to_string()),
        city: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();

    let faculty_id = Uuid::new_v4().to_string();
    faculties::ActiveModel {
        id: Set(faculty_id.clone()),
        university_id: Set(university_id.clone()),
        name: Set(faculty.to_string()),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();

    let major_id = Uuid::new_v4().to_string();
    majors::ActiveModel {
        id: Set(major_id.clone()),
        faculty_id: Set(faculty_id.clone()),
        name: Set(major.to_string()),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();

    let course_id = Uuid::new_v4().to_string();
    courses::ActiveModel {
        id: Set(course_id.clone()),
        major_id: Set(major_id.clone()),
        name: Set(course.to_string()),
        code: Set(code.to_string()),
        semester: Set(1),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();

    Hierarchy {
        university_id,
        faculty_id,
        major_id,
        course_id,
    }
}

/// Adds a second course under an existing major.
pub async fn seed_extra_course(
    db: &DatabaseConnection,
    major_id: &str,
    course: &str,
    code: &str,
) -> String {
    let course_id = Uuid::new_v4().to_string();
    courses::ActiveModel {
        id: Set(course_id.clone()),
        major_id: Set(major_id.to_string()),
        name: Set(course.to_string()),
        code: Set(code.to_string()),
        semester: Set(2),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();
    course_id
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers a fresh account and returns its bearer token.
pub async fn register_and_login(app: &Router, email: &str, username: &str) -> String {
    let payload = serde_json::json!({
        "email": email,
        "password": "hunter42",
        "username": username,
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["token"].as_str().unwrap().to_string()
}

pub fn pdf_bytes(marker: &str) -> Vec<u8> {
    format!("%PDF-1.5\n{}", marker).into_bytes()
}

pub fn multipart_upload_body(
    course_id: &str,
    title: &str,
    description: Option<&str>,
    file: &[u8],
    content_type: &str,
) -> Vec<u8> {
    let mut body = Vec::new();

    let mut text_field = |name: &str, value: &str| {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    };
    text_field("title", title);
    if let Some(description) = description {
        text_field("description", description);
    }
    text_field("course_id", course_id);

    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"notes.pdf\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(file);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    body
}

pub async fn upload_pdf(
    app: &Router,
    token: &str,
    course_id: &str,
    title: &str,
    description: Option<&str>,
    file: &[u8],
) -> Response<Body> {
    let body = multipart_upload_body(course_id, title, description, file, "application/pdf");

    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/documents")
                .header("Authorization", format!("Bearer {}", token))
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn get_me(app: &Router, token: &str) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

pub async fn karma_of(app: &Router, token: &str) -> i64 {
    get_me(app, token).await["karma_points"].as_i64().unwrap()
}

pub async fn set_karma(db: &DatabaseConnection, email: &str, karma: i32) {
    let user = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
        .unwrap()
        .unwrap();
    let mut active: users::ActiveModel = user.into();
    active.karma_points = Set(karma);
    active.update(db).await.unwrap();
}

pub async fn make_admin(db: &DatabaseConnection, email: &str) {
    let user = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
        .unwrap()
        .unwrap();
    let mut active: users::ActiveModel = user.into();
    active.role = Set("admin".to_string());
    active.update(db).await.unwrap();
}

pub async fn record_download(app: &Router, token: &str, document_id: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/documents/{}/download", document_id))
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn get_document(app: &Router, document_id: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/documents/{}", document_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn delete_document(app: &Router, token: &str, document_id: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/documents/{}", document_id))
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}
