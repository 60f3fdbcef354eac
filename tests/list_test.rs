mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::*;
use serde_json::Value;
use tower::ServiceExt;

async fn list(t: &TestApp, query: &str) -> Value {
    let uri = if query.is_empty() {
        "/api/documents".to_string()
    } else {
        format!("/api/documents?{}", query)
    };
    let response = t
        .app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

fn titles(json: &Value) -> Vec<String> {
    json["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap().to_string())
        .collect()
}

async fn upload_titled(
    t: &TestApp,
    token: &str,
    course_id: &str,
    title: &str,
    description: Option<&str>,
) {
    let response = upload_pdf(
        &t.app,
        token,
        course_id,
        title,
        description,
        &pdf_bytes(title),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    // Keep creation timestamps strictly ordered
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
}

#[tokio::test]
async fn test_filters_are_conjunctive_with_search() {
    let t = setup().await;
    let software =
        seed_course(&t.db, "Poly", "Engineering", "Software", "Algorithms", "INF2010").await;
    let physics = seed_course(&t.db, "UdeM", "Science", "Physics", "Mechanics", "PHY1001").await;
    let token = register_and_login(&t.app, "alice@example.com", "alice").await;

    // In the software major: two match "algo" (one by title, one by
    // description), one does not
    upload_titled(&t, &token, &software.course_id, "Intro to Algorithms", None).await;
    upload_titled(
        &t,
        &token,
        &software.course_id,
        "Linear Algebra",
        Some("sorting ALGOrithms drills"),
    )
    .await;
    upload_titled(&t, &token, &software.course_id, "Calculus notes", None).await;
    // In the physics major: matches the search but not the major filter
    upload_titled(&t, &token, &physics.course_id, "Algorithm design for physicists", None).await;

    let json = list(&t, &format!("major_id={}&search=algo", software.major_id)).await;
    let found = titles(&json);
    assert_eq!(json["pagination"]["total"], 2);
    assert!(found.contains(&"Intro to Algorithms".to_string()));
    assert!(found.contains(&"Linear Algebra".to_string()));

    // The same search without the major filter also reaches the physics doc
    let json = list(&t, "search=algo").await;
    assert_eq!(json["pagination"]["total"], 3);

    // Narrowing by course
    let json = list(&t, &format!("course_id={}", physics.course_id)).await;
    assert_eq!(titles(&json), vec!["Algorithm design for physicists"]);

    // Narrowing by university
    let json = list(&t, &format!("university_id={}", physics.university_id)).await;
    assert_eq!(json["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_listing_is_newest_first_with_hierarchy_names() {
    let t = setup().await;
    let h = seed_course(&t.db, "Poly", "Engineering", "Software", "Algorithms", "INF2010").await;
    let token = register_and_login(&t.app, "alice@example.com", "alice").await;

    upload_titled(&t, &token, &h.course_id, "First upload", None).await;
    upload_titled(&t, &token, &h.course_id, "Second upload", None).await;
    upload_titled(&t, &token, &h.course_id, "Third upload", None).await;

    let json = list(&t, "").await;
    assert_eq!(
        titles(&json),
        vec!["Third upload", "Second upload", "First upload"]
    );

    let newest = &json["documents"][0];
    assert_eq!(newest["course_name"], "Algorithms");
    assert_eq!(newest["course_code"], "INF2010");
    assert_eq!(newest["major_name"], "Software");
    assert_eq!(newest["faculty_name"], "Engineering");
    assert_eq!(newest["university_name"], "Poly");
    assert_eq!(newest["uploaded_by_username"], "alice");
}

#[tokio::test]
async fn test_pagination_bounds_pages_and_reports_total() {
    let t = setup().await;
    let h = seed_course(&t.db, "Poly", "Engineering", "Software", "Algorithms", "INF2010").await;
    let token = register_and_login(&t.app, "alice@example.com", "alice").await;

    for i in 1..=5 {
        upload_titled(&t, &token, &h.course_id, &format!("Lecture {:02}", i), None).await;
    }

    let json = list(&t, "limit=2&page=1").await;
    assert_eq!(titles(&json), vec!["Lecture 05", "Lecture 04"]);
    assert_eq!(json["pagination"]["total"], 5);
    assert_eq!(json["pagination"]["pages"], 3);

    let json = list(&t, "limit=2&page=3").await;
    assert_eq!(titles(&json), vec!["Lecture 01"]);

    // Past the end: empty page, same total
    let json = list(&t, "limit=2&page=9").await;
    assert!(titles(&json).is_empty());
    assert_eq!(json["pagination"]["total"], 5);
}

#[tokio::test]
async fn test_my_uploads_lists_only_own_documents() {
    let t = setup().await;
    let h = seed_course(&t.db, "Poly", "Engineering", "Software", "Algorithms", "INF2010").await;
    let alice = register_and_login(&t.app, "alice@example.com", "alice").await;
    let bob = register_and_login(&t.app, "bob@example.com", "bob").await;

    upload_titled(&t, &alice, &h.course_id, "Alice's summary", None).await;
    upload_titled(&t, &bob, &h.course_id, "Bob's summary", None).await;

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/documents/my/uploads")
                .header("Authorization", format!("Bearer {}", alice))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["total"], 1);
    assert_eq!(json["documents"][0]["title"], "Alice's summary");
    assert_eq!(json["documents"][0]["course_code"], "INF2010");
}

#[tokio::test]
async fn test_document_detail_carries_full_hierarchy() {
    let t = setup().await;
    let h = seed_course(&t.db, "Poly", "Engineering", "Software", "Algorithms", "INF2010").await;
    let token = register_and_login(&t.app, "alice@example.com", "alice").await;

    let response = upload_pdf(
        &t.app,
        &token,
        &h.course_id,
        "Detailed notes",
        Some("With every join resolved"),
        &pdf_bytes("detail"),
    )
    .await;
    let document_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = get_document(&t.app, &document_id).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["title"], "Detailed notes");
    assert_eq!(json["course_id"], h.course_id);
    assert_eq!(json["major_id"], h.major_id);
    assert_eq!(json["faculty_id"], h.faculty_id);
    assert_eq!(json["university_id"], h.university_id);
    assert_eq!(json["university_name"], "Poly");
    assert_eq!(json["uploaded_by_username"], "alice");
    assert_eq!(json["downloads_count"], 0);
}
