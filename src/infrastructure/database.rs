use crate::entities::{courses, documents, downloads, faculties, majors, universities, users};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::env;
use std::time::Duration;
use tracing::info;

/// Opens the connection pool and brings the schema up to date. The returned
/// handle is the only database client in the process; it is passed into the
/// services explicitly and closed by dropping it at shutdown.
pub async fn setup_database() -> anyhow::Result<DatabaseConnection> {
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    info!("📂 Database: {}", db_url);

    let mut opt = ConnectOptions::new(&db_url);
    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt).await?;

    info!("✅ Database connected successfully");

    run_migrations(&db).await?;
    crate::infrastructure::seed::seed_initial_data(&db).await?;

    Ok(db)
}

/// Creates missing tables from the entity definitions and the indexes the
/// derive cannot express. Safe to run on every startup.
pub async fn run_migrations(db: &DatabaseConnection) -> anyhow::Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let stmts = vec![
        schema
            .create_table_from_entity(universities::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(faculties::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(majors::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(courses::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(users::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(documents::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(downloads::Entity)
            .if_not_exists()
            .to_owned(),
    ];

    for stmt in stmts {
        let stmt = builder.build(&stmt);
        db.execute(stmt).await?;
    }

    // Listing is filtered by course and ordered by recency on every page load
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_documents_course_id ON documents(course_id);",
        "CREATE INDEX IF NOT EXISTS idx_documents_created_at ON documents(created_at);",
        "CREATE INDEX IF NOT EXISTS idx_documents_uploaded_by ON documents(uploaded_by);",
    ];
    for sql in indexes {
        let _ = db
            .execute(sea_orm::Statement::from_string(builder, sql.to_string()))
            .await;
    }

    Ok(())
}
