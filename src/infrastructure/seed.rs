use crate::entities::{courses, faculties, majors, prelude::*, universities, users};
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use std::env;
use tracing::info;
use uuid::Uuid;

/// Seeds a default admin account and a small browsable hierarchy into an
/// empty database. Existing data is never touched.
pub async fn seed_initial_data(db: &DatabaseConnection) -> anyhow::Result<()> {
    seed_admin(db).await?;
    seed_hierarchy(db).await?;
    Ok(())
}

async fn seed_admin(db: &DatabaseConnection) -> anyhow::Result<()> {
    if Users::find().count(db).await? > 0 {
        return Ok(());
    }

    let password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin1234".to_string());
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {}", e))?
        .to_string();

    let admin = users::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        email: Set("admin@polyshare.local".to_string()),
        password_hash: Set(password_hash),
        username: Set("admin".to_string()),
        role: Set("admin".to_string()),
        karma_points: Set(0),
        university_id: Set(None),
        created_at: Set(Utc::now()),
    };
    admin.insert(db).await?;

    info!("🌱 Seeded admin account (admin@polyshare.local)");
    Ok(())
}

async fn seed_hierarchy(db: &DatabaseConnection) -> anyhow::Result<()> {
    if Universities::find().count(db).await? > 0 {
        return Ok(());
    }

    let university_id = Uuid::new_v4().to_string();
    universities::ActiveModel {
        id: Set(university_id.clone()),
        name: Set("Polytechnique Montréal".to_string()),
        city: Set(Some("Montréal".to_string())),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await?;

    let faculty_id = Uuid::new_v4().to_string();
    faculties::ActiveModel {
        id: Set(faculty_id.clone()),
        university_id: Set(university_id),
        name: Set("Génie informatique".to_string()),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await?;

    let major_id = Uuid::new_v4().to_string();
    majors::ActiveModel {
        id: Set(major_id.clone()),
        faculty_id: Set(faculty_id),
        name: Set("Génie logiciel".to_string()),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await?;

    let sample_courses = [
        ("Algorithmes et structures de données", "INF2010", 3),
        ("Bases de données", "INF3710", 5),
    ];
    for (name, code, semester) in sample_courses {
        courses::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            major_id: Set(major_id.clone()),
            name: Set(name.to_string()),
            code: Set(code.to_string()),
            semester: Set(semester),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;
    }

    info!("🌱 Seeded sample university hierarchy");
    Ok(())
}
