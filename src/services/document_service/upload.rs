use crate::api::error::AppError;
use crate::entities::{documents, prelude::*};
use crate::services::fingerprint::fingerprint;
use crate::services::karma::KarmaLedger;
use crate::utils::validation::validate_upload;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use uuid::Uuid;

use super::DocumentService;

pub struct NewDocument {
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl DocumentService {
    /// Uploads a document: validate, fingerprint, reject duplicates, stage
    /// the file, then insert the record and credit the uploader inside one
    /// transaction. Any failure after the storage write removes the staged
    /// file again, so a failed upload leaves nothing behind.
    pub async fn upload(
        &self,
        uploader_id: &str,
        input: NewDocument,
    ) -> Result<documents::Model, AppError> {
        let (title, description) = validate_upload(
            &input.title,
            input.description.as_deref(),
            input.content_type.as_deref(),
            &input.bytes,
            self.config.max_file_size,
        )
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Courses::find_by_id(&input.course_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        let hash = fingerprint(&input.bytes);

        let duplicate = Documents::find()
            .filter(documents::Column::FileHash.eq(&hash))
            .one(&self.db)
            .await?;
        if duplicate.is_some() {
            return Err(AppError::Conflict(
                "This file has already been uploaded".to_string(),
            ));
        }

        let stored = self
            .storage
            .write(&input.bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Storage write failed: {}", e)))?;

        let result = self
            .insert_document(
                uploader_id,
                &input.course_id,
                title,
                description,
                &hash,
                stored.key.clone(),
                stored.size,
            )
            .await;

        match result {
            Ok(doc) => Ok(doc),
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&stored.key).await {
                    tracing::error!("Failed to clean up staged file {}: {}", stored.key, cleanup);
                }
                Err(e)
            }
        }
    }

    async fn insert_document(
        &self,
        uploader_id: &str,
        course_id: &str,
        title: String,
        description: Option<String>,
        hash: &str,
        file_key: String,
        file_size: i64,
    ) -> Result<documents::Model, AppError> {
        let txn = self.db.begin().await?;

        let document = documents::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(title),
            description: Set(description),
            course_id: Set(course_id.to_string()),
            uploaded_by: Set(Some(uploader_id.to_string())),
            file_key: Set(file_key),
            file_size: Set(file_size),
            file_hash: Set(hash.to_string()),
            downloads_count: Set(0),
            status: Set(documents::STATUS_APPROVED.to_string()),
            created_at: Set(Utc::now()),
        };

        let document = match document.insert(&txn).await {
            Ok(doc) => doc,
            Err(e) if is_unique_violation(&e) => {
                // Lost the race: a concurrent request inserted the same
                // fingerprint between our duplicate check and this insert.
                tracing::warn!("Duplicate fingerprint detected during insert");
                return Err(AppError::Conflict(
                    "This file has already been uploaded".to_string(),
                ));
            }
            Err(e) => return Err(AppError::Database(e)),
        };

        KarmaLedger::credit_upload(&txn, uploader_id).await?;

        txn.commit().await?;
        Ok(document)
    }
}

pub(super) fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("23505") || msg.contains("2067") || msg.contains("duplicate") || msg.contains("UNIQUE")
}
