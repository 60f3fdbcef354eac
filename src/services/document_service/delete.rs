use crate::api::error::AppError;
use crate::entities::{prelude::*, users};
use crate::services::karma::KarmaLedger;
use sea_orm::{EntityTrait, TransactionTrait};

use super::DocumentService;

impl DocumentService {
    /// Deletes a document. Only the uploader or an admin may do this. The
    /// stored file goes first — its absence is tolerated and a removal
    /// failure is logged without blocking the record deletion. The record
    /// delete and the uploader's clamped karma debit commit together.
    pub async fn delete(&self, caller: &users::Model, document_id: &str) -> Result<(), AppError> {
        let document = Documents::find_by_id(document_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

        let is_owner = document.uploaded_by.as_deref() == Some(caller.id.as_str());
        if !is_owner && !caller.is_admin() {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this document".to_string(),
            ));
        }

        if let Err(e) = self.storage.delete(&document.file_key).await {
            tracing::warn!(
                "Failed to remove stored file {}: {}",
                document.file_key,
                e
            );
        }

        let txn = self.db.begin().await?;

        Documents::delete_by_id(&document.id).exec(&txn).await?;

        if let Some(uploader_id) = &document.uploaded_by {
            KarmaLedger::debit_delete(&txn, uploader_id).await?;
        }

        txn.commit().await?;
        Ok(())
    }
}
