use crate::api::error::AppError;
use crate::entities::{documents, downloads, prelude::*};
use crate::services::karma::{DOWNLOAD_COST, KarmaLedger};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};

use super::DocumentService;

impl DocumentService {
    /// Records a download. The (user, document) record is inserted at most
    /// once, but the document counter and the karma debit apply on every
    /// call — a repeat download costs karma again. The caller's balance is
    /// checked fresh before any effect.
    pub async fn record_download(&self, user_id: &str, document_id: &str) -> Result<(), AppError> {
        let document = Documents::find_by_id(document_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

        let user = Users::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        if user.karma_points < DOWNLOAD_COST {
            return Err(AppError::InsufficientKarma(
                "Not enough karma. Upload a document to earn points!".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let already_recorded = Downloads::find_by_id((user.id.clone(), document.id.clone()))
            .one(&txn)
            .await?
            .is_some();

        if !already_recorded {
            downloads::ActiveModel {
                user_id: Set(user.id.clone()),
                document_id: Set(document.id.clone()),
                downloaded_at: Set(Utc::now()),
            }
            .insert(&txn)
            .await?;
        }

        Documents::update_many()
            .col_expr(
                documents::Column::DownloadsCount,
                Expr::col(documents::Column::DownloadsCount).add(1),
            )
            .filter(documents::Column::Id.eq(&document.id))
            .exec(&txn)
            .await?;

        KarmaLedger::debit_download(&txn, &user.id).await?;

        txn.commit().await?;
        Ok(())
    }
}
