use crate::config::AppConfig;
use crate::services::storage::StorageService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub mod delete;
pub mod download;
pub mod query;
pub mod types;
pub mod upload;

pub use types::{DocumentDetail, DocumentFilter, DocumentPage, DocumentSummary, OwnedDocument};
pub use upload::NewDocument;

/// Orchestrates the document catalog: upload with duplicate detection,
/// filtered listing, download recording, and deletion. All karma movements
/// happen inside the same transaction as their triggering event.
pub struct DocumentService {
    db: DatabaseConnection,
    storage: Arc<dyn StorageService>,
    config: AppConfig,
}

impl DocumentService {
    pub fn new(db: DatabaseConnection, storage: Arc<dyn StorageService>, config: AppConfig) -> Self {
        Self { db, storage, config }
    }
}
