use crate::config::AppConfig;
use crate::services::storage::LocalStorageService;
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &AppConfig) -> anyhow::Result<Arc<LocalStorageService>> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    info!("🗄️  Local storage: {}", config.upload_dir);

    Ok(Arc::new(LocalStorageService::new(&config.upload_dir)))
}
