use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::database::DatabaseManager;
use crate::store::{AuctionStore, MemoryStore, PostgresStore};

/// 핸들러 공유 상태
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn AuctionStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn AuctionStore>) -> Arc<Self> {
        Arc::new(Self { config, store })
    }

    /// DATABASE_URL 이 있으면 PostgreSQL, 없으면 인메모리 저장소
    pub async fn from_config(config: Config) -> Result<Arc<Self>, sqlx::Error> {
        let store: Arc<dyn AuctionStore> = match config.database_url.as_deref() {
            Some(database_url) => {
                let db_manager = Arc::new(DatabaseManager::new(database_url, &config).await?);
                db_manager.initialize_database(config.reset_database).await?;
                info!("{:<12} --> 데이터베이스 초기화 성공", "State");
                Arc::new(PostgresStore::new(db_manager))
            }
            None => {
                warn!(
                    "{:<12} --> DATABASE_URL 없음: 인메모리 저장소 사용 (재시작 시 데이터 유실)",
                    "State"
                );
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::new(config, store))
    }
}
