use crate::config::AppConfig;
use crate::nutrition::{analyzer_from_config, NutritionAnalyzer};
use crate::storage::{EntryStore, JsonFileStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn EntryStore>,
    pub analyzer: Arc<dyn NutritionAnalyzer>,
}

impl AppState {
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);
        let store = Arc::new(JsonFileStore::new(&config.data_path)) as Arc<dyn EntryStore>;
        let analyzer = analyzer_from_config(&config)?;
        Ok(Self {
            config,
            store,
            analyzer,
        })
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn EntryStore>,
        analyzer: Arc<dyn NutritionAnalyzer>,
    ) -> Self {
        Self {
            config,
            store,
            analyzer,
        }
    }
}
