pub mod dto;
pub mod error;
pub mod mock;
pub mod normalize;
pub mod openai;
pub mod photo;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;

pub use dto::{Macronutrients, MealMetadata, Micronutrient, NutritionResult};
pub use error::AnalyzerError;
pub use mock::MockAnalyzer;
pub use openai::OpenAiAnalyzer;
pub use photo::PhotoUpload;

/// Estimates the nutrition of a meal photo.
#[async_trait]
pub trait NutritionAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        photo: &PhotoUpload,
        meta: &MealMetadata,
    ) -> Result<NutritionResult, AnalyzerError>;
}

/// Mock analyzer when forced or when no credential is configured, live otherwise.
pub fn analyzer_from_config(config: &AppConfig) -> anyhow::Result<Arc<dyn NutritionAnalyzer>> {
    if config.mock_mode() {
        tracing::info!(
            forced = config.use_mock_ai,
            "using mock nutrition analysis"
        );
        return Ok(Arc::new(MockAnalyzer));
    }
    tracing::info!(
        model = %config.openai.model,
        base_url = %config.openai.base_url,
        "using live nutrition analysis"
    );
    Ok(Arc::new(OpenAiAnalyzer::new(&config.openai)?))
}
