use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use super::dto::{MealMetadata, NutritionResult};
use super::error::AnalyzerError;
use super::normalize::normalize;
use super::photo::PhotoUpload;
use super::NutritionAnalyzer;
use crate::config::OpenAiConfig;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Calls a vision-capable model through the provider's `/responses` endpoint.
#[derive(Clone)]
pub struct OpenAiAnalyzer {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiAnalyzer {
    pub fn new(config: &OpenAiConfig) -> anyhow::Result<Self> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    pub(crate) fn with_timeout(config: &OpenAiConfig, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    fn build_payload(&self, photo: &PhotoUpload, meta: &MealMetadata) -> Value {
        let image_url = format!(
            "data:{};base64,{}",
            photo.mime_type(),
            STANDARD.encode(&photo.body)
        );
        let label = if meta.meal_name.trim().is_empty() {
            "Meal"
        } else {
            meta.meal_name.as_str()
        };

        json!({
            "model": self.model,
            "input": [
                { "role": "system", "content": system_prompt(label) },
                {
                    "role": "user",
                    "content": [
                        { "type": "input_text", "text": label },
                        { "type": "input_image", "image_url": image_url }
                    ]
                }
            ],
            "text": {
                "format": {
                    "type": "json_schema",
                    "name": "nutrition_schema",
                    "schema": nutrition_schema()
                }
            }
        })
    }
}

#[async_trait]
impl NutritionAnalyzer for OpenAiAnalyzer {
    #[instrument(skip_all, fields(meal = %meta.meal_name, bytes = photo.body.len()))]
    async fn analyze(
        &self,
        photo: &PhotoUpload,
        meta: &MealMetadata,
    ) -> Result<NutritionResult, AnalyzerError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(AnalyzerError::Configuration(
                "Missing OPENAI_API_KEY environment variable".into(),
            ));
        };

        let payload = self.build_payload(photo, meta);
        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let details = serde_json::from_str(&body).unwrap_or(Value::String(body));
            warn!(%status, "nutrition provider rejected request");
            return Err(AnalyzerError::Status { status, details });
        }

        // a body that is not JSON is bad provider output, not a transport failure
        let raw = res.bytes().await?;
        let data: Value = serde_json::from_slice(&raw)?;
        let parsed = match first_output_text(&data) {
            Some(text) => Some(serde_json::from_str::<Value>(text)?),
            None => {
                debug!("provider response carried no text output");
                None
            }
        };
        let result = normalize(parsed.as_ref());
        info!(calories = result.calories, "meal analyzed");
        Ok(result)
    }
}

/// First `text` found in `output[*].content[*]`.
fn first_output_text(data: &Value) -> Option<&str> {
    data.get("output")?
        .as_array()?
        .iter()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .find_map(|part| part.get("text").and_then(Value::as_str))
}

fn system_prompt(meal_name: &str) -> String {
    format!(
        r#"You are an elite nutritionist.
You will receive a user-uploaded food image and metadata about the meal.
Return a strict JSON object with:
{{
  "calories": number,
  "macronutrients": {{
    "proteinGrams": number,
    "carbsGrams": number,
    "fatGrams": number,
    "fiberGrams": number
  }},
  "micronutrients": [ {{ "name": string, "amount": string }} ],
  "mealSummary": string,
  "recommendations": string[]
}}
Keep values realistic and reflect portion sizes.
Meal label: {meal_name}.
"#
    )
}

fn nutrition_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "calories": { "type": "number" },
            "macronutrients": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "proteinGrams": { "type": "number" },
                    "carbsGrams": { "type": "number" },
                    "fatGrams": { "type": "number" },
                    "fiberGrams": { "type": "number" }
                },
                "required": ["proteinGrams", "carbsGrams", "fatGrams", "fiberGrams"]
            },
            "micronutrients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "name": { "type": "string" },
                        "amount": { "type": "string" }
                    },
                    "required": ["name", "amount"]
                }
            },
            "mealSummary": { "type": "string" },
            "recommendations": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["calories", "macronutrients", "micronutrients", "mealSummary", "recommendations"]
    })
}
