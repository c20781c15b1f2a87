use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Macronutrients {
    #[serde(default)]
    pub protein_grams: f64,
    #[serde(default)]
    pub carbs_grams: f64,
    #[serde(default)]
    pub fat_grams: f64,
    #[serde(default)]
    pub fiber_grams: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Micronutrient {
    pub name: String,
    pub amount: String,
}

/// Analyzer output, flattened into every stored entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionResult {
    pub calories: f64,
    #[serde(default)]
    pub macronutrients: Macronutrients,
    #[serde(default)]
    pub micronutrients: Vec<Micronutrient>,
    pub meal_summary: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Form metadata that accompanies a photo.
#[derive(Debug, Clone)]
pub struct MealMetadata {
    pub meal_name: String,
    pub consumed_at: OffsetDateTime,
}
