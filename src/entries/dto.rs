use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::NutritionResult;

pub const DEFAULT_MEAL_NAME: &str = "Untitled Meal";

/// One persisted meal record; never mutated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    pub meal_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub consumed_at: OffsetDateTime,
    #[serde(flatten)]
    pub analysis: NutritionResult,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Text fields of the analyze form, before defaulting.
#[derive(Debug, Default)]
pub struct AnalyzeForm {
    pub meal_name: Option<String>,
    pub consumed_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::Macronutrients;
    use time::macros::datetime;

    #[test]
    fn entry_serializes_flat_camel_case() {
        let entry = Entry {
            id: Uuid::nil(),
            meal_name: "Oatmeal".into(),
            consumed_at: datetime!(2024-03-02 08:00:00 UTC),
            analysis: NutritionResult {
                calories: 320.0,
                macronutrients: Macronutrients {
                    protein_grams: 8.0,
                    carbs_grams: 14.4,
                    fat_grams: 9.6,
                    fiber_grams: 6.0,
                },
                micronutrients: vec![],
                meal_summary: "Warm oats.".into(),
                recommendations: vec![],
            },
            created_at: datetime!(2024-03-02 08:05:00 UTC),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["mealName"], "Oatmeal");
        assert_eq!(json["consumedAt"], "2024-03-02T08:00:00Z");
        assert_eq!(json["createdAt"], "2024-03-02T08:05:00Z");
        assert_eq!(json["calories"], 320.0);
        assert_eq!(json["macronutrients"]["carbsGrams"], 14.4);
        assert_eq!(json["mealSummary"], "Warm oats.");
        assert!(json.get("analysis").is_none());
    }

    #[test]
    fn missing_macro_values_default_to_zero() {
        let raw = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "mealName": "Toast",
            "consumedAt": "2024-03-02T08:00:00.000Z",
            "calories": 200,
            "macronutrients": { "proteinGrams": 5 },
            "mealSummary": "Plain toast.",
            "createdAt": "2024-03-02T08:00:01.000Z"
        }"#;
        let entry: Entry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.analysis.macronutrients.protein_grams, 5.0);
        assert_eq!(entry.analysis.macronutrients.fat_grams, 0.0);
        assert!(entry.analysis.micronutrients.is_empty());
        assert!(entry.analysis.recommendations.is_empty());
    }
}
