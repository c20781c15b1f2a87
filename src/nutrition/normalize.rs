//! Maps a model's JSON answer onto [`NutritionResult`].
//!
//! All defaulting lives here:
//!
//! | field              | default                    |
//! |--------------------|----------------------------|
//! | payload absent     | [`NutritionResult::empty`] |
//! | `calories`         | `0`                        |
//! | each macronutrient | `0`                        |
//! | `micronutrients`   | `[]`                       |
//! | `mealSummary`      | [`NO_SUMMARY`]             |
//! | `recommendations`  | `[]`                       |

use serde_json::Value;

use super::dto::{Macronutrients, Micronutrient, NutritionResult};

pub const NO_ANALYSIS: &str = "No analysis available.";
pub const NO_SUMMARY: &str = "No summary provided.";

impl NutritionResult {
    /// Result used when the provider returned no payload at all.
    pub fn empty() -> Self {
        Self {
            calories: 0.0,
            macronutrients: Macronutrients::default(),
            micronutrients: Vec::new(),
            meal_summary: NO_ANALYSIS.into(),
            recommendations: Vec::new(),
        }
    }
}

pub fn normalize(payload: Option<&Value>) -> NutritionResult {
    let Some(obj) = payload.and_then(Value::as_object) else {
        return NutritionResult::empty();
    };

    let macros = obj.get("macronutrients");
    let macro_field = |key: &str| number(macros.and_then(|m| m.get(key)));

    NutritionResult {
        calories: number(obj.get("calories")),
        macronutrients: Macronutrients {
            protein_grams: macro_field("proteinGrams"),
            carbs_grams: macro_field("carbsGrams"),
            fat_grams: macro_field("fatGrams"),
            fiber_grams: macro_field("fiberGrams"),
        },
        micronutrients: obj
            .get("micronutrients")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(micronutrient).collect())
            .unwrap_or_default(),
        meal_summary: obj
            .get("mealSummary")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(NO_SUMMARY)
            .to_string(),
        recommendations: obj
            .get("recommendations")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Non-negative finite number; numeric strings are accepted, anything else is 0.
fn number(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite() && *n > 0.0).unwrap_or(0.0)
}

fn micronutrient(value: &Value) -> Option<Micronutrient> {
    let name = value.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let amount = match value.get("amount") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    Some(Micronutrient {
        name: name.to_string(),
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_payload_uses_empty_result() {
        let r = normalize(None);
        assert_eq!(r, NutritionResult::empty());
        assert_eq!(r.meal_summary, NO_ANALYSIS);

        let r = normalize(Some(&json!("not an object")));
        assert_eq!(r.meal_summary, NO_ANALYSIS);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let payload = json!({
            "calories": 540,
            "macronutrients": { "proteinGrams": 30, "carbsGrams": 55.5, "fatGrams": 18, "fiberGrams": 7 },
            "mealSummary": "Grilled chicken with rice."
        });
        let r = normalize(Some(&payload));
        assert_eq!(r.calories, 540.0);
        assert_eq!(r.macronutrients.carbs_grams, 55.5);
        assert!(r.micronutrients.is_empty());
        assert!(r.recommendations.is_empty());
        assert_eq!(r.meal_summary, "Grilled chicken with rice.");
    }

    #[test]
    fn missing_macros_and_summary_take_defaults() {
        let payload = json!({
            "calories": 300,
            "macronutrients": { "proteinGrams": 12 },
            "recommendations": ["Eat slower."]
        });
        let r = normalize(Some(&payload));
        assert_eq!(r.macronutrients.protein_grams, 12.0);
        assert_eq!(r.macronutrients.carbs_grams, 0.0);
        assert_eq!(r.macronutrients.fat_grams, 0.0);
        assert_eq!(r.macronutrients.fiber_grams, 0.0);
        assert_eq!(r.meal_summary, NO_SUMMARY);
        assert_eq!(r.recommendations, vec!["Eat slower.".to_string()]);
    }

    #[test]
    fn coerces_loosely_typed_fields() {
        let payload = json!({
            "calories": "410",
            "macronutrients": { "proteinGrams": -3, "carbsGrams": "lots", "fatGrams": null },
            "micronutrients": [
                { "name": "Iron", "amount": 2 },
                { "name": "Zinc", "amount": "1 mg" },
                { "amount": "5 mg" },
                "Vitamin D"
            ],
            "recommendations": ["Add fruit.", 42, null]
        });
        let r = normalize(Some(&payload));
        assert_eq!(r.calories, 410.0);
        assert_eq!(r.macronutrients.protein_grams, 0.0);
        assert_eq!(r.macronutrients.carbs_grams, 0.0);
        assert_eq!(r.micronutrients.len(), 2);
        assert_eq!(r.micronutrients[0].amount, "2");
        assert_eq!(r.micronutrients[1].name, "Zinc");
        assert_eq!(r.recommendations, vec!["Add fruit.".to_string()]);
    }
}
