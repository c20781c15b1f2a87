use async_trait::async_trait;
use rand::Rng;

use super::dto::{Macronutrients, MealMetadata, Micronutrient, NutritionResult};
use super::error::AnalyzerError;
use super::photo::PhotoUpload;
use super::NutritionAnalyzer;

pub const MOCK_SUMMARY: &str = "Mock analysis: replace with live AI by setting OPENAI_API_KEY.";
pub const MOCK_RECOMMENDATIONS: [&str; 2] = [
    "Add leafy greens for extra fiber.",
    "Pair with water to stay hydrated.",
];

/// Synthesizes a plausible record without looking at the photo.
pub fn generate_mock_analysis<R: Rng + ?Sized>(rng: &mut R) -> NutritionResult {
    let calories = rng.gen_range(250..650) as f64;
    let share = |fraction: f64| (calories * fraction).round() / 10.0;

    NutritionResult {
        calories,
        macronutrients: Macronutrients {
            protein_grams: share(0.25),
            carbs_grams: share(0.45),
            fat_grams: share(0.30),
            fiber_grams: rng.gen_range(5..15) as f64,
        },
        micronutrients: vec![
            Micronutrient {
                name: "Vitamin C".into(),
                amount: format!("{} mg", rng.gen_range(10..=50)),
            },
            Micronutrient {
                name: "Iron".into(),
                amount: format!("{} mg", rng.gen_range(1..=4)),
            },
        ],
        meal_summary: MOCK_SUMMARY.into(),
        recommendations: MOCK_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockAnalyzer;

#[async_trait]
impl NutritionAnalyzer for MockAnalyzer {
    async fn analyze(
        &self,
        _photo: &PhotoUpload,
        _meta: &MealMetadata,
    ) -> Result<NutritionResult, AnalyzerError> {
        Ok(generate_mock_analysis(&mut rand::thread_rng()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use rand::{rngs::StdRng, SeedableRng};
    use time::OffsetDateTime;

    #[test]
    fn mock_output_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let r = generate_mock_analysis(&mut rng);
            assert!((250.0..650.0).contains(&r.calories), "calories {}", r.calories);
            let m = &r.macronutrients;
            for v in [m.protein_grams, m.carbs_grams, m.fat_grams, m.fiber_grams] {
                assert!(v >= 0.0);
            }
            assert!((5.0..15.0).contains(&m.fiber_grams));
            assert_eq!(r.micronutrients.len(), 2);
            assert_eq!(r.recommendations.len(), 2);
            assert_eq!(r.meal_summary, MOCK_SUMMARY);
        }
    }

    #[test]
    fn macros_are_fixed_fractions_of_calories() {
        let mut rng = StdRng::seed_from_u64(42);
        let r = generate_mock_analysis(&mut rng);
        assert_eq!(r.macronutrients.protein_grams, (r.calories * 0.25).round() / 10.0);
        assert_eq!(r.macronutrients.carbs_grams, (r.calories * 0.45).round() / 10.0);
        assert_eq!(r.macronutrients.fat_grams, (r.calories * 0.30).round() / 10.0);
        assert_eq!(r.micronutrients[0].name, "Vitamin C");
        assert_eq!(r.micronutrients[1].name, "Iron");
        assert!(r.micronutrients[1].amount.ends_with(" mg"));
    }

    #[tokio::test]
    async fn mock_analyzer_never_fails() {
        let meta = MealMetadata {
            meal_name: "Toast".into(),
            consumed_at: OffsetDateTime::now_utc(),
        };
        let photo = PhotoUpload::new(Bytes::new());
        let r = MockAnalyzer.analyze(&photo, &meta).await.expect("mock analysis");
        assert_eq!(r.recommendations.len(), 2);
    }
}
