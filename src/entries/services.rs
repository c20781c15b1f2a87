use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use super::dto::{AnalyzeForm, Entry, DEFAULT_MEAL_NAME};
use crate::error::AppError;
use crate::nutrition::{MealMetadata, PhotoUpload};
use crate::state::AppState;

/// Applies form defaults: blank name becomes the placeholder (a non-blank
/// name is kept as sent), blank
/// `consumedAt` becomes `now`, anything else must be RFC 3339.
pub fn meal_metadata(form: AnalyzeForm, now: OffsetDateTime) -> Result<MealMetadata, AppError> {
    let meal_name = form
        .meal_name
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MEAL_NAME.to_string());

    let consumed_at = match form.consumed_at.as_deref().map(str::trim) {
        None | Some("") => now,
        Some(raw) => OffsetDateTime::parse(raw, &Rfc3339).map_err(|_| {
            AppError::Validation(format!(
                "consumedAt must be an ISO-8601 timestamp, got {raw:?}"
            ))
        })?,
    };

    Ok(MealMetadata {
        meal_name,
        consumed_at,
    })
}

/// Analyzes the photo, then load → prepend → save.
///
/// The read-modify-write is not guarded: two requests interleaving here
/// both read the same list and the later `save` drops the other's entry.
pub async fn create_entry(
    state: &AppState,
    photo: PhotoUpload,
    form: AnalyzeForm,
) -> Result<Entry, AppError> {
    let now = OffsetDateTime::now_utc();
    let meta = meal_metadata(form, now)?;

    let analysis = state.analyzer.analyze(&photo, &meta).await?;

    let entry = Entry {
        id: Uuid::new_v4(),
        meal_name: meta.meal_name,
        consumed_at: meta.consumed_at,
        analysis,
        created_at: OffsetDateTime::now_utc(),
    };

    let mut entries = state.store.load().await?;
    entries.insert(0, entry.clone());
    state.store.save(&entries).await?;

    info!(entry_id = %entry.id, meal = %entry.meal_name, calories = entry.analysis.calories, "entry created");
    Ok(entry)
}
