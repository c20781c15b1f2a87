use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, instrument};

use super::dto::{AnalyzeForm, Entry};
use super::services::create_entry;
use crate::error::AppError;
use crate::nutrition::PhotoUpload;
use crate::state::AppState;

pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;
// room for the text fields and multipart framing on top of the photo
const MAX_BODY_BYTES: usize = MAX_PHOTO_BYTES + 256 * 1024;

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/entries", get(list_entries))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/entries/analyze", post(analyze_entry))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, AppError> {
    let entries = state.store.load().await?;
    Ok(Json(entries))
}

/// POST /entries/analyze (multipart)
/// Fields: `photo` (required file), `mealName`, `consumedAt`.
#[instrument(skip(state, mp))]
pub async fn analyze_entry(
    State(state): State<AppState>,
    mp: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let mut mp = mp?;
    let mut photo: Option<PhotoUpload> = None;
    let mut form = AnalyzeForm::default();

    while let Some(field) = mp.next_field().await? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("photo") => {
                let content_type = field.content_type().map(|s| s.to_string());
                let file_name = field.file_name().map(|s| s.to_string());
                let body = field.bytes().await?;
                if body.len() > MAX_PHOTO_BYTES {
                    return Err(AppError::PayloadTooLarge(format!(
                        "Photo exceeds the {} MiB upload limit.",
                        MAX_PHOTO_BYTES / (1024 * 1024)
                    )));
                }
                if !body.is_empty() {
                    photo = Some(PhotoUpload {
                        body,
                        content_type,
                        file_name,
                    });
                }
            }
            Some("mealName") => form.meal_name = Some(field.text().await?),
            Some("consumedAt") => form.consumed_at = Some(field.text().await?),
            other => debug!(field = ?other, "ignoring multipart field"),
        }
    }

    let Some(photo) = photo else {
        return Err(AppError::Validation(
            "Please include a food photo in the \"photo\" field.".into(),
        ));
    };

    let entry = create_entry(&state, photo, form).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn api_not_found() -> AppError {
    AppError::NotFound
}
