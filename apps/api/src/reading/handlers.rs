//! Axum route handler for the Reading API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::reading::models::ReadingResult;
use crate::reading::request::{decode_cv, ReadingRequest};
use crate::state::AppState;

pub const BIRTH_DATE_REQUIRED: &str = "Birth date is required";

/// Raw multipart fields, before validation.
#[derive(Debug, Default)]
struct AnalyzeForm {
    birthdate: Option<String>,
    cv: Option<Bytes>,
}

async fn read_analyze_form(multipart: &mut Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Analysis(format!("unreadable form field: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("birthdate") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Analysis(format!("unreadable birthdate: {e}")))?;
                form.birthdate = Some(text);
            }
            Some("cv") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Analysis(format!("unreadable cv upload: {e}")))?;
                form.cv = Some(bytes);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// POST /analyze
///
/// Multipart body: `birthdate` (required), `cv` (optional file).
/// Returns the normalized reading, or a flat `{"error": ...}` body.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ReadingResult>, AppError> {
    let mut multipart =
        multipart.map_err(|e| AppError::Analysis(format!("invalid form body: {e}")))?;
    let form = read_analyze_form(&mut multipart).await?;

    // Validate before decoding so a missing birth date never pays for PDF extraction.
    let request = ReadingRequest::new(form.birthdate.as_deref().unwrap_or_default(), None)
        .ok_or_else(|| AppError::Validation(BIRTH_DATE_REQUIRED.to_string()))?;

    let request = match form.cv {
        Some(bytes) => request.with_cv(decode_cv(bytes).await),
        None => request,
    };

    let reading = state.readings.generate(&request).await?;

    Ok(Json(reading))
}
