//! Axum route handlers for the search pipeline. One request is one button press.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extraction::ResumeDocument;
use crate::models::job::SearchOutcome;
use crate::pipeline::{run_resume_search, run_skills_search};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const EMAIL_FIELD: &str = "email";

#[derive(Debug, Deserialize)]
pub struct SkillsSearchRequest {
    pub skills: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// POST /api/v1/search/resume
///
/// Multipart form: a `resume` file part (PDF or DOCX) and an optional `email` text part.
pub async fn handle_resume_search(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SearchOutcome>, AppError> {
    let mut document: Option<ResumeDocument> = None;
    let mut email: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, "invalid upload"))?
    {
        let name = field.name().map(String::from);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let file_name = field.file_name().map(String::from);
                let content_type = field.content_type().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| upload_error(e, "could not read résumé"))?;
                // Browsers send an empty part when no file was picked.
                if bytes.is_empty() {
                    continue;
                }
                document = Some(ResumeDocument {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            Some(EMAIL_FIELD) => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| upload_error(e, "could not read email"))?;
                email = non_blank(Some(value));
            }
            _ => {}
        }
    }

    let document =
        document.ok_or_else(|| AppError::Validation("a résumé file is required".to_string()))?;

    let outcome = run_resume_search(&state, document, email).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/search/skills
///
/// Manual entry: the skills text is searched as typed.
pub async fn handle_skills_search(
    State(state): State<AppState>,
    Json(request): Json<SkillsSearchRequest>,
) -> Result<Json<SearchOutcome>, AppError> {
    let outcome = run_skills_search(&state, &request.skills, non_blank(request.email)).await?;
    Ok(Json(outcome))
}

/// Body-limit hits become 413; anything else is a malformed form.
fn upload_error(err: MultipartError, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_request_email_is_optional() {
        let request: SkillsSearchRequest =
            serde_json::from_value(serde_json::json!({"skills": "Rust"})).unwrap();
        assert_eq!(request.skills, "Rust");
        assert!(request.email.is_none());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" a@b.c ".into())).as_deref(), Some("a@b.c"));
        assert!(non_blank(Some("   ".into())).is_none());
        assert!(non_blank(None).is_none());
    }
}
