//! The résumé-to-jobs pipeline: extract → summarize → search → format.
//!
//! Each call is one linear run triggered by one user action. Any stage failure
//! halts the run; truncation and unreadable search results only add warnings.

pub mod handlers;

use chrono::Utc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_text, ResumeDocument};
use crate::models::job::SearchOutcome;
use crate::search::formatter::format_results;
use crate::search::SearchQuery;
use crate::state::AppState;

/// Upload path: the résumé is extracted and summarized, and the synopsis seeds
/// the query (with the configured prefix).
pub async fn run_resume_search(
    state: &AppState,
    document: ResumeDocument,
    email: Option<String>,
) -> Result<SearchOutcome, AppError> {
    let run_id = Uuid::new_v4();

    async move {
        info!(file_name = ?document.file_name, content_type = ?document.content_type, "Extracting résumé text");
        let text = extract_text(&document).await?;

        info!(chars = text.chars().count(), "Summarizing résumé");
        let synopsis = state.summarizer.summarize(&text).await?;
        info!(%synopsis, "Synopsis ready");

        let query = state.query_policy.build(&synopsis, true);
        search_and_format(state, run_id, email, Some(synopsis), query).await
    }
    .instrument(info_span!("resume_search", %run_id))
    .await
}

/// Manual path: the entered skills text is the query, verbatim apart from truncation.
pub async fn run_skills_search(
    state: &AppState,
    skills: &str,
    email: Option<String>,
) -> Result<SearchOutcome, AppError> {
    if skills.trim().is_empty() {
        return Err(AppError::Validation("skills cannot be empty".to_string()));
    }

    let run_id = Uuid::new_v4();
    let query = state.query_policy.build(skills, false);

    search_and_format(state, run_id, email, None, query)
        .instrument(info_span!("skills_search", %run_id))
        .await
}

async fn search_and_format(
    state: &AppState,
    run_id: Uuid,
    email: Option<String>,
    synopsis: Option<String>,
    query: SearchQuery,
) -> Result<SearchOutcome, AppError> {
    let mut warnings = Vec::new();

    if let Some(warning) = query.truncation_warning(state.query_policy.max_chars) {
        warn!(max_chars = state.query_policy.max_chars, "Search query truncated");
        warnings.push(warning);
    }

    info!(query_chars = query.text.chars().count(), "Searching for jobs");
    let raw = state.job_search.search(&query).await?;

    let formatted = format_results(&raw);
    warnings.extend(formatted.warning);
    if formatted.jobs.is_empty() {
        info!("No jobs found");
    } else {
        info!(count = formatted.jobs.len(), "Jobs found");
    }

    Ok(SearchOutcome {
        run_id,
        email,
        synopsis,
        query: query.text,
        truncated: query.truncated,
        warnings,
        jobs: formatted.jobs,
        completed_at: Utc::now(),
    })
}
