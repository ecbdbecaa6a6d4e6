use std::sync::Arc;

use crate::llm_client::Summarizer;
use crate::search::{JobSearch, QueryPolicy};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Nothing here is mutated by a run; each request is independent.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable summarizer. Default: `LlmClient` against the configured chat endpoint.
    pub summarizer: Arc<dyn Summarizer>,
    /// Pluggable search backend. Default: `SearchClient`.
    pub job_search: Arc<dyn JobSearch>,
    pub query_policy: QueryPolicy,
    pub max_upload_bytes: usize,
}
