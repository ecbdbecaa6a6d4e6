use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One job posting as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Everything a single pipeline run renders back to the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub run_id: Uuid,
    /// Echoed for display only; never validated or stored.
    pub email: Option<String>,
    /// `None` on the manual skills path, where nothing is summarized.
    pub synopsis: Option<String>,
    pub query: String,
    pub truncated: bool,
    pub warnings: Vec<String>,
    pub jobs: Vec<JobResult>,
    pub completed_at: DateTime<Utc>,
}
