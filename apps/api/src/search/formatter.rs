//! Result Formatter — flattens a raw search response into display records.

use serde_json::Value;
use tracing::warn;

use crate::models::job::JobResult;

const ORGANIC_KEY: &str = "organic";
const DEFAULT_TITLE: &str = "Untitled";
const DEFAULT_LINK: &str = "#";
const DEFAULT_SNIPPET: &str = "";

/// Formatter output. A malformed response yields no jobs and a warning, never an error.
#[derive(Debug, Default, PartialEq)]
pub struct FormattedResults {
    pub jobs: Vec<JobResult>,
    pub warning: Option<String>,
}

/// Maps the `organic` entries of a search response to [`JobResult`]s in response order.
///
/// A missing `organic` key means no jobs were found.
pub fn format_results(raw: &Value) -> FormattedResults {
    let Some(organic) = raw.get(ORGANIC_KEY) else {
        return FormattedResults::default();
    };

    match parse_organic(organic) {
        Ok(jobs) => FormattedResults { jobs, warning: None },
        Err(reason) => {
            warn!("Discarding malformed search results: {reason}");
            FormattedResults {
                jobs: Vec::new(),
                warning: Some(format!("Could not read the search results: {reason}")),
            }
        }
    }
}

fn parse_organic(organic: &Value) -> Result<Vec<JobResult>, String> {
    let entries = organic
        .as_array()
        .ok_or_else(|| format!("'{ORGANIC_KEY}' is not a list"))?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if !entry.is_object() {
                return Err(format!("result {} is not an object", i + 1));
            }
            Ok(JobResult {
                title: string_field(entry, "title", DEFAULT_TITLE, i)?,
                link: string_field(entry, "link", DEFAULT_LINK, i)?,
                snippet: string_field(entry, "snippet", DEFAULT_SNIPPET, i)?,
            })
        })
        .collect()
}

/// Absent or null fields take the default; any other non-string is malformed.
fn string_field(entry: &Value, key: &str, default: &str, index: usize) -> Result<String, String> {
    match entry.get(key) {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(format!("field '{key}' of result {} is not text", index + 1)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_organic_key_is_empty_without_warning() {
        let formatted = format_results(&json!({"searchParameters": {"q": "rust"}}));
        assert!(formatted.jobs.is_empty());
        assert!(formatted.warning.is_none());
    }

    #[test]
    fn test_entries_kept_in_response_order() {
        let raw = json!({"organic": [
            {"title": "Rust Engineer", "link": "https://jobs.example/1", "snippet": "Remote, EU"},
            {"title": "Go Developer", "link": "https://jobs.example/2", "snippet": "Remote, US"},
            {"title": "Rust Engineer", "link": "https://jobs.example/1", "snippet": "Remote, EU"}
        ]});
        let formatted = format_results(&raw);
        let titles: Vec<_> = formatted.jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Rust Engineer", "Go Developer", "Rust Engineer"]);
        assert_eq!(formatted.jobs[1].link, "https://jobs.example/2");
        assert!(formatted.warning.is_none());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let raw = json!({"organic": [
            {"link": "https://a", "snippet": "s"},
            {"title": "t", "snippet": "s"},
            {"title": "t", "link": "https://c"},
            {"title": null}
        ]});
        let jobs = format_results(&raw).jobs;
        assert_eq!(jobs.len(), 4);
        assert_eq!(jobs[0].title, "Untitled");
        assert_eq!(jobs[1].link, "#");
        assert_eq!(jobs[2].snippet, "");
        assert_eq!(
            jobs[3],
            JobResult {
                title: "Untitled".to_string(),
                link: "#".to_string(),
                snippet: String::new(),
            }
        );
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let raw = json!({"organic": [
            {"title": "t", "link": "l", "snippet": "s", "position": 1, "sitelinks": []}
        ]});
        assert_eq!(format_results(&raw).jobs.len(), 1);
    }

    #[test]
    fn test_organic_not_a_list_is_nonfatal() {
        let formatted = format_results(&json!({"organic": {"title": "x"}}));
        assert!(formatted.jobs.is_empty());
        assert!(formatted.warning.unwrap().contains("not a list"));
    }

    #[test]
    fn test_non_object_entry_is_nonfatal() {
        let formatted = format_results(&json!({"organic": [{"title": "ok"}, "oops"]}));
        assert!(formatted.jobs.is_empty());
        assert!(formatted.warning.unwrap().contains("result 2"));
    }

    #[test]
    fn test_non_text_field_is_nonfatal() {
        let formatted = format_results(&json!({"organic": [{"title": 42}]}));
        assert!(formatted.jobs.is_empty());
        assert!(formatted.warning.is_some());
    }

    #[test]
    fn test_empty_organic_list() {
        let formatted = format_results(&json!({"organic": []}));
        assert_eq!(formatted, FormattedResults::default());
    }
}
