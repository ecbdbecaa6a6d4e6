//! Search query assembly: optional keyword prefix plus a hard character budget.

/// How queries are assembled before they reach the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPolicy {
    /// Keyword placed in front of summarizer-derived queries, e.g. `remote`.
    pub prefix: Option<String>,
    /// Maximum query length in characters, prefix included.
    pub max_chars: usize,
}

/// The query actually sent to the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub truncated: bool,
}

impl SearchQuery {
    /// User-facing warning when the query had to be cut.
    pub fn truncation_warning(&self, max_chars: usize) -> Option<String> {
        self.truncated.then(|| {
            format!("The search query exceeded {max_chars} characters and was truncated.")
        })
    }
}

impl QueryPolicy {
    /// Builds a query from `text`, prepending the prefix when `with_prefix` is set.
    ///
    /// Length is counted in characters. Truncation cuts at exactly `max_chars`
    /// regardless of word boundaries.
    pub fn build(&self, text: &str, with_prefix: bool) -> SearchQuery {
        let full = match self.prefix.as_deref() {
            Some(prefix) if with_prefix => format!("{prefix} {text}"),
            _ => text.to_string(),
        };

        match full.char_indices().nth(self.max_chars) {
            Some((cut, _)) => SearchQuery {
                text: full[..cut].to_string(),
                truncated: true,
            },
            None => SearchQuery {
                text: full,
                truncated: false,
            },
        }
    }
}
