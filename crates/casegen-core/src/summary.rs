//! Human-readable test case summaries

use crate::config::SummaryEngine;

/// Render a summary for an operation's test case.
///
/// Uses the spec's own summary when present, otherwise a per-method
/// template. The NLP engines are accepted for config compatibility but
/// render with the basic template.
#[must_use]
pub fn summarize(engine: SummaryEngine, method: &str, path: &str, base: Option<&str>) -> String {
    match engine {
        SummaryEngine::Basic | SummaryEngine::LocalNlp | SummaryEngine::ExternalApi => {
            basic_summary(method, path, base)
        }
    }
}

fn basic_summary(method: &str, path: &str, base: Option<&str>) -> String {
    if let Some(text) = base {
        if !text.is_empty() {
            return text.to_string();
        }
    }

    match method {
        "POST" => format!(
            "Validate that creating a resource at {path} succeeds and the response includes the created resource."
        ),
        "GET" => format!(
            "Validate that retrieving data from {path} succeeds and the response contains the expected fields."
        ),
        "PUT" => format!(
            "Validate that updating the resource at {path} succeeds and the updated values are returned."
        ),
        "DELETE" => format!(
            "Validate that deleting the resource at {path} succeeds and the resource is no longer retrievable."
        ),
        other => format!("Validate that the {other} request to {path} returns a successful response."),
    }
}
