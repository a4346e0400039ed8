//! CSV export - one row per test case

use crate::case::TestSuite;

const HEADER: &str = "path,method,summary,parameters,assertions,expected_status,negatives";

/// Render the suite as CSV text.
#[must_use]
pub fn to_csv(suite: &TestSuite) -> String {
    let mut lines = Vec::new();
    lines.push(HEADER.to_string());

    for case in &suite.cases {
        let parameters = if case.parameters.is_empty() {
            "N/A".to_string()
        } else {
            case.parameters
                .iter()
                .map(|p| format!("{}({})", p.name, p.location))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let assertions = if case.assertions.is_empty() {
            "N/A".to_string()
        } else {
            case.assertions
                .iter()
                .map(|a| a.label().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        lines.push(
            [
                escape(&case.path),
                escape(&case.method),
                escape(&case.summary),
                escape(&parameters),
                escape(&assertions),
                case.expected_status.to_string(),
                case.negatives.len().to_string(),
            ]
            .join(","),
        );
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Quote a field when it contains a delimiter, quote, or line break.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
