//! Postman collection v2.1 export

use serde_json::{Value, json};

use crate::case::{Assertion, NegativeCase, TestCase, TestSuite};

const COLLECTION_NAME: &str = "Generated API Tests";
const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Render the suite as a Postman collection v2.1 value.
///
/// Each test case becomes one item; each negative variant becomes its own
/// item so the invalid payloads are directly runnable.
#[must_use]
pub fn to_collection(suite: &TestSuite, base_url: &str) -> Value {
    let mut items = Vec::new();

    for case in &suite.cases {
        items.push(case_item(case, base_url));
        for negative in &case.negatives {
            items.push(negative_item(case, negative, base_url));
        }
    }

    json!({
        "info": {
            "name": COLLECTION_NAME,
            "schema": COLLECTION_SCHEMA,
        },
        "item": items,
    })
}

fn case_item(case: &TestCase, base_url: &str) -> Value {
    let mut item = json!({
        "name": format!("{} {}", case.method, case.path),
        "request": request_value(&case.method, &case.path, &case.payload, base_url),
        "response": [],
    });

    let scripts: Vec<String> = case.assertions.iter().filter_map(assertion_script).collect();
    attach_tests(&mut item, scripts);
    item
}

fn negative_item(case: &TestCase, negative: &NegativeCase, base_url: &str) -> Value {
    let mut item = json!({
        "name": format!(
            "{} {} [{}: {}]",
            case.method, case.path, negative.kind, negative.target_field
        ),
        "request": request_value(&case.method, &case.path, &negative.payload, base_url),
        "response": [],
    });

    attach_tests(&mut item, vec![status_script(negative.expected_status)]);
    item
}

fn request_value(method: &str, path: &str, payload: &Value, base_url: &str) -> Value {
    let host = base_url
        .replace("http://", "")
        .replace("https://", "");
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let mut request = json!({
        "method": method,
        "header": [],
        "url": {
            "raw": format!("{base_url}{path}"),
            "host": [host],
            "path": segments,
        },
    });

    // Attach a raw body only when there is an actual payload to send
    let has_body = !payload.is_null() && payload.as_object().is_none_or(|o| !o.is_empty());
    if has_body {
        request["header"] = json!([
            {"key": "Content-Type", "value": "application/json"}
        ]);
        request["body"] = json!({
            "mode": "raw",
            "raw": serde_json::to_string_pretty(payload).unwrap_or_default(),
        });
    }

    request
}

fn assertion_script(assertion: &Assertion) -> Option<String> {
    match assertion {
        Assertion::StatusCode { expected } => Some(status_script(*expected)),
        // Response-time bounds are not expressible as a pm.test one-liner here
        Assertion::ResponseTimeBelow { .. } => None,
    }
}

fn status_script(expected: u16) -> String {
    format!(
        "pm.test(\"Status code is {expected}\", function () {{ pm.response.to.have.status({expected}); }});"
    )
}

fn attach_tests(item: &mut Value, scripts: Vec<String>) {
    if scripts.is_empty() {
        return;
    }
    item["event"] = json!([{
        "listen": "test",
        "script": {
            "type": "text/javascript",
            "exec": scripts,
        },
    }]);
}
