//! `GET /templates` check.

use gencheck_domain::check::{decode_json, decode_shape, details, expect_array, expect_status};
use gencheck_domain::{
    ApiRequest, ApiResponse, CheckFailure, EXPECTED_TEMPLATE_IDS, StatusCode, TemplateRecord,
};
use serde_json::json;

use crate::ports::{Clock, HttpClient, Reporter};
use crate::runner::{Passed, TestRunner, Verdict};

/// Judges the template catalogue: 200, a non-empty array whose every element
/// has the template fields, and ids covering `expected_ids`.
///
/// # Errors
///
/// Returns the first failing condition.
pub fn evaluate_templates(response: &ApiResponse, expected_ids: &[&str]) -> Verdict {
    expect_status(response, StatusCode::OK)?;
    let templates = expect_array(decode_json(response)?)?;

    if templates.is_empty() {
        return Err(CheckFailure::rejected(
            "response is an empty list",
            details(json!({ "response_type": "array", "length": 0 })),
        ));
    }

    let mut found = Vec::with_capacity(templates.len());
    for template in &templates {
        let record: TemplateRecord = decode_shape(template)?;
        found.extend(record.id_text());
    }

    let missing: Vec<&str> = expected_ids
        .iter()
        .copied()
        .filter(|id| !found.iter().any(|f| f.as_str() == *id))
        .collect();
    if !missing.is_empty() {
        return Err(CheckFailure::rejected(
            "missing expected templates",
            details(json!({
                "found": found,
                "expected": expected_ids,
                "missing": missing,
            })),
        ));
    }

    let structure: Vec<&String> = templates[0]
        .as_object()
        .map(|fields| fields.keys().collect())
        .unwrap_or_default();

    Ok(Passed::new(
        format!(
            "Templates retrieved successfully with {} templates",
            templates.len()
        ),
        details(json!({
            "template_count": templates.len(),
            "template_ids": found,
            "sample_structure": structure,
        })),
    ))
}

impl<C: HttpClient, K: Clock, R: Reporter> TestRunner<C, K, R> {
    /// Templates group: one check against `GET /templates`.
    pub async fn check_templates(&mut self) -> bool {
        let verdict = self
            .exchange(&ApiRequest::get("/templates"))
            .await
            .and_then(|response| evaluate_templates(&response, &EXPECTED_TEMPLATE_IDS));
        self.record("Templates Endpoint", "Templates endpoint", verdict)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::time::Duration;

    fn template(id: &str) -> Value {
        json!({
            "id": id,
            "name": format!("{id} name"),
            "description": "d",
            "type": "fullstack",
            "tags": ["React"],
        })
    }

    fn catalogue(ids: &[&str]) -> ApiResponse {
        let body = Value::Array(ids.iter().map(|id| template(id)).collect());
        ApiResponse::new(200, body.to_string(), Duration::from_millis(2))
    }

    #[test]
    fn test_full_catalogue() {
        let mut ids = EXPECTED_TEMPLATE_IDS.to_vec();
        ids.push("portfolio");
        let passed = evaluate_templates(&catalogue(&ids), &EXPECTED_TEMPLATE_IDS).unwrap();
        assert_eq!(passed.details["template_count"], json!(6));
        assert_eq!(
            passed.message,
            "Templates retrieved successfully with 6 templates"
        );
    }

    #[test]
    fn test_missing_chat_app() {
        let ids = ["todo-app", "dashboard", "landing-page", "blog-platform"];
        let failure = evaluate_templates(&catalogue(&ids), &EXPECTED_TEMPLATE_IDS).unwrap_err();
        assert_eq!(failure.to_string(), "missing expected templates");
        let details = failure.details();
        assert_eq!(details["missing"], json!(["chat-app"]));
        assert_eq!(details["found"], json!(ids));
        assert_eq!(details["expected"], json!(EXPECTED_TEMPLATE_IDS));
    }

    #[test]
    fn test_empty_catalogue() {
        let failure = evaluate_templates(&catalogue(&[]), &EXPECTED_TEMPLATE_IDS).unwrap_err();
        assert_eq!(failure.to_string(), "response is an empty list");
    }

    #[test]
    fn test_every_element_is_checked() {
        let mut items: Vec<Value> = EXPECTED_TEMPLATE_IDS.iter().map(|id| template(id)).collect();
        items.push(json!({"id": "broken", "name": "n"}));
        let response = ApiResponse::new(200, Value::Array(items).to_string(), Duration::ZERO);

        let failure = evaluate_templates(&response, &EXPECTED_TEMPLATE_IDS).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "response missing required fields: description, type, tags"
        );
    }
}
