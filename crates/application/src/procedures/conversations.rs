//! `GET /conversations` history check.

use gencheck_domain::check::{decode_json, decode_shape, details, expect_array, expect_status};
use gencheck_domain::{ApiRequest, ApiResponse, CheckFailure, ConversationRecord, StatusCode};
use serde_json::json;

use crate::ports::{Clock, HttpClient, Reporter};
use crate::runner::{Passed, TestRunner, Verdict};

/// Judges the conversation history: 200 and a JSON array. An empty array
/// passes; otherwise the first element must carry every public field and no
/// raw storage key.
///
/// # Errors
///
/// Returns the first failing condition.
pub fn evaluate_conversations(response: &ApiResponse) -> Verdict {
    expect_status(response, StatusCode::OK)?;
    let conversations = expect_array(decode_json(response)?)?;

    let Some(sample) = conversations.first() else {
        return Ok(Passed::new(
            "Conversations endpoint working but no conversations found (empty database)",
            details(json!({ "conversation_count": 0 })),
        ));
    };

    let record: ConversationRecord = decode_shape(sample)?;
    let structure: Vec<&String> = sample
        .as_object()
        .map(|fields| fields.keys().collect())
        .unwrap_or_default();

    if record.storage_id.is_some() {
        return Err(CheckFailure::rejected(
            format!(
                "conversation exposes internal storage key `{}`",
                ConversationRecord::STORAGE_ID_KEY
            ),
            details(json!({
                "sample": sample,
                "conversation_count": conversations.len(),
            })),
        ));
    }

    Ok(Passed::new(
        format!(
            "Conversations retrieved successfully with {} conversations",
            conversations.len()
        ),
        details(json!({
            "conversation_count": conversations.len(),
            "sample_structure": structure,
            "storage_id_scrubbed": true,
        })),
    ))
}

impl<C: HttpClient, K: Clock, R: Reporter> TestRunner<C, K, R> {
    /// Conversations group: one check against `GET /conversations`.
    pub async fn check_conversations(&mut self) -> bool {
        let verdict = self
            .exchange(&ApiRequest::get("/conversations"))
            .await
            .and_then(|response| evaluate_conversations(&response));
        self.record("Conversations History", "Conversations endpoint", verdict)
    }
}
