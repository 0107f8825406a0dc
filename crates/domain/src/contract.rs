//! Typed shapes of the service's JSON responses.
//!
//! Every field is an `Option<Value>`: `None` means the key was absent, while an
//! explicit `null` is kept as `Some(Value::Null)` so presence matches a key
//! lookup on the raw object.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A response record with a fixed set of required keys.
pub trait ResponseShape: DeserializeOwned {
    /// Keys that must be present.
    const REQUIRED: &'static [&'static str];

    /// Required keys that were absent, in `REQUIRED` order.
    fn missing_fields(&self) -> Vec<&'static str>;
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn absent(fields: &[(&'static str, &Option<Value>)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect()
}

/// Body of `GET /`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthBody {
    /// Greeting text.
    #[serde(default, deserialize_with = "present")]
    pub message: Option<Value>,
    /// Service state, expected to be "running".
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Value>,
    /// Backing services the API reports.
    #[serde(default, deserialize_with = "present")]
    pub services: Option<Value>,
}

impl ResponseShape for HealthBody {
    const REQUIRED: &'static [&'static str] = &["message", "status", "services"];

    fn missing_fields(&self) -> Vec<&'static str> {
        absent(&[
            ("message", &self.message),
            ("status", &self.status),
            ("services", &self.services),
        ])
    }
}

/// Body of a successful `POST /generate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateBody {
    /// Whether generation succeeded.
    #[serde(default, deserialize_with = "present")]
    pub success: Option<Value>,
    /// Prose explanation of the generated code.
    #[serde(default, deserialize_with = "present")]
    pub explanation: Option<Value>,
    /// Generated code.
    #[serde(default, deserialize_with = "present")]
    pub code: Option<Value>,
    /// Model that produced the answer, not required.
    #[serde(default, deserialize_with = "present")]
    pub model: Option<Value>,
}

impl ResponseShape for GenerateBody {
    const REQUIRED: &'static [&'static str] = &["success", "explanation", "code"];

    fn missing_fields(&self) -> Vec<&'static str> {
        absent(&[
            ("success", &self.success),
            ("explanation", &self.explanation),
            ("code", &self.code),
        ])
    }
}

/// Body of a successful `POST /preview`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewBody {
    /// Whether the preview was stored.
    #[serde(default, deserialize_with = "present")]
    pub success: Option<Value>,
    /// Relative URL of the preview.
    #[serde(default, rename = "previewUrl", deserialize_with = "present")]
    pub preview_url: Option<Value>,
    /// Identifier of the preview.
    #[serde(default, rename = "previewId", deserialize_with = "present")]
    pub preview_id: Option<Value>,
}

impl ResponseShape for PreviewBody {
    const REQUIRED: &'static [&'static str] = &["success", "previewUrl", "previewId"];

    fn missing_fields(&self) -> Vec<&'static str> {
        absent(&[
            ("success", &self.success),
            ("previewUrl", &self.preview_url),
            ("previewId", &self.preview_id),
        ])
    }
}

/// Body of a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Error text.
    #[serde(default, deserialize_with = "present")]
    pub error: Option<Value>,
}

impl ResponseShape for ErrorBody {
    const REQUIRED: &'static [&'static str] = &["error"];

    fn missing_fields(&self) -> Vec<&'static str> {
        absent(&[("error", &self.error)])
    }
}

/// One element of `GET /conversations`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationRecord {
    /// Public identifier.
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    /// Prompt that started the conversation.
    #[serde(default, deserialize_with = "present")]
    pub message: Option<Value>,
    /// Project type of the prompt.
    #[serde(default, rename = "projectType", deserialize_with = "present")]
    pub project_type: Option<Value>,
    /// Stored generation result.
    #[serde(default, deserialize_with = "present")]
    pub result: Option<Value>,
    /// Creation time.
    #[serde(default, deserialize_with = "present")]
    pub timestamp: Option<Value>,
    /// Raw storage key; must never be exposed.
    #[serde(default, rename = "_id", deserialize_with = "present")]
    pub storage_id: Option<Value>,
}

impl ConversationRecord {
    /// Key under which the storage layer keeps its own identifier.
    pub const STORAGE_ID_KEY: &'static str = "_id";
}

impl ResponseShape for ConversationRecord {
    const REQUIRED: &'static [&'static str] = &["id", "message", "projectType", "result", "timestamp"];

    fn missing_fields(&self) -> Vec<&'static str> {
        absent(&[
            ("id", &self.id),
            ("message", &self.message),
            ("projectType", &self.project_type),
            ("result", &self.result),
            ("timestamp", &self.timestamp),
        ])
    }
}

/// One element of `GET /templates`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateRecord {
    /// Template identifier, e.g. "todo-app".
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    /// Display name.
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    /// Short description.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
    /// Project type of the template.
    #[serde(default, rename = "type", deserialize_with = "present")]
    pub kind: Option<Value>,
    /// Technology tags.
    #[serde(default, deserialize_with = "present")]
    pub tags: Option<Value>,
}

impl TemplateRecord {
    /// Identifier rendered as text; non-string ids use their JSON form.
    #[must_use]
    pub fn id_text(&self) -> Option<String> {
        self.id.as_ref().map(|id| match id {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }
}

impl ResponseShape for TemplateRecord {
    const REQUIRED: &'static [&'static str] = &["id", "name", "description", "type", "tags"];

    fn missing_fields(&self) -> Vec<&'static str> {
        absent(&[
            ("id", &self.id),
            ("name", &self.name),
            ("description", &self.description),
            ("type", &self.kind),
            ("tags", &self.tags),
        ])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn all_missing<T: ResponseShape>() -> Vec<&'static str> {
        serde_json::from_value::<T>(json!({})).unwrap().missing_fields()
    }

    #[test]
    fn test_empty_object_misses_every_required_field() {
        assert_eq!(all_missing::<HealthBody>(), HealthBody::REQUIRED);
        assert_eq!(all_missing::<GenerateBody>(), GenerateBody::REQUIRED);
        assert_eq!(all_missing::<PreviewBody>(), PreviewBody::REQUIRED);
        assert_eq!(all_missing::<ErrorBody>(), ErrorBody::REQUIRED);
        assert_eq!(all_missing::<ConversationRecord>(), ConversationRecord::REQUIRED);
        assert_eq!(all_missing::<TemplateRecord>(), TemplateRecord::REQUIRED);
    }

    #[test]
    fn test_null_counts_as_present() {
        let body: HealthBody =
            serde_json::from_value(json!({"message": null, "status": "running", "services": []}))
                .unwrap();
        assert_eq!(body.message, Some(Value::Null));
        assert!(body.missing_fields().is_empty());
    }

    #[test]
    fn test_camel_case_keys() {
        let body: PreviewBody = serde_json::from_value(
            json!({"success": true, "previewUrl": "/preview/1", "previewId": "1"}),
        )
        .unwrap();
        assert!(body.missing_fields().is_empty());
        assert_eq!(body.preview_id, Some(json!("1")));
    }

    #[test]
    fn test_conversation_storage_id_is_captured() {
        let record: ConversationRecord =
            serde_json::from_value(json!({"id": 1, "_id": "abc"})).unwrap();
        assert_eq!(record.storage_id, Some(json!("abc")));
        assert_eq!(
            record.missing_fields(),
            vec!["message", "projectType", "result", "timestamp"]
        );
    }

    #[test]
    fn test_template_id_text() {
        let record: TemplateRecord = serde_json::from_value(json!({"id": "chat-app"})).unwrap();
        assert_eq!(record.id_text().as_deref(), Some("chat-app"));

        let record: TemplateRecord = serde_json::from_value(json!({"id": 7})).unwrap();
        assert_eq!(record.id_text().as_deref(), Some("7"));
    }
}
