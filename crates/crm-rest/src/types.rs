//! Shared types for resource-level operations.

use serde::Serialize;
use serde_json::Value;

/// The write operation a batch run applies to each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOperation {
    Create,
    Update,
    Delete,
}

impl BatchOperation {
    /// Lowercase name, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchOperation::Create => "create",
            BatchOperation::Update => "update",
            BatchOperation::Delete => "delete",
        }
    }
}

/// Outcome of one record in a batch run, independent of its siblings.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItemResult {
    /// Whether the operation succeeded for this record.
    pub success: bool,
    /// Response payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Error message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The original input record on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Value>,
}

impl BatchItemResult {
    /// A successful item result.
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            item: None,
        }
    }

    /// A failed item result carrying the error and the original record.
    pub fn failed(error: String, item: Value) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            item: Some(item),
        }
    }
}

/// One search result, tagged with the resource type it came from.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    /// The resource type whose search produced this record.
    pub resource_type: String,
    /// The record as returned by the CRM.
    pub record: Value,
}
