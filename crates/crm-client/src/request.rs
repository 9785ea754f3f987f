//! API request descriptors.

use serde_json::{Map, Value};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    /// GET and DELETE never carry a body.
    pub fn allows_body(&self) -> bool {
        !matches!(self, Method::Get | Method::Delete)
    }
}

/// Descriptor for one API call: method, endpoint path, optional JSON body,
/// and query parameters.
///
/// Query and body entries whose value is `null` or an empty string are never
/// transmitted.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Option<Map<String, Value>>,
    pub(crate) query: Map<String, Value>,
}

impl ApiRequest {
    /// Create a new request descriptor.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Map::new(),
        }
    }

    /// Get the request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Get the endpoint path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Set the JSON body mapping.
    pub fn body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a single query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Merge a query mapping into the request.
    pub fn query_map(mut self, query: Map<String, Value>) -> Self {
        self.query.extend(query);
        self
    }

    /// Query pairs to transmit, with empty and null values dropped.
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .filter(|(_, value)| is_transmitted(value))
            .map(|(name, value)| (name.clone(), scalar_text(value)))
            .collect()
    }

    /// Body to transmit: only for body-carrying methods, only when non-empty
    /// after dropping null and empty-string values.
    pub(crate) fn effective_body(&self) -> Option<Map<String, Value>> {
        if !self.method.allows_body() {
            return None;
        }
        let body = self.body.as_ref()?;
        let filtered: Map<String, Value> = body
            .iter()
            .filter(|(_, value)| is_transmitted(value))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        if filtered.is_empty() {
            None
        } else {
            Some(filtered)
        }
    }
}

/// A value is transmitted unless it is null or an empty string.
fn is_transmitted(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Render a query value as text. Strings are used verbatim; other scalars use
/// their JSON representation.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
