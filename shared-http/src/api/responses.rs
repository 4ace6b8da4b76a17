use serde::Deserialize;
use serde_json::{Map, Value};
use shared::Error;

/// Usage counts keyed by API key identifier, in the order the backend sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageStats {
    entries: Map<String, Value>,
}

impl UsageStats {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries as display text, backend order preserved.
    pub fn entries(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), display_value(value)))
    }
}

impl TryFrom<Value> for UsageStats {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let found = match value {
            Value::Object(entries) => return Ok(Self { entries }),
            Value::Array(_) => "an array",
            Value::String(_) => "a string",
            Value::Number(_) => "a number",
            Value::Bool(_) => "a boolean",
            Value::Null => "null",
        };
        Err(Error::UnexpectedShape(format!("expected an object, got {found}")))
    }
}

/// Coerces a usage value to the text rendered in a table cell.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Success body of `PUT /api/admin/plan`
#[derive(Debug, Clone, Deserialize)]
pub struct PlanUpdateResponse {
    pub message: String,
}

/// Error body of the admin API
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Value,
}

impl ErrorResponse {
    pub fn detail_text(&self) -> String {
        display_value(&self.detail)
    }
}
