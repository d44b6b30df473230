//! Row filters in the backend's `field=op.value` syntax.

use serde_json::Value;

/// Equality row filter, rendered as `field=eq.value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: &Value) -> Self {
        Filter {
            field: field.into(),
            value: render_value(value),
        }
    }

    /// Query parameter pair. Values are encoded by the URL builder, not here.
    pub fn to_param(&self) -> (String, String) {
        (self.field.clone(), format!("eq.{}", self.value))
    }
}

/// Strings go in bare; everything else uses its JSON text.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
