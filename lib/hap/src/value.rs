use serde::{Deserialize, Serialize};

/// A characteristic value as the bridge exchanges it with its clients.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f32),
    String(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            Value::Int(value) => Some(*value != 0),
            Value::Float(value) => Some(*value != 0.0),
            Value::String(_) => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            Value::Int(value) => Some(*value as f32),
            Value::Float(value) => Some(*value),
            Value::String(value) => value.parse().ok(),
        }
    }

}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Bool,
    Uint8,
    Float,
    String,
}

impl Format {
    pub fn default_value(&self) -> Value {
        match self {
            Format::Bool => Value::Bool(false),
            Format::Uint8 => Value::Int(0),
            Format::Float => Value::Float(0.0),
            Format::String => Value::String(String::new()),
        }
    }

    /// Brings a value into this format, e.g. `true` becomes `1` for `uint8`
    /// characteristics such as `Active`. `None` when the value has no
    /// meaning in this format.
    pub fn coerce(&self, value: Value) -> Option<Value> {
        match self {
            Format::Bool => value.as_bool().map(Value::Bool),
            Format::Uint8 => value
                .as_f32()
                .map(|v| Value::Int(v.round().clamp(0.0, u8::MAX as f32) as i32)),
            Format::Float => value.as_f32().map(Value::Float),
            Format::String => match value {
                Value::String(value) => Some(Value::String(value)),
                Value::Bool(value) => Some(Value::String(value.to_string())),
                Value::Int(value) => Some(Value::String(value.to_string())),
                Value::Float(value) => Some(Value::String(value.to_string())),
            },
        }
    }

    pub fn coerce_or_default(&self, value: Value) -> Value {
        self.coerce(value).unwrap_or_else(|| self.default_value())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Props {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_step: Option<f32>,
    #[serde(rename = "valid-values", skip_serializing_if = "Option::is_none")]
    pub valid_values: Option<Vec<i32>>,
}

impl Props {
    pub fn range(min: f32, max: f32, step: f32) -> Props {
        Props {
            min_value: Some(min),
            max_value: Some(max),
            min_step: Some(step),
            valid_values: None,
        }
    }

    pub fn valid_values(values: &[i32]) -> Props {
        Props {
            valid_values: Some(values.to_vec()),
            ..Props::default()
        }
    }
}
