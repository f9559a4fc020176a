use std::fmt;

use crate::core::value_type::{EnumValue, ValueType};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Enum(EnumValue),
    Type(ValueType),
    List(Vec<Value>),
}

impl Value {
    /// Dynamic type of the value; `None` and lists have no single slot type.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Self::None | Self::List(_) => None,
            Self::Bool(_) => Some(ValueType::Bool),
            Self::Int(_) => Some(ValueType::Int),
            Self::Float(_) => Some(ValueType::Float),
            Self::Text(_) => Some(ValueType::Text),
            Self::Enum(e) => Some(ValueType::Enum(e.def().clone())),
            Self::Type(_) => Some(ValueType::Type),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::None => true,
            Self::Bool(b) => !b,
            Self::Int(n) => *n == 0,
            Self::Float(n) => *n == 0.0,
            Self::Text(s) => s.is_empty(),
            Self::Enum(e) => e.index() == 0,
            Self::Type(ty) => *ty == ValueType::Text,
            Self::List(items) => items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Reads a JSON document; nested objects have no slot representation and
    /// come back as `None`.
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Null => Some(Self::None),
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            serde_json::Value::Array(items) => {
                Some(Self::List(items.iter().filter_map(Self::from_json).collect()))
            }
            serde_json::Value::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::None => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(n) => serde_json::Value::from(*n),
            Self::Float(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Enum(e) => serde_json::Value::String(e.variant().to_string()),
            Self::Type(ty) => serde_json::Value::String(ty.name().to_string()),
            Self::List(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write_float(f, *n),
            Self::Text(s) => f.write_str(s),
            Self::Enum(e) => f.write_str(e.variant()),
            Self::Type(ty) => f.write_str(ty.name()),
            Self::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Shortest digits that round-trip, switching to `d.ddde±XX` when the decimal
/// exponent is below -4 or at least 6.
fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "+Inf" } else { "-Inf" });
    }
    if n.is_nan() || n == 0.0 {
        return write!(f, "{n}");
    }
    let scientific = format!("{n:e}");
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return f.write_str(&scientific);
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..6).contains(&exp) {
        return write!(f, "{n}");
    }
    let sign = if exp < 0 { '-' } else { '+' };
    write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::core::value_type::ValueType;

    #[test]
    fn display_matches_plain_formatting() {
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::None.to_string(), "");
        assert_eq!(
            Value::List(vec![Value::Int(1), Value::from("a")]).to_string(),
            "[1, a]"
        );
        assert_eq!(Value::Type(ValueType::Text).to_string(), "string");
    }

    #[test]
    fn floats_switch_to_exponent_form_at_the_edges() {
        assert_eq!(Value::Float(0.0001).to_string(), "0.0001");
        assert_eq!(Value::Float(5e-7).to_string(), "5e-07");
        assert_eq!(Value::Float(-1.25e-5).to_string(), "-1.25e-05");
        assert_eq!(Value::Float(123456.0).to_string(), "123456");
        assert_eq!(Value::Float(1e6).to_string(), "1e+06");
        assert_eq!(Value::Float(1e21).to_string(), "1e+21");
        assert_eq!(Value::Float(1.5e300).to_string(), "1.5e+300");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "+Inf");
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn json_numbers_prefer_integers() {
        let json: serde_json::Value = serde_json::from_str(r#"[1, 1.5, "x", null]"#).expect("json");
        let value = Value::from_json(&json).expect("value");
        assert_eq!(
            value,
            Value::List(vec![
                Value::Int(1),
                Value::Float(1.5),
                Value::from("x"),
                Value::None
            ])
        );
        assert_eq!(value.to_json(), json);
    }

    #[test]
    fn nested_objects_are_not_slot_values() {
        let json: serde_json::Value = serde_json::from_str(r#"{"a": 1}"#).expect("json");
        assert_eq!(Value::from_json(&json), None);
    }
}
