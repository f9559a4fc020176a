use std::fmt;
use std::sync::Arc;

use crate::core::value::Value;

/// A registered enumeration: a name plus its ordered variant names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumDef {
    name: String,
    variants: Vec<String>,
}

impl EnumDef {
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn position(&self, variant: &str) -> Option<usize> {
        self.variants.iter().position(|v| v == variant)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    def: Arc<EnumDef>,
    index: usize,
}

impl EnumValue {
    /// Out-of-range indices clamp to the first variant.
    pub fn new(def: Arc<EnumDef>, index: usize) -> Self {
        let index = if index < def.variants.len() { index } else { 0 };
        Self { def, index }
    }

    pub fn from_name(def: Arc<EnumDef>, variant: &str) -> Option<Self> {
        let index = def.position(variant)?;
        Some(Self { def, index })
    }

    pub fn def(&self) -> &Arc<EnumDef> {
        &self.def
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn variant(&self) -> &str {
        self.def
            .variants
            .get(self.index)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Runtime type descriptor for map values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    Text,
    /// The type-descriptor type itself: values are `Value::Type`.
    Type,
    Enum(Arc<EnumDef>),
}

impl ValueType {
    pub fn name(&self) -> &str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "string",
            Self::Type => "type",
            Self::Enum(def) => def.name(),
        }
    }

    pub fn is_basic(&self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::Float | Self::Text)
    }

    pub fn basic_types() -> [ValueType; 4] {
        [Self::Bool, Self::Int, Self::Float, Self::Text]
    }

    pub fn zero(&self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::Text => Value::Text(String::new()),
            Self::Type => Value::Type(Self::Text),
            Self::Enum(def) => Value::Enum(EnumValue::new(def.clone(), 0)),
        }
    }

    /// Whether `value` is an instance of this type.
    pub fn holds(&self, value: &Value) -> bool {
        value.value_type().as_ref() == Some(self)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Concrete Rust types that can live in a map slot.
pub trait EditableValue: Sized {
    fn value_type(&self) -> ValueType;
    fn into_value(self) -> Value;
    fn from_value(value: &Value) -> Option<Self>;
}

impl EditableValue for bool {
    fn value_type(&self) -> ValueType {
        ValueType::Bool
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl EditableValue for i64 {
    fn value_type(&self) -> ValueType {
        ValueType::Int
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl EditableValue for f64 {
    fn value_type(&self) -> ValueType {
        ValueType::Float
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl EditableValue for String {
    fn value_type(&self) -> ValueType {
        ValueType::Text
    }

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().map(str::to_string)
    }
}

impl EditableValue for EnumValue {
    fn value_type(&self) -> ValueType {
        ValueType::Enum(self.def.clone())
    }

    fn into_value(self) -> Value {
        Value::Enum(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Enum(e) => Some(e.clone()),
            _ => None,
        }
    }
}

impl EditableValue for ValueType {
    fn value_type(&self) -> ValueType {
        ValueType::Type
    }

    fn into_value(self) -> Value {
        Value::Type(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Type(ty) => Some(ty.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{EditableValue, EnumDef, EnumValue, ValueType};
    use crate::core::value::Value;

    #[test]
    fn zero_values_are_zero() {
        let align = Arc::new(EnumDef::new("Align", ["left", "center"]));
        for ty in [
            ValueType::Bool,
            ValueType::Int,
            ValueType::Float,
            ValueType::Text,
            ValueType::Type,
            ValueType::Enum(align),
        ] {
            assert!(ty.zero().is_zero(), "{ty} zero");
            assert!(ty.holds(&ty.zero()));
        }
    }

    #[test]
    fn enum_value_clamps_index() {
        let def = Arc::new(EnumDef::new("Align", ["left", "center"]));
        assert_eq!(EnumValue::new(def.clone(), 9).variant(), "left");
        assert_eq!(
            EnumValue::from_name(def, "center").map(|e| e.index()),
            Some(1)
        );
    }

    #[test]
    fn editable_values_round_trip_through_value() {
        assert_eq!(i64::from_value(&7i64.into_value()), Some(7));
        assert_eq!(
            String::from_value(&"x".to_string().into_value()).as_deref(),
            Some("x")
        );
        assert_eq!(ValueType::Int.into_value(), Value::Type(ValueType::Int));
        assert_eq!(true.value_type(), ValueType::Bool);
    }
}
