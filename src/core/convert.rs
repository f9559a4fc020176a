//! Best-effort value coercion between slot types.

use crate::core::registry::TypeRegistry;
use crate::core::value::Value;
use crate::core::value_type::{EnumValue, ValueType};

/// Converts `value` into an instance of `target`. Returns `None` when no
/// sensible conversion exists; callers fall back to `target.zero()`.
pub fn clone_to_type(value: &Value, target: &ValueType, registry: &TypeRegistry) -> Option<Value> {
    if target.holds(value) {
        return Some(value.clone());
    }
    match target {
        ValueType::Bool => to_bool(value).map(Value::Bool),
        ValueType::Int => to_int(value).map(Value::Int),
        ValueType::Float => to_float(value).map(Value::Float),
        ValueType::Text => Some(Value::Text(value.to_string())),
        ValueType::Type => match value {
            Value::Text(name) => registry.lookup(name.trim()).map(Value::Type),
            _ => None,
        },
        ValueType::Enum(def) => match value {
            Value::Text(name) => EnumValue::from_name(def.clone(), name.trim()).map(Value::Enum),
            Value::Enum(other) => EnumValue::from_name(def.clone(), other.variant()).map(Value::Enum),
            Value::Int(n) => usize::try_from(*n)
                .ok()
                .filter(|idx| *idx < def.variants().len())
                .map(|idx| Value::Enum(EnumValue::new(def.clone(), idx))),
            _ => None,
        },
    }
}

/// Reads edited widget text as `target`. Text targets take the text verbatim.
pub fn parse_as(text: &str, target: &ValueType, registry: &TypeRegistry) -> Option<Value> {
    match target {
        ValueType::Text => Some(Value::Text(text.to_string())),
        _ => clone_to_type(&Value::Text(text.to_string()), target, registry),
    }
}

fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Int(n) => Some(*n != 0),
        Value::Float(n) => Some(*n != 0.0),
        Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Int(n) => Some(*n),
        Value::Float(n) => float_to_int(*n),
        Value::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_to_int))
        }
        Value::Enum(e) => i64::try_from(e.index()).ok(),
        _ => None,
    }
}

fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Int(n) => Some(*n as f64),
        Value::Float(n) => Some(*n),
        Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Value::Enum(e) => Some(e.index() as f64),
        _ => None,
    }
}

fn float_to_int(n: f64) -> Option<i64> {
    if n.is_finite() && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Some(n.trunc() as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{clone_to_type, parse_as};
    use crate::core::registry::TypeRegistry;
    use crate::core::value::Value;
    use crate::core::value_type::{EnumDef, EnumValue, ValueType};

    #[test]
    fn numbers_widen_and_narrow() {
        let registry = TypeRegistry::with_basic_types();
        assert_eq!(
            clone_to_type(&Value::Int(5), &ValueType::Float, &registry),
            Some(Value::Float(5.0))
        );
        assert_eq!(
            clone_to_type(&Value::Float(2.9), &ValueType::Int, &registry),
            Some(Value::Int(2))
        );
        assert_eq!(
            clone_to_type(&Value::Float(f64::NAN), &ValueType::Int, &registry),
            None
        );
    }

    #[test]
    fn anything_renders_to_text() {
        let registry = TypeRegistry::with_basic_types();
        assert_eq!(
            clone_to_type(&Value::Int(5), &ValueType::Text, &registry),
            Some(Value::from("5"))
        );
        assert_eq!(
            clone_to_type(&Value::Bool(true), &ValueType::Text, &registry),
            Some(Value::from("true"))
        );
    }

    #[test]
    fn text_parses_into_targets() {
        let mut registry = TypeRegistry::with_basic_types();
        let def = registry.register_enum(EnumDef::new("Align", ["left", "right"]), ["style-prop"]);
        assert_eq!(
            parse_as(" 12 ", &ValueType::Int, &registry),
            Some(Value::Int(12))
        );
        assert_eq!(parse_as("abc", &ValueType::Float, &registry), None);
        assert_eq!(
            parse_as("right", &ValueType::Enum(def.clone()), &registry),
            Some(Value::Enum(EnumValue::new(def, 1)))
        );
        assert_eq!(
            parse_as("int", &ValueType::Type, &registry),
            Some(Value::Type(ValueType::Int))
        );
        assert_eq!(
            parse_as(" keep spaces ", &ValueType::Text, &registry),
            Some(Value::from(" keep spaces "))
        );
    }

    #[test]
    fn enums_convert_by_variant_name() {
        let registry = TypeRegistry::with_basic_types();
        let a = Arc::new(EnumDef::new("A", ["x", "y"]));
        let b = Arc::new(EnumDef::new("B", ["y", "z"]));
        let source = Value::Enum(EnumValue::new(a, 1));
        assert_eq!(
            clone_to_type(&source, &ValueType::Enum(b.clone()), &registry),
            Some(Value::Enum(EnumValue::new(b.clone(), 0)))
        );
        assert_eq!(
            clone_to_type(&Value::Int(4), &ValueType::Enum(b), &registry),
            None
        );
    }
}
