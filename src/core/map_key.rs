use std::fmt;

use crate::core::error::CollectionError;
use crate::core::value::Value;

/// Key family a collection accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyType {
    Bool,
    Int,
    #[default]
    Text,
    /// Mixed keys; the only family where two keys can render the same text.
    Any,
}

impl KeyType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Text => "string",
            Self::Any => "any",
        }
    }

    pub fn admits(self, key: &MapKey) -> bool {
        matches!(
            (self, key),
            (Self::Any, _)
                | (Self::Bool, MapKey::Bool(_))
                | (Self::Int, MapKey::Int(_))
                | (Self::Text, MapKey::Text(_))
        )
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl MapKey {
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Bool(_) => KeyType::Bool,
            Self::Int(_) => KeyType::Int,
            Self::Text(_) => KeyType::Text,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(n) => Value::Int(*n),
            Self::Text(s) => Value::Text(s.clone()),
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Int(n) => Some(Self::Int(*n)),
            Value::Text(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Reads edited key text for a collection whose keys are `key_type`.
    /// `Any` keeps the text as a string key.
    pub fn parse(text: &str, key_type: KeyType) -> Result<Self, CollectionError> {
        let parse_err = || CollectionError::Parse {
            text: text.to_string(),
            target: key_type.name().to_string(),
        };
        match key_type {
            KeyType::Text | KeyType::Any => Ok(Self::Text(text.to_string())),
            KeyType::Int => text.trim().parse::<i64>().map(Self::Int).map_err(|_| parse_err()),
            KeyType::Bool => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Self::Bool(true)),
                "false" => Ok(Self::Bool(false)),
                _ => Err(parse_err()),
            },
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MapKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MapKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for MapKey {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for MapKey {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyType, MapKey};

    #[test]
    fn parse_follows_key_family() {
        assert_eq!(MapKey::parse(" 42 ", KeyType::Int), Ok(MapKey::Int(42)));
        assert_eq!(MapKey::parse("TRUE", KeyType::Bool), Ok(MapKey::Bool(true)));
        assert_eq!(MapKey::parse("7", KeyType::Any), Ok(MapKey::Text("7".to_string())));
        assert!(MapKey::parse("seven", KeyType::Int).is_err());
    }

    #[test]
    fn any_admits_every_key() {
        assert!(KeyType::Any.admits(&MapKey::Int(1)));
        assert!(KeyType::Any.admits(&MapKey::from("a")));
        assert!(!KeyType::Int.admits(&MapKey::from("a")));
    }
}
