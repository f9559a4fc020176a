use thiserror::Error;

use crate::core::map_key::{KeyType, MapKey};
use crate::core::value_type::ValueType;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollectionError {
    #[error("key `{0}` already exists")]
    KeyExists(MapKey),
    #[error("key `{0}` is not in the collection")]
    MissingKey(MapKey),
    #[error("key `{key}` does not fit key type {expected}")]
    KeyTypeMismatch { key: MapKey, expected: KeyType },
    #[error("value of type {found} does not fit value type {expected}")]
    ValueTypeMismatch { expected: ValueType, found: String },
    #[error("no unused {0} key is left")]
    NoFreeKey(KeyType),
    #[error("cannot read `{text}` as {target}")]
    Parse { text: String, target: String },
}

/// Grid construction failures that cannot be absorbed by skipping an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapViewError {
    #[error("two keys render as `{text}`; their grid slots would collide")]
    DuplicateSlot { text: String },
}
