use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::core::convert::clone_to_type;
use crate::core::error::CollectionError;
use crate::core::map_key::{KeyType, MapKey};
use crate::core::registry::TypeRegistry;
use crate::core::value::Value;
use crate::core::value_type::{EditableValue, ValueType};

pub type CollectionRef = Rc<RefCell<Collection>>;
pub type WeakCollection = Weak<RefCell<Collection>>;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Declared value slot type of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Typed(ValueType),
    /// Each entry carries its own dynamic type.
    Any,
}

impl ValueKind {
    pub fn name(&self) -> &str {
        match self {
            Self::Typed(ty) => ty.name(),
            Self::Any => "any",
        }
    }
}

/// Insertion-ordered associative container edited by a map view.
#[derive(Debug)]
pub struct Collection {
    key_type: KeyType,
    value_kind: ValueKind,
    type_name: String,
    generation: u64,
    entries: IndexMap<MapKey, Value>,
}

impl Clone for Collection {
    /// A clone is a distinct collection and gets its own generation.
    fn clone(&self) -> Self {
        Self {
            key_type: self.key_type,
            value_kind: self.value_kind.clone(),
            type_name: self.type_name.clone(),
            generation: next_generation(),
            entries: self.entries.clone(),
        }
    }
}

impl Collection {
    pub fn new(key_type: KeyType, value_kind: ValueKind) -> Self {
        let type_name = format!("map[{}]{}", key_type.name(), value_kind.name());
        Self {
            key_type,
            value_kind,
            type_name,
            generation: next_generation(),
            entries: IndexMap::new(),
        }
    }

    pub fn typed(key_type: KeyType, value_type: ValueType) -> Self {
        Self::new(key_type, ValueKind::Typed(value_type))
    }

    pub fn polymorphic(key_type: KeyType) -> Self {
        Self::new(key_type, ValueKind::Any)
    }

    pub fn with_type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = name.into();
        self
    }

    /// Builder form of [`Collection::set`]; entries that do not fit are
    /// dropped with a warning.
    pub fn with_entry(mut self, key: impl Into<MapKey>, value: impl Into<Value>) -> Self {
        if let Err(err) = self.set(key.into(), value.into()) {
            log::warn!("with_entry: {err}");
        }
        self
    }

    pub fn into_ref(self) -> CollectionRef {
        Rc::new(RefCell::new(self))
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn value_kind(&self) -> &ValueKind {
        &self.value_kind
    }

    pub fn is_polymorphic(&self) -> bool {
        self.value_kind == ValueKind::Any
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Identity stamp: unique per collection instance, never reused.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &MapKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MapKey, &Value)> {
        self.entries.iter()
    }

    pub fn contains_key(&self, key: &MapKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Typed read of the value at `key`; `None` when absent or of another
    /// type.
    pub fn get_as<T: EditableValue>(&self, key: &MapKey) -> Option<T> {
        self.entries.get(key).and_then(T::from_value)
    }

    pub fn zero_value(&self) -> Value {
        match &self.value_kind {
            ValueKind::Typed(ty) => ty.zero(),
            ValueKind::Any => Value::None,
        }
    }

    fn check_key(&self, key: &MapKey) -> Result<(), CollectionError> {
        if self.key_type.admits(key) {
            Ok(())
        } else {
            Err(CollectionError::KeyTypeMismatch {
                key: key.clone(),
                expected: self.key_type,
            })
        }
    }

    fn check_value(&self, value: &Value) -> Result<(), CollectionError> {
        match &self.value_kind {
            ValueKind::Any => Ok(()),
            ValueKind::Typed(ty) if ty.holds(value) => Ok(()),
            ValueKind::Typed(ty) => Err(CollectionError::ValueTypeMismatch {
                expected: ty.clone(),
                found: value
                    .value_type()
                    .map(|t| t.name().to_string())
                    .unwrap_or_else(|| "none".to_string()),
            }),
        }
    }

    /// Writes `value` at `key`, inserting at the end when the key is new.
    pub fn set(&mut self, key: MapKey, value: Value) -> Result<Option<Value>, CollectionError> {
        self.check_key(&key)?;
        self.check_value(&value)?;
        Ok(self.entries.insert(key, value))
    }

    /// Order-preserving removal.
    pub fn remove(&mut self, key: &MapKey) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Moves the value at `old` to `new`, keeping its position.
    pub fn rename_key(&mut self, old: &MapKey, new: MapKey) -> Result<(), CollectionError> {
        if old == &new {
            return Ok(());
        }
        self.check_key(&new)?;
        // Keys render to text for display and slot names, so equal text is a
        // collision even across key families.
        let text = new.to_string();
        if let Some(taken) = self
            .entries
            .keys()
            .find(|key| *key != old && key.to_string() == text)
        {
            return Err(CollectionError::KeyExists(taken.clone()));
        }
        let Some((idx, _, value)) = self.entries.shift_remove_full(old) else {
            return Err(CollectionError::MissingKey(old.clone()));
        };
        self.entries.shift_insert(idx, new, value);
        Ok(())
    }

    /// Picks a key not yet present, following the key family's policy.
    pub fn unused_key(&self) -> Result<MapKey, CollectionError> {
        match self.key_type {
            KeyType::Int => (0..=i64::MAX)
                .map(MapKey::Int)
                .find(|key| !self.entries.contains_key(key))
                .ok_or(CollectionError::NoFreeKey(KeyType::Int)),
            KeyType::Bool => [false, true]
                .into_iter()
                .map(MapKey::Bool)
                .find(|key| !self.entries.contains_key(key))
                .ok_or(CollectionError::NoFreeKey(KeyType::Bool)),
            KeyType::Text | KeyType::Any => {
                let base = MapKey::Text("key".to_string());
                if !self.entries.contains_key(&base) {
                    return Ok(base);
                }
                (1..=usize::MAX)
                    .map(|n| MapKey::Text(format!("key{n}")))
                    .find(|key| !self.entries.contains_key(key))
                    .ok_or(CollectionError::NoFreeKey(self.key_type))
            }
        }
    }

    /// Appends a zero-valued entry under a fresh key and returns that key.
    pub fn add_default(&mut self) -> Result<MapKey, CollectionError> {
        let key = self.unused_key()?;
        let value = self.zero_value();
        self.entries.insert(key.clone(), value);
        Ok(key)
    }

    /// Builds a text-keyed collection from a JSON object. Values that do not
    /// fit a typed collection are coerced, falling back to the zero value.
    pub fn from_json(
        json: &serde_json::Map<String, serde_json::Value>,
        key_type: KeyType,
        value_kind: ValueKind,
        registry: &TypeRegistry,
    ) -> Result<Self, CollectionError> {
        let mut collection = Self::new(key_type, value_kind);
        for (raw_key, raw_value) in json {
            let key = MapKey::parse(raw_key, key_type)?;
            let Some(value) = Value::from_json(raw_value) else {
                log::warn!("skipping `{raw_key}`: nested objects cannot be edited as map values");
                continue;
            };
            let value = match &collection.value_kind {
                ValueKind::Any => value,
                ValueKind::Typed(ty) => clone_to_type(&value, ty, registry).unwrap_or_else(|| {
                    log::warn!("`{raw_key}` is not a {ty}; using its zero value");
                    ty.zero()
                }),
            };
            collection.set(key, value)?;
        }
        Ok(collection)
    }

    pub fn to_json(&self) -> serde_json::Map<String, serde_json::Value> {
        self.entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_json()))
            .collect()
    }
}
