//! Loading view options and collection data from JSON or YAML files, and
//! writing edited collections back.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::collection::{Collection, CollectionRef, ValueKind, WeakCollection};
use crate::core::error::CollectionError;
use crate::core::map_key::KeyType;
use crate::core::registry::TypeRegistry;
use crate::widgets::components::map_view::MapViewOptions;
use crate::widgets::value_view::TmpSave;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{path} does not contain a key/value object")]
    NotAnObject { path: PathBuf },
    #[error("unknown value type `{0}`")]
    UnknownValueType(String),
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// `.yaml`/`.yml` files are YAML, everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

fn read_text(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path, text: &str) -> Result<T, ConfigError> {
    match DataFormat::from_path(path) {
        DataFormat::Json => serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        }),
        DataFormat::Yaml => serde_yaml::from_str(text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn load_options(path: &Path) -> Result<MapViewOptions, ConfigError> {
    let text = read_text(path)?;
    let options = parse(path, &text)?;
    log::debug!("loaded view options from {}", path.display());
    Ok(options)
}

/// `any` selects a polymorphic map; other names are looked up in `registry`.
pub fn parse_value_kind(name: &str, registry: &TypeRegistry) -> Result<ValueKind, ConfigError> {
    if name == ValueKind::Any.name() {
        return Ok(ValueKind::Any);
    }
    registry
        .lookup(name)
        .map(ValueKind::Typed)
        .ok_or_else(|| ConfigError::UnknownValueType(name.to_string()))
}

pub fn load_collection(
    path: &Path,
    key_type: KeyType,
    value_kind: ValueKind,
    registry: &TypeRegistry,
) -> Result<Collection, ConfigError> {
    let text = read_text(path)?;
    let document: serde_json::Value = parse(path, &text)?;
    let serde_json::Value::Object(object) = document else {
        return Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        });
    };
    let collection = Collection::from_json(&object, key_type, value_kind, registry)?;
    log::debug!(
        "loaded {} entries from {}",
        collection.len(),
        path.display()
    );
    Ok(collection)
}

pub fn save_collection(path: &Path, collection: &Collection) -> Result<(), ConfigError> {
    let document = serde_json::Value::Object(collection.to_json());
    let text = match DataFormat::from_path(path) {
        DataFormat::Json => {
            serde_json::to_string_pretty(&document).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?
        }
        DataFormat::Yaml => serde_yaml::to_string(&document).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?,
    };
    fs::write(path, text).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Flush hook that rewrites the source file after every edit.
pub struct FileSave {
    path: PathBuf,
    collection: WeakCollection,
}

impl FileSave {
    pub fn new(path: impl Into<PathBuf>, collection: &CollectionRef) -> Self {
        Self {
            path: path.into(),
            collection: std::rc::Rc::downgrade(collection),
        }
    }
}

impl TmpSave for FileSave {
    fn save_tmp(&self) {
        let Some(collection) = self.collection.upgrade() else {
            return;
        };
        if let Err(err) = save_collection(&self.path, &collection.borrow()) {
            log::error!("write-back failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::{
        ConfigError, DataFormat, FileSave, load_collection, load_options, parse_value_kind,
    };
    use crate::core::collection::ValueKind;
    use crate::core::map_key::{KeyType, MapKey};
    use crate::core::registry::TypeRegistry;
    use crate::core::value::Value;
    use crate::core::value_type::ValueType;
    use crate::widgets::value_view::TmpSave;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mapview-config-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("scratch dir");
        dir.join(name)
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(DataFormat::from_path(&PathBuf::from("a.yml")), DataFormat::Yaml);
        assert_eq!(DataFormat::from_path(&PathBuf::from("a.yaml")), DataFormat::Yaml);
        assert_eq!(DataFormat::from_path(&PathBuf::from("a.json")), DataFormat::Json);
        assert_eq!(DataFormat::from_path(&PathBuf::from("a")), DataFormat::Json);
    }

    #[test]
    fn options_default_missing_fields() {
        let path = scratch("options.yaml");
        fs::write(&path, "sort_by_value: true\n").expect("write");
        let options = load_options(&path).expect("options");
        assert!(options.sort_by_value);
        assert!(!options.read_only);
        assert_eq!(options.type_tag, "style-prop");
        assert_eq!(options.max_type_label, 50);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let path = scratch("bad-options.json");
        fs::write(&path, r#"{"sort_by": true}"#).expect("write");
        assert!(matches!(load_options(&path), Err(ConfigError::Json { .. })));
    }

    #[test]
    fn loads_typed_collection_from_json() {
        let registry = TypeRegistry::with_basic_types();
        let path = scratch("data.json");
        fs::write(&path, r#"{"a": 1, "b": "2", "c": "x"}"#).expect("write");
        let collection = load_collection(
            &path,
            KeyType::Text,
            ValueKind::Typed(ValueType::Int),
            &registry,
        )
        .expect("collection");
        assert_eq!(collection.get(&MapKey::from("b")), Some(&Value::Int(2)));
        assert_eq!(collection.get(&MapKey::from("c")), Some(&Value::Int(0)));
    }

    #[test]
    fn top_level_must_be_an_object() {
        let registry = TypeRegistry::with_basic_types();
        let path = scratch("list.yaml");
        fs::write(&path, "- 1\n- 2\n").expect("write");
        let result = load_collection(&path, KeyType::Text, ValueKind::Any, &registry);
        assert!(matches!(result, Err(ConfigError::NotAnObject { .. })));
    }

    #[test]
    fn value_kind_names() {
        let registry = TypeRegistry::with_basic_types();
        assert_eq!(parse_value_kind("any", &registry).ok(), Some(ValueKind::Any));
        assert_eq!(
            parse_value_kind("int", &registry).ok(),
            Some(ValueKind::Typed(ValueType::Int))
        );
        assert!(matches!(
            parse_value_kind("quux", &registry),
            Err(ConfigError::UnknownValueType(name)) if name == "quux"
        ));
    }

    #[test]
    fn file_save_writes_current_entries() {
        let registry = TypeRegistry::with_basic_types();
        let path = scratch("save.yaml");
        fs::write(&path, "a: 1\n").expect("write");
        let collection = load_collection(&path, KeyType::Text, ValueKind::Any, &registry)
            .expect("collection")
            .into_ref();
        collection
            .borrow_mut()
            .set(MapKey::from("b"), Value::from("two"))
            .expect("set");

        FileSave::new(&path, &collection).save_tmp();
        let reloaded = load_collection(&path, KeyType::Text, ValueKind::Any, &registry)
            .expect("reload");
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get(&MapKey::from("b")), Some(&Value::from("two")));
    }
}
