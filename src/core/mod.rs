pub mod collection;
pub mod convert;
pub mod error;
pub mod map_key;
pub mod registry;
pub mod value;
pub mod value_type;

pub use collection::{Collection, CollectionRef, ValueKind, WeakCollection};
pub use error::{CollectionError, MapViewError};
pub use map_key::{KeyType, MapKey};
pub use registry::TypeRegistry;
pub use value::Value;
pub use value_type::{EditableValue, EnumDef, EnumValue, ValueType};
