use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::core::collection::Collection;
use crate::core::value_type::{EnumDef, ValueType};
use crate::widgets::toolbar::ToolBar;

pub const BASIC_TYPE_TAG: &str = "basic-type";

/// Appends collection-specific actions after the builtin toolbar entries.
pub type ToolbarContributor = Rc<dyn Fn(&Collection, &mut ToolBar)>;

struct Registered {
    ty: ValueType,
    tags: Vec<String>,
}

/// Process-wide type registry. Built once at start-up and handed to every
/// map view that needs type-selector candidates or custom toolbars.
#[derive(Default)]
pub struct TypeRegistry {
    types: Vec<Registered>,
    enums: Vec<Registered>,
    toolbars: HashMap<String, ToolbarContributor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_basic_types() -> Self {
        let mut registry = Self::new();
        for ty in ValueType::basic_types() {
            registry.register_type(ty, [BASIC_TYPE_TAG]);
        }
        registry
    }

    pub fn register_type<I, S>(&mut self, ty: ValueType, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags.into_iter().map(Into::into).collect();
        match ty {
            ValueType::Enum(_) => self.enums.push(Registered { ty, tags }),
            _ => self.types.push(Registered { ty, tags }),
        }
        self
    }

    pub fn register_enum<I, S>(&mut self, def: EnumDef, tags: I) -> Arc<EnumDef>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let def = Arc::new(def);
        self.register_type(ValueType::Enum(def.clone()), tags);
        def
    }

    pub fn register_toolbar(
        &mut self,
        type_name: impl Into<String>,
        contributor: impl Fn(&Collection, &mut ToolBar) + 'static,
    ) -> &mut Self {
        self.toolbars.insert(type_name.into(), Rc::new(contributor));
        self
    }

    pub fn toolbar_for(&self, type_name: &str) -> Option<ToolbarContributor> {
        self.toolbars.get(type_name).cloned()
    }

    /// Types offered by a type selector: types then enums carrying `tag`,
    /// the basic types, and the type-descriptor type. First occurrence of a
    /// name wins.
    pub fn candidates(&self, tag: &str) -> Vec<ValueType> {
        let tagged = |r: &&Registered| r.tags.iter().any(|t| t == tag);
        let basic = |r: &&Registered| r.tags.iter().any(|t| t == BASIC_TYPE_TAG);

        let mut out: IndexMap<String, ValueType> = IndexMap::new();
        let ordered = self
            .types
            .iter()
            .filter(tagged)
            .chain(self.enums.iter().filter(tagged))
            .chain(self.types.iter().filter(basic))
            .map(|r| r.ty.clone())
            .chain(std::iter::once(ValueType::Type));
        for ty in ordered {
            out.entry(ty.name().to_string()).or_insert(ty);
        }
        out.into_values().collect()
    }

    /// Every registered type plus the type-descriptor type, in registration
    /// order; the item list of a type-valued slot.
    pub fn all_types(&self) -> Vec<ValueType> {
        let mut out: IndexMap<String, ValueType> = IndexMap::new();
        let all = self
            .types
            .iter()
            .chain(self.enums.iter())
            .map(|r| r.ty.clone())
            .chain(std::iter::once(ValueType::Type));
        for ty in all {
            out.entry(ty.name().to_string()).or_insert(ty);
        }
        out.into_values().collect()
    }

    pub fn lookup(&self, name: &str) -> Option<ValueType> {
        if name == ValueType::Type.name() {
            return Some(ValueType::Type);
        }
        self.types
            .iter()
            .chain(self.enums.iter())
            .map(|r| &r.ty)
            .find(|ty| ty.name() == name)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::TypeRegistry;
    use crate::core::value_type::{EnumDef, ValueType};

    #[test]
    fn candidates_list_tagged_then_basic_then_type() {
        let mut registry = TypeRegistry::with_basic_types();
        registry.register_enum(EnumDef::new("Align", ["left", "right"]), ["style-prop"]);
        registry.register_enum(EnumDef::new("Hidden", ["a"]), ["other"]);
        registry.register_type(ValueType::Float, ["style-prop"]);

        let names: Vec<String> = registry
            .candidates("style-prop")
            .iter()
            .map(|ty| ty.name().to_string())
            .collect();
        assert_eq!(names, ["float", "Align", "bool", "int", "string", "type"]);
    }

    #[test]
    fn lookup_finds_enums_and_type_descriptor() {
        let mut registry = TypeRegistry::with_basic_types();
        let def = registry.register_enum(EnumDef::new("Align", ["left"]), ["style-prop"]);
        assert_eq!(registry.lookup("Align"), Some(ValueType::Enum(def)));
        assert_eq!(registry.lookup("type"), Some(ValueType::Type));
        assert_eq!(registry.lookup("missing"), None);
    }
}
