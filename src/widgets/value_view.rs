//! Editable projection of one map key or value. A view knows which widget
//! shows it, pushes its content into that widget, and writes committed edits
//! back into the collection it was bound to.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::collection::{CollectionRef, ValueKind, WeakCollection};
use crate::core::convert::{clone_to_type, parse_as};
use crate::core::error::CollectionError;
use crate::core::map_key::MapKey;
use crate::core::registry::TypeRegistry;
use crate::core::value::Value;
use crate::core::value_type::ValueType;
use crate::widgets::node::{Node, WidgetKind};

/// Upstream flush hook, called after every edit that reached the collection.
pub trait TmpSave {
    fn save_tmp(&self);
}

impl<F: Fn()> TmpSave for F {
    fn save_tmp(&self) {
        self()
    }
}

pub type TmpSaveRef = Rc<dyn TmpSave>;
pub type KeyViewRef = Rc<RefCell<ValueView>>;

#[derive(Clone)]
enum Binding {
    Unbound,
    Key {
        collection: WeakCollection,
    },
    Value {
        collection: WeakCollection,
        key_view: KeyViewRef,
    },
}

#[derive(Clone)]
pub struct ValueView {
    kind: WidgetKind,
    value: Value,
    binding: Binding,
    tmp_save: Option<TmpSaveRef>,
}

impl ValueView {
    /// Picks the widget for `value`. Lists have no editor and yield `None`.
    pub fn for_value(value: &Value) -> Option<Self> {
        let kind = Self::widget_kind_for(value)?;
        Some(Self {
            kind,
            value: value.clone(),
            binding: Binding::Unbound,
            tmp_save: None,
        })
    }

    fn widget_kind_for(value: &Value) -> Option<WidgetKind> {
        match value {
            Value::None | Value::Int(_) | Value::Float(_) | Value::Text(_) => {
                Some(WidgetKind::TextField)
            }
            Value::Bool(_) => Some(WidgetKind::Checkbox),
            Value::Enum(_) | Value::Type(_) => Some(WidgetKind::ComboBox),
            Value::List(_) => None,
        }
    }

    pub fn bind_as_key(
        &mut self,
        key: &MapKey,
        collection: &CollectionRef,
        tmp_save: Option<TmpSaveRef>,
    ) {
        self.value = key.to_value();
        self.binding = Binding::Key {
            collection: Rc::downgrade(collection),
        };
        self.tmp_save = tmp_save;
    }

    /// Binds a value view; the sibling key view locates the entry on commit,
    /// so key renames are followed.
    pub fn bind_as_value(
        &mut self,
        value: Value,
        collection: &CollectionRef,
        key_view: KeyViewRef,
        tmp_save: Option<TmpSaveRef>,
    ) {
        self.value = value;
        self.binding = Binding::Value {
            collection: Rc::downgrade(collection),
            key_view,
        };
        self.tmp_save = tmp_save;
    }

    pub fn widget_kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn current_value(&self) -> &Value {
        &self.value
    }

    pub fn is_key(&self) -> bool {
        matches!(self.binding, Binding::Key { .. })
    }

    /// The key this view edits (key views) or writes under (value views).
    pub fn map_key(&self) -> Option<MapKey> {
        match &self.binding {
            Binding::Unbound => None,
            Binding::Key { .. } => MapKey::from_value(&self.value),
            Binding::Value { key_view, .. } => key_view.borrow().map_key(),
        }
    }

    /// Dynamic type shown by a type selector; untyped `None` reads as string.
    pub fn dynamic_type(&self) -> ValueType {
        self.value.value_type().unwrap_or(ValueType::Text)
    }

    /// Points the view at a replacement value without touching the
    /// collection.
    pub fn rebind(&mut self, value: Value) {
        if let Some(kind) = Self::widget_kind_for(&value) {
            self.kind = kind;
        }
        self.value = value;
    }

    pub fn push_into_widget(&self, node: &mut Node, registry: &TypeRegistry) {
        if node.kind() != self.kind {
            log::warn!(
                "`{}` is a {} but its view needs a {}",
                node.name(),
                node.kind(),
                self.kind
            );
            return;
        }
        match (&self.value, node.as_combo_box_mut()) {
            (Value::Enum(e), Some(combo)) => {
                combo.items_from_enum(e);
                combo.set_current_value(&self.value);
            }
            (Value::Type(_), Some(combo)) => {
                combo.items_from_types(&registry.all_types(), usize::MAX);
                combo.set_current_value(&self.value);
            }
            _ => node.set_value(self.value.clone()),
        }
    }

    /// Writes an edited widget value through to the collection. Returns
    /// `Ok(false)` when nothing changed or the collection is gone.
    pub fn commit(&mut self, edited: Value, registry: &TypeRegistry) -> Result<bool, CollectionError> {
        let outcome = match self.binding.clone() {
            Binding::Unbound => return Ok(false),
            Binding::Key { collection } => {
                let Some(collection) = collection.upgrade() else {
                    return Ok(false);
                };
                let Some(old) = MapKey::from_value(&self.value) else {
                    return Ok(false);
                };
                let key_type = collection.borrow().key_type();
                let new = match &edited {
                    Value::Text(text) => MapKey::parse(text, key_type)?,
                    other => MapKey::from_value(other).ok_or_else(|| CollectionError::Parse {
                        text: other.to_string(),
                        target: key_type.name().to_string(),
                    })?,
                };
                if new == old {
                    return Ok(false);
                }
                collection.borrow_mut().rename_key(&old, new.clone())?;
                self.value = new.to_value();
                true
            }
            Binding::Value {
                collection,
                key_view,
            } => {
                let Some(collection) = collection.upgrade() else {
                    return Ok(false);
                };
                let declared = match collection.borrow().value_kind() {
                    ValueKind::Typed(ty) => Some(ty.clone()),
                    ValueKind::Any => None,
                };
                let target = declared.unwrap_or_else(|| self.dynamic_type());
                let next = Self::coerce(&edited, &target, registry)?;
                if next == self.value {
                    return Ok(false);
                }
                let Some(key) = key_view.borrow().map_key() else {
                    return Ok(false);
                };
                collection.borrow_mut().set(key, next.clone())?;
                self.rebind(next);
                true
            }
        };
        if let Some(tmp_save) = &self.tmp_save {
            tmp_save.save_tmp();
        }
        Ok(outcome)
    }

    fn coerce(edited: &Value, target: &ValueType, registry: &TypeRegistry) -> Result<Value, CollectionError> {
        let converted = match edited {
            _ if target.holds(edited) => Some(edited.clone()),
            Value::Text(text) => parse_as(text, target, registry),
            other => clone_to_type(other, target, registry),
        };
        converted.ok_or_else(|| CollectionError::Parse {
            text: edited.to_string(),
            target: target.name().to_string(),
        })
    }
}
