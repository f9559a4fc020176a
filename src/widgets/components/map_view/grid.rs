use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::core::collection::CollectionRef;
use crate::core::error::MapViewError;
use crate::core::map_key::MapKey;
use crate::core::registry::TypeRegistry;
use crate::core::value::Value;
use crate::core::value_type::ValueType;
use crate::runtime::event::MapViewEvent;
use crate::widgets::node::{TypeAndName, WidgetKind};
use crate::widgets::value_view::{KeyViewRef, TmpSaveRef, ValueView};

use super::sort::order;
use super::{GridBinding, MapView};

/// Widget names of one grid row, all derived from the key text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotNames {
    pub key: String,
    pub value: String,
    pub kind: String,
    pub delete: String,
}

impl SlotNames {
    pub fn for_key_text(text: &str) -> Self {
        Self {
            key: format!("key-{text}"),
            value: format!("value-{text}"),
            kind: format!("type-{text}"),
            delete: format!("del-{text}"),
        }
    }
}

pub struct GridRow {
    pub key: MapKey,
    pub slots: SlotNames,
    pub key_view: KeyViewRef,
    pub value_view: ValueView,
}

/// Declarative result of one grid build.
pub struct GridPlan {
    pub polymorphic: bool,
    pub columns: usize,
    pub rows: Vec<GridRow>,
    pub config: Vec<TypeAndName>,
    /// Type-selector choices; empty unless polymorphic.
    pub type_candidates: Vec<ValueType>,
}

impl GridPlan {
    fn empty(polymorphic: bool) -> Self {
        Self {
            polymorphic,
            columns: if polymorphic { 4 } else { 3 },
            rows: Vec::new(),
            config: Vec::new(),
            type_candidates: Vec::new(),
        }
    }
}

/// Enumerates `collection` in display order, binds a key view and a value
/// view per entry, and lists the widgets each row needs. Entries without an
/// editor are skipped; two keys rendering to the same text are rejected.
pub fn build_grid(
    collection: &CollectionRef,
    sort_by_value: bool,
    tmp_save: Option<&TmpSaveRef>,
    registry: &TypeRegistry,
    type_tag: &str,
) -> Result<GridPlan, MapViewError> {
    let map = collection.borrow();
    let mut plan = GridPlan::empty(map.is_polymorphic());
    if plan.polymorphic {
        plan.type_candidates = registry.candidates(type_tag);
    }

    let mut seen = HashSet::new();
    for key in order(map.iter(), sort_by_value) {
        let text = key.to_string();
        if !seen.insert(text.clone()) {
            return Err(MapViewError::DuplicateSlot { text });
        }
        let value = map.get(&key).cloned().unwrap_or_default();
        let (Some(mut key_view), Some(mut value_view)) = (
            ValueView::for_value(&key.to_value()),
            ValueView::for_value(&value),
        ) else {
            log::warn!("no editor for entry `{text}`, skipping");
            continue;
        };

        key_view.bind_as_key(&key, collection, tmp_save.cloned());
        let key_view = Rc::new(RefCell::new(key_view));
        value_view.bind_as_value(value, collection, key_view.clone(), tmp_save.cloned());

        let slots = SlotNames::for_key_text(&text);
        plan.config.push(TypeAndName::new(key_view.borrow().widget_kind(), &slots.key));
        plan.config
            .push(TypeAndName::new(value_view.widget_kind(), &slots.value));
        if plan.polymorphic {
            plan.config
                .push(TypeAndName::new(WidgetKind::ComboBox, &slots.kind));
        }
        plan.config
            .push(TypeAndName::new(WidgetKind::Action, &slots.delete));

        plan.rows.push(GridRow {
            key,
            slots,
            key_view,
            value_view,
        });
    }
    Ok(plan)
}

impl MapView {
    /// Rebuilds the key and value views from the collection and reconciles
    /// the grid against them.
    pub fn config_grid(&mut self) {
        let Some(collection) = self.collection() else {
            return;
        };
        let plan = match build_grid(
            &collection,
            self.sort_by_value,
            self.tmp_save.as_ref(),
            &self.registry,
            &self.options.type_tag,
        ) {
            Ok(plan) => {
                self.grid_error = None;
                plan
            }
            Err(err) => {
                log::error!("{}: {err}", self.name);
                self.grid_error = Some(err);
                GridPlan::empty(collection.borrow().is_polymorphic())
            }
        };
        drop(collection);

        self.polymorphic = plan.polymorphic;
        self.grid.set_columns(plan.columns);
        let report = self.grid.config_children(&plan.config, &mut self.batch);
        let updt = if report.mods {
            self.grid.set_full_rerender();
            report.updt
        } else {
            self.batch.begin()
        };

        self.bindings.clear();
        self.keys.clear();
        self.values.clear();
        for (idx, row) in plan.rows.into_iter().enumerate() {
            self.bindings
                .insert(row.slots.key.clone(), GridBinding::KeyChanged(idx));
            self.bindings
                .insert(row.slots.value.clone(), GridBinding::ValueChanged(idx));
            if plan.polymorphic {
                self.bindings
                    .insert(row.slots.kind.clone(), GridBinding::TypeSelected(idx));
            }
            self.bindings
                .insert(row.slots.delete.clone(), GridBinding::Delete(row.key));

            self.push_row(&row.slots, &row.key_view, &row.value_view, &plan.type_candidates);
            self.keys.push(row.key_view);
            self.values.push(row.value_view);
        }

        self.batch.end(updt);
        log::debug!(
            "{}: {} rows, {} columns, reconfigured: {}",
            self.name,
            self.keys.len(),
            plan.columns,
            report.mods
        );
        self.repair_focus();
        self.view_sig.emit(&MapViewEvent::Rebuilt {
            rows: self.keys.len(),
        });
    }

    fn push_row(
        &mut self,
        slots: &SlotNames,
        key_view: &KeyViewRef,
        value_view: &ValueView,
        candidates: &[ValueType],
    ) {
        let read_only = self.options.read_only;
        if let Some(node) = self.grid.child_mut(&slots.key) {
            key_view.borrow().push_into_widget(node, &self.registry);
            node.set_inactive(read_only);
        }
        if let Some(node) = self.grid.child_mut(&slots.value) {
            value_view.push_into_widget(node, &self.registry);
            node.set_inactive(read_only);
        }
        if let Some(node) = self.grid.child_mut(&slots.kind) {
            if let Some(combo) = node.as_combo_box_mut() {
                combo.items_from_types(candidates, self.options.max_type_label);
                combo.set_current_value(&Value::Type(value_view.dynamic_type()));
            }
            node.set_inactive(read_only);
        }
        if let Some(node) = self.grid.child_mut(&slots.delete) {
            if let Some(button) = node.as_action_mut() {
                button.set_icon("minus");
                button.set_tooltip("delete item");
            }
            node.set_inactive(read_only);
        }
    }
}
