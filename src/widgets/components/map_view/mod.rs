//! Property editor for an associative collection: one grid row per entry
//! with a key widget, a value widget, a type selector for polymorphic maps,
//! and a delete button, under a toolbar with Add and Sort.

use std::collections::HashMap;
use std::rc::{Rc, Weak};

use serde::Deserialize;

use crate::core::collection::{CollectionRef, WeakCollection};
use crate::core::error::MapViewError;
use crate::core::map_key::MapKey;
use crate::core::registry::TypeRegistry;
use crate::core::value_type::ValueType;
use crate::runtime::batch::UpdateBatch;
use crate::runtime::event::MapViewEvent;
use crate::runtime::signal::Signal;
use crate::widgets::frame::Frame;
use crate::widgets::toolbar::ToolBar;
use crate::widgets::value_view::{KeyViewRef, TmpSaveRef, ValueView};

mod commands;
mod grid;
mod interaction;
mod render;
mod sort;
mod toolbar;


pub use grid::{GridPlan, GridRow, SlotNames, build_grid};
pub use sort::order;
pub use toolbar::{ADD_ACTION, BUILTIN_ACTIONS, SORT_ACTION};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapViewOptions {
    /// Initial ordering: by value text instead of key text.
    pub sort_by_value: bool,
    pub read_only: bool,
    /// Registry tag selecting the types offered by type selectors.
    pub type_tag: String,
    /// Type selector labels are cut to this many chars.
    pub max_type_label: usize,
}

impl Default for MapViewOptions {
    fn default() -> Self {
        Self {
            sort_by_value: false,
            read_only: false,
            type_tag: "style-prop".to_string(),
            max_type_label: 50,
        }
    }
}

/// What a realised grid widget is wired to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum GridBinding {
    KeyChanged(usize),
    ValueChanged(usize),
    TypeSelected(usize),
    Delete(MapKey),
}

pub struct MapView {
    name: String,
    registry: Rc<TypeRegistry>,
    options: MapViewOptions,
    collection: Option<WeakCollection>,
    tmp_save: Option<TmpSaveRef>,
    changed: bool,
    sort_by_value: bool,
    keys: Vec<KeyViewRef>,
    values: Vec<ValueView>,
    polymorphic: bool,
    grid: Frame,
    toolbar: ToolBar,
    toolbar_generation: Option<u64>,
    bindings: HashMap<String, GridBinding>,
    batch: UpdateBatch,
    view_sig: Signal<MapViewEvent>,
    focus: Option<String>,
    grid_error: Option<MapViewError>,
}

impl MapView {
    pub fn new(name: impl Into<String>, registry: Rc<TypeRegistry>) -> Self {
        Self {
            name: name.into(),
            registry,
            options: MapViewOptions::default(),
            collection: None,
            tmp_save: None,
            changed: false,
            sort_by_value: false,
            keys: Vec::new(),
            values: Vec::new(),
            polymorphic: false,
            grid: Frame::new("map-grid"),
            toolbar: ToolBar::new(),
            toolbar_generation: None,
            bindings: HashMap::new(),
            batch: UpdateBatch::new(),
            view_sig: Signal::new(),
            focus: None,
            grid_error: None,
        }
    }

    pub fn with_options(mut self, options: MapViewOptions) -> Self {
        self.sort_by_value = options.sort_by_value;
        self.options = options;
        self
    }

    /// Points the view at `collection` and rebuilds from scratch. The view
    /// keeps only a weak reference; the caller owns the collection.
    pub fn set_collection(&mut self, collection: &CollectionRef, tmp_save: Option<TmpSaveRef>) {
        self.collection = Some(Rc::downgrade(collection));
        self.tmp_save = tmp_save;
        self.update_from_collection();
    }

    /// Full update: grid and toolbar.
    pub fn update_from_collection(&mut self) {
        let updt = self.batch.begin();
        self.config_grid();
        self.config_toolbar();
        self.batch.end(updt);
    }

    /// Re-reads every entry. Map values cannot be tracked in place, so this
    /// is a grid rebuild.
    pub fn update_values(&mut self) {
        self.config_grid();
    }

    /// Marks the view as edited and notifies observers.
    pub fn set_changed(&mut self) {
        self.changed = true;
        self.view_sig.emit(&MapViewEvent::Changed);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound collection, unless unbound or already dropped.
    pub fn collection(&self) -> Option<CollectionRef> {
        self.collection.as_ref().and_then(Weak::upgrade)
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn options(&self) -> &MapViewOptions {
        &self.options
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn is_read_only(&self) -> bool {
        self.options.read_only
    }

    pub fn sort_by_value(&self) -> bool {
        self.sort_by_value
    }

    pub fn is_polymorphic(&self) -> bool {
        self.polymorphic
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn keys(&self) -> &[KeyViewRef] {
        &self.keys
    }

    pub fn values(&self) -> &[ValueView] {
        &self.values
    }

    pub fn grid(&self) -> &Frame {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Frame {
        &mut self.grid
    }

    pub fn toolbar(&self) -> &ToolBar {
        &self.toolbar
    }

    pub fn batch(&self) -> &UpdateBatch {
        &self.batch
    }

    pub fn grid_error(&self) -> Option<&MapViewError> {
        self.grid_error.as_ref()
    }

    pub fn view_sig_mut(&mut self) -> &mut Signal<MapViewEvent> {
        &mut self.view_sig
    }

    /// Type-selector candidates for the current options.
    pub fn type_candidates(&self) -> Vec<ValueType> {
        self.registry.candidates(&self.options.type_tag)
    }

    fn flush_tmp_save(&self) {
        if let Some(tmp_save) = &self.tmp_save {
            tmp_save.save_tmp();
        }
    }
}
