use crate::core::collection::Collection;
use crate::core::convert::clone_to_type;
use crate::core::map_key::MapKey;
use crate::core::value::Value;
use crate::core::value_type::ValueType;
use crate::widgets::toolbar::ToolbarCommand;

use super::MapView;

impl MapView {
    /// Shared shape of every collection edit: bracket, mutate, flush upstream,
    /// rebuild, mark dirty. `mutate` reports whether it changed anything;
    /// when it did not, the rest is skipped.
    fn edit_collection(&mut self, mutate: impl FnOnce(&mut Collection) -> bool) -> bool {
        let Some(collection) = self.collection() else {
            return false;
        };
        let updt = self.batch.begin();
        let changed = {
            let mut map = collection.borrow_mut();
            mutate(&mut *map)
        };
        if changed {
            self.flush_tmp_save();
            self.config_grid();
            self.set_changed();
        }
        self.batch.end(updt);
        changed
    }

    /// Appends a zero-valued entry under a key not yet in use.
    pub fn add(&mut self) -> bool {
        let name = self.name.clone();
        self.edit_collection(|map| match map.add_default() {
            Ok(key) => {
                log::debug!("{name}: added `{key}`");
                true
            }
            Err(err) => {
                log::warn!("{name}: cannot add entry: {err}");
                false
            }
        })
    }

    /// Removes `key`. An absent key is left alone and nobody is notified.
    pub fn delete(&mut self, key: &MapKey) -> bool {
        let present = self
            .collection()
            .is_some_and(|collection| collection.borrow().contains_key(key));
        if !present {
            log::debug!("{}: `{key}` is not in the collection", self.name);
            return false;
        }
        self.edit_collection(|map| map.remove(key).is_some())
    }

    /// Gives the value in row `idx` the type `ty`: a zero value stays zero,
    /// anything else is converted, falling back to zero when it cannot be.
    /// Only polymorphic maps have a per-row type.
    pub fn change_value_type(&mut self, idx: usize, ty: ValueType) -> bool {
        if !self.polymorphic {
            log::warn!("{}: values are statically typed", self.name);
            return false;
        }
        let Some(collection) = self.collection() else {
            return false;
        };
        let (Some(key_view), Some(value_view)) = (self.keys.get(idx), self.values.get(idx)) else {
            log::warn!("{}: no row {idx}", self.name);
            return false;
        };
        let Some(key) = key_view.borrow().map_key() else {
            return false;
        };
        let current = value_view.current_value().clone();
        let next = if current.is_zero() {
            ty.zero()
        } else {
            clone_to_type(&current, &ty, &self.registry).unwrap_or_else(|| {
                log::warn!(
                    "{}: `{current}` does not convert to {ty}, using its zero value",
                    self.name
                );
                ty.zero()
            })
        };

        let updt = self.batch.begin();
        let stored = collection.borrow_mut().set(key, next.clone());
        drop(collection);
        let changed = match stored {
            Ok(_) => {
                if let Some(view) = self.values.get_mut(idx) {
                    view.rebind(next);
                }
                self.flush_tmp_save();
                self.config_grid();
                self.set_changed();
                true
            }
            Err(err) => {
                log::warn!("{}: cannot change value type: {err}", self.name);
                false
            }
        };
        self.batch.end(updt);
        changed
    }

    /// Flips between ordering rows by key text and by value text. The
    /// collection is untouched and the view is not marked dirty.
    pub fn toggle_sort(&mut self) {
        self.sort_by_value = !self.sort_by_value;
        self.config_grid();
    }

    /// Runs the contributed toolbar action at `action_index`.
    pub fn run_custom(&mut self, action_index: usize) -> bool {
        let command = self
            .toolbar
            .entries()
            .get(action_index)
            .map(|entry| entry.command.clone());
        match command {
            Some(ToolbarCommand::Custom(action)) => self.edit_collection(|map| {
                action(map);
                true
            }),
            _ => {
                log::warn!("{}: toolbar entry {action_index} is not a custom action", self.name);
                false
            }
        }
    }

    /// Read-only snapshot of row `idx`'s value.
    pub fn value_at(&self, idx: usize) -> Option<Value> {
        self.values.get(idx).map(|view| view.current_value().clone())
    }
}
