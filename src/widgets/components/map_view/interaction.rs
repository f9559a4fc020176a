use crate::core::value::Value;
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::widgets::toolbar::ToolbarCommand;
use crate::widgets::traits::{Drawable, FocusMode, InteractionResult, Interactive};

use super::grid::SlotNames;
use super::{GridBinding, MapView};

impl MapView {
    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    /// Focuses the toolbar entry or grid widget called `name`, if there is one.
    pub fn set_focus(&mut self, name: &str) -> bool {
        let known = self.focus_order().contains(&name);
        if known {
            self.focus = Some(name.to_string());
        }
        known
    }

    /// Toolbar entries first, then the grid in row order.
    fn focus_order(&self) -> Vec<&str> {
        let toolbar = self.toolbar.entries().iter().map(|entry| entry.button.name());
        let grid = self
            .grid
            .children()
            .iter()
            .filter(|node| node.focus_mode() != FocusMode::None)
            .map(|node| node.name());
        toolbar.chain(grid).collect()
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        if order.is_empty() {
            self.focus = None;
            return;
        }
        let current = self
            .focus
            .as_deref()
            .and_then(|name| order.iter().position(|candidate| *candidate == name));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => order.len() - 1,
            (Some(idx), true) => (idx + 1) % order.len(),
            (Some(idx), false) => (idx + order.len() - 1) % order.len(),
        };
        self.focus = Some(order[next].to_string());
    }

    /// Keeps focus on an existing widget after the grid or toolbar changed.
    pub(super) fn repair_focus(&mut self) {
        let order = self.focus_order();
        let valid = self
            .focus
            .as_deref()
            .is_some_and(|name| order.contains(&name));
        if !valid {
            self.focus = order.first().map(|name| name.to_string());
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.cycle_focus(true);
                return InteractionResult::handled();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.cycle_focus(false);
                return InteractionResult::handled();
            }
            _ => {}
        }
        if self.options.read_only {
            return InteractionResult::ignored();
        }
        let Some(name) = self.focus.clone() else {
            return InteractionResult::ignored();
        };

        let result = if let Some(entry) = self.toolbar.entry_mut(&name) {
            entry.button.on_key(key)
        } else if let Some(node) = self.grid.child_mut(&name) {
            node.on_key(key)
        } else {
            InteractionResult::ignored()
        };
        for action in result.actions.clone() {
            self.handle_action(action);
        }
        result
    }

    /// Routes a widget action through the toolbar and the grid bindings.
    pub fn handle_action(&mut self, action: WidgetAction) {
        match action {
            WidgetAction::Activated { name } => {
                if let Some(idx) = self.toolbar.position(&name) {
                    let command = self.toolbar.entries()[idx].command.clone();
                    match command {
                        ToolbarCommand::Add => {
                            self.add();
                        }
                        ToolbarCommand::Sort => self.toggle_sort(),
                        ToolbarCommand::Custom(_) => {
                            self.run_custom(idx);
                        }
                    }
                } else if let Some(GridBinding::Delete(key)) = self.bindings.get(&name).cloned() {
                    self.delete(&key);
                }
            }
            WidgetAction::Edited { name, value } => match self.bindings.get(&name).cloned() {
                Some(GridBinding::KeyChanged(idx)) => self.commit_key(&name, idx, value),
                Some(GridBinding::ValueChanged(idx)) => self.commit_value(&name, idx, value),
                Some(GridBinding::TypeSelected(idx)) => match value {
                    Value::Type(ty) => {
                        self.change_value_type(idx, ty);
                    }
                    other => log::warn!("{}: `{other}` is not a type", self.name),
                },
                Some(GridBinding::Delete(_)) | None => {
                    log::debug!("{}: no binding for `{name}`", self.name);
                }
            },
        }
    }

    fn commit_key(&mut self, slot: &str, idx: usize, value: Value) {
        let Some(view) = self.keys.get(idx).cloned() else {
            return;
        };
        let result = view.borrow_mut().commit(value, &self.registry);
        match result {
            Ok(true) => {
                if self.focus.as_deref() == Some(slot) {
                    let text = view.borrow().current_value().to_string();
                    self.focus = Some(SlotNames::for_key_text(&text).key);
                }
                self.set_changed();
                self.config_grid();
            }
            Ok(false) => {}
            Err(err) => {
                log::warn!("{}: key edit rejected: {err}", self.name);
                if let Some(node) = self.grid.child_mut(slot) {
                    view.borrow().push_into_widget(node, &self.registry);
                }
            }
        }
    }

    fn commit_value(&mut self, slot: &str, idx: usize, value: Value) {
        let Some(view) = self.values.get_mut(idx) else {
            return;
        };
        let result = view.commit(value, &self.registry);
        if let Some(node) = self.grid.child_mut(slot) {
            view.push_into_widget(node, &self.registry);
        }
        match result {
            Ok(true) => self.set_changed(),
            Ok(false) => {}
            Err(err) => log::warn!("{}: value edit rejected: {err}", self.name),
        }
    }
}
