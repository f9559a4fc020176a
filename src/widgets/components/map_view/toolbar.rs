use crate::widgets::inputs::ActionButton;
use crate::widgets::toolbar::ToolbarCommand;

use super::MapView;

pub const ADD_ACTION: &str = "toolbar-add";
pub const SORT_ACTION: &str = "toolbar-sort";
/// Add and Sort; everything after them is contributed per collection type.
pub const BUILTIN_ACTIONS: usize = 2;

impl MapView {
    /// Fills the toolbar once per bound collection: the builtin Add and Sort
    /// actions, then whatever the registry contributes for the collection's
    /// type. Read-only views get no toolbar.
    pub fn config_toolbar(&mut self) {
        let Some(collection) = self.collection() else {
            return;
        };
        if self.options.read_only {
            return;
        }
        let map = collection.borrow();
        if self.toolbar_generation == Some(map.generation()) {
            return;
        }

        if self.toolbar.is_empty() {
            self.toolbar.add_action(
                ActionButton::new(ADD_ACTION)
                    .with_label("Add")
                    .with_icon("plus")
                    .with_tooltip("add an entry"),
                ToolbarCommand::Add,
            );
            self.toolbar.add_action(
                ActionButton::new(SORT_ACTION)
                    .with_label("Sort")
                    .with_icon("update")
                    .with_tooltip("Switch between sorting by the keys vs. the values"),
                ToolbarCommand::Sort,
            );
        }
        self.toolbar.truncate(BUILTIN_ACTIONS);
        if let Some(contribute) = self.registry.toolbar_for(map.type_name()) {
            contribute(&map, &mut self.toolbar);
        }
        self.toolbar_generation = Some(map.generation());
        log::debug!(
            "{}: toolbar bound to `{}` with {} actions",
            self.name,
            map.type_name(),
            self.toolbar.len()
        );
    }
}
