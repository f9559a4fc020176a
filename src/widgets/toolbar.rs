use std::fmt;
use std::rc::Rc;

use crate::core::collection::Collection;
use crate::ui::span::{Span, SpanLine};
use crate::widgets::inputs::ActionButton;
use crate::widgets::traits::Drawable;

/// Mutation run by a collection-specific toolbar action.
pub type CollectionAction = Rc<dyn Fn(&mut Collection)>;

#[derive(Clone)]
pub enum ToolbarCommand {
    Add,
    Sort,
    Custom(CollectionAction),
}

impl fmt::Debug for ToolbarCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("Add"),
            Self::Sort => f.write_str("Sort"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToolbarEntry {
    pub button: ActionButton,
    pub command: ToolbarCommand,
}

#[derive(Debug, Default)]
pub struct ToolBar {
    entries: Vec<ToolbarEntry>,
}

impl ToolBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ToolbarEntry] {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&ToolbarEntry> {
        self.entries.iter().find(|e| e.button.name() == name)
    }

    pub fn entry_mut(&mut self, name: &str) -> Option<&mut ToolbarEntry> {
        self.entries.iter_mut().find(|e| e.button.name() == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.button.name() == name)
    }

    pub fn add_action(&mut self, button: ActionButton, command: ToolbarCommand) {
        self.entries.push(ToolbarEntry { button, command });
    }

    /// Adds a collection-specific action named after its label.
    pub fn add_custom(
        &mut self,
        label: impl Into<String>,
        icon: impl Into<String>,
        action: impl Fn(&mut Collection) + 'static,
    ) {
        let label = label.into();
        let name = format!("toolbar-{}", label.to_lowercase().replace(' ', "-"));
        let button = ActionButton::new(name).with_label(label).with_icon(icon);
        self.add_action(button, ToolbarCommand::Custom(Rc::new(action)));
    }

    /// Keeps the first `len` entries.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn draw(&self, focused: Option<&str>) -> SpanLine {
        let mut line = Vec::new();
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                line.push(Span::new(" "));
            }
            let is_focused = focused == Some(entry.button.name());
            line.extend(entry.button.draw(is_focused));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::{ToolBar, ToolbarCommand};
    use crate::core::collection::Collection;
    use crate::core::map_key::KeyType;
    use crate::ui::span::plain_text;
    use crate::widgets::inputs::ActionButton;

    #[test]
    fn custom_actions_are_named_after_label() {
        let mut bar = ToolBar::new();
        bar.add_action(ActionButton::new("toolbar-add").with_label("Add"), ToolbarCommand::Add);
        bar.add_custom("Sort Keys", "update", |_map| {});
        assert_eq!(bar.position("toolbar-sort-keys"), Some(1));
        assert!(matches!(
            bar.entry("toolbar-sort-keys").map(|e| &e.command),
            Some(ToolbarCommand::Custom(_))
        ));
    }

    #[test]
    fn truncate_drops_contributed_entries() {
        let mut bar = ToolBar::new();
        bar.add_action(ActionButton::new("toolbar-add"), ToolbarCommand::Add);
        bar.add_action(ActionButton::new("toolbar-sort"), ToolbarCommand::Sort);
        bar.add_custom("Clear", "delete", |map| map.clear());
        bar.truncate(2);
        assert_eq!(bar.len(), 2);
        assert!(bar.entry("toolbar-clear").is_none());
    }

    #[test]
    fn custom_action_runs_on_collection() {
        let mut bar = ToolBar::new();
        bar.add_custom("Clear", "delete", |map| map.clear());
        let mut map = Collection::polymorphic(KeyType::Text).with_entry("a", 1i64);
        if let Some(ToolbarCommand::Custom(action)) = bar.entries().first().map(|e| e.command.clone()) {
            action(&mut map);
        }
        assert!(map.is_empty());
        assert_eq!(plain_text(&bar.draw(None)), " [✗ Clear]");
    }
}
