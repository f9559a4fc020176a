use std::collections::HashMap;

use crate::runtime::batch::UpdateBatch;
use crate::widgets::node::{Node, TypeAndName, WidgetKind};

/// Outcome of [`Frame::config_children`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigReport {
    /// The child list changed shape.
    pub mods: bool,
    /// This call opened the outermost update bracket; hand it to
    /// `UpdateBatch::end`.
    pub updt: bool,
    pub created: usize,
    pub reused: usize,
    pub removed: usize,
}

/// Grid container whose children are realised from a declarative
/// [`TypeAndName`] list.
pub struct Frame {
    name: String,
    columns: usize,
    children: Vec<Node>,
    full_rerender: bool,
}

impl Frame {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: 1,
            children: Vec::new(),
            full_rerender: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|node| node.name() == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|node| node.name() == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|node| node.name() == name)
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, Node> {
        self.children.chunks(self.columns)
    }

    pub fn set_full_rerender(&mut self) {
        self.full_rerender = true;
    }

    pub fn needs_full_rerender(&self) -> bool {
        self.full_rerender
    }

    /// Clears and returns the full re-render request.
    pub fn take_full_rerender(&mut self) -> bool {
        std::mem::take(&mut self.full_rerender)
    }

    /// Realises `config`. When the current children already match slot for
    /// slot nothing is touched. Otherwise children are rebuilt in `config`
    /// order, reusing any existing widget with the same kind and name so its
    /// state survives; only the difference is created or dropped.
    pub fn config_children(
        &mut self,
        config: &[TypeAndName],
        batch: &mut UpdateBatch,
    ) -> ConfigReport {
        let same = self.children.len() == config.len()
            && self
                .children
                .iter()
                .zip(config)
                .all(|(node, slot)| node.matches(slot));
        if same {
            return ConfigReport::default();
        }

        let updt = batch.begin();
        let mut existing: HashMap<(WidgetKind, String), Node> = self
            .children
            .drain(..)
            .map(|node| ((node.kind(), node.name().to_string()), node))
            .collect();

        let mut report = ConfigReport {
            mods: true,
            updt,
            ..ConfigReport::default()
        };
        for slot in config {
            match existing.remove(&(slot.kind, slot.name.clone())) {
                Some(node) => {
                    report.reused += 1;
                    self.children.push(node);
                }
                None => {
                    report.created += 1;
                    self.children.push(Node::new(slot.kind, slot.name.clone()));
                }
            }
        }
        report.removed = existing.len();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use crate::core::value::Value;
    use crate::runtime::batch::UpdateBatch;
    use crate::widgets::node::{TypeAndName, WidgetKind};

    fn slots(names: &[&str]) -> Vec<TypeAndName> {
        names
            .iter()
            .map(|name| TypeAndName::new(WidgetKind::TextField, *name))
            .collect()
    }

    #[test]
    fn unchanged_config_is_a_no_op() {
        let mut frame = Frame::new("grid");
        let mut batch = UpdateBatch::new();
        let first = frame.config_children(&slots(&["a", "b"]), &mut batch);
        assert!(first.mods);
        assert_eq!(first.created, 2);
        batch.end(first.updt);

        let second = frame.config_children(&slots(&["a", "b"]), &mut batch);
        assert!(!second.mods);
        assert!(!second.updt);
    }

    #[test]
    fn reconfigure_reuses_widgets_by_name() {
        let mut frame = Frame::new("grid");
        let mut batch = UpdateBatch::new();
        let report = frame.config_children(&slots(&["a", "b"]), &mut batch);
        batch.end(report.updt);
        if let Some(node) = frame.child_mut("b") {
            node.set_value(Value::from("kept"));
        }

        let report = frame.config_children(&slots(&["b", "c"]), &mut batch);
        batch.end(report.updt);
        assert_eq!((report.reused, report.created, report.removed), (1, 1, 1));
        let names: Vec<&str> = frame.children().iter().map(|n| n.name()).collect();
        assert_eq!(names, ["b", "c"]);
        assert_eq!(
            frame.child("b").and_then(|n| n.value()),
            Some(Value::from("kept"))
        );
    }

    #[test]
    fn kind_change_replaces_widget() {
        let mut frame = Frame::new("grid");
        let mut batch = UpdateBatch::new();
        frame.config_children(&slots(&["a"]), &mut batch);
        let report = frame.config_children(
            &[TypeAndName::new(WidgetKind::Checkbox, "a")],
            &mut batch,
        );
        assert_eq!((report.reused, report.created, report.removed), (0, 1, 1));
        assert_eq!(
            frame.child("a").map(|n| n.kind()),
            Some(WidgetKind::Checkbox)
        );
    }
}
