use crate::core::value::Value;
use crate::core::value_type::{EnumValue, ValueType};
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{Drawable, InteractionResult, Interactive};

#[derive(Debug, Clone, PartialEq)]
pub struct ComboItem {
    pub label: String,
    pub value: Value,
}

/// Choice among a fixed item list. Left/Right move the selection and report
/// the newly selected item's value immediately.
pub struct ComboBox {
    base: WidgetBase,
    items: Vec<ComboItem>,
    current: Option<usize>,
}

impl ComboBox {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(name),
            items: Vec::new(),
            current: None,
        }
    }

    pub fn items(&self) -> &[ComboItem] {
        &self.items
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_value(&self) -> Option<&Value> {
        self.current
            .and_then(|idx| self.items.get(idx))
            .map(|item| &item.value)
    }

    pub fn set_inactive(&mut self, inactive: bool) {
        self.base.set_inactive(inactive);
    }

    pub fn set_items(&mut self, items: Vec<ComboItem>) {
        let keep = self.current_value().cloned();
        self.items = items;
        self.current = keep.and_then(|value| self.position_of(&value));
    }

    /// One item per type, sorted by type name, labels cut to `max_label`
    /// chars.
    pub fn items_from_types(&mut self, types: &[ValueType], max_label: usize) {
        let mut sorted: Vec<&ValueType> = types.iter().collect();
        sorted.sort_by(|a, b| a.name().cmp(b.name()));
        let items = sorted
            .into_iter()
            .map(|ty| ComboItem {
                label: ty.name().chars().take(max_label).collect(),
                value: Value::Type(ty.clone()),
            })
            .collect();
        self.set_items(items);
    }

    /// One item per enum variant, in declaration order.
    pub fn items_from_enum(&mut self, value: &EnumValue) {
        let def = value.def();
        let items = (0..def.variants().len())
            .map(|idx| {
                let variant = EnumValue::new(def.clone(), idx);
                ComboItem {
                    label: variant.variant().to_string(),
                    value: Value::Enum(variant),
                }
            })
            .collect();
        self.set_items(items);
    }

    /// Selects the item holding `value`; unknown values clear the selection.
    pub fn set_current_value(&mut self, value: &Value) {
        self.current = self.position_of(value);
    }

    fn position_of(&self, value: &Value) -> Option<usize> {
        self.items.iter().position(|item| &item.value == value)
    }

    fn step(&mut self, forward: bool) -> InteractionResult {
        if self.items.is_empty() {
            return InteractionResult::ignored();
        }
        let len = self.items.len();
        let next = match (self.current, forward) {
            (None, _) => 0,
            (Some(idx), true) => (idx + 1) % len,
            (Some(idx), false) => (idx + len - 1) % len,
        };
        self.current = Some(next);
        InteractionResult::with_action(WidgetAction::edited(
            self.base.name(),
            self.items[next].value.clone(),
        ))
    }
}

impl Drawable for ComboBox {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn draw(&self, focused: bool) -> SpanLine {
        let label = self
            .current
            .and_then(|idx| self.items.get(idx))
            .map(|item| item.label.as_str())
            .unwrap_or("");
        let style = if focused {
            Style::new().color(Color::Cyan)
        } else {
            Style::new().color(Color::DarkGrey)
        };
        vec![
            Span::new(self.base.focus_marker(focused)),
            Span::styled(format!("‹ {label} ›"), style),
        ]
    }
}

impl Interactive for ComboBox {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if self.base.is_inactive() {
            return InteractionResult::ignored();
        }
        match key.code {
            KeyCode::Left => self.step(false),
            KeyCode::Right | KeyCode::Char(' ') => self.step(true),
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        self.current_value().cloned()
    }

    fn set_value(&mut self, value: Value) {
        self.set_current_value(&value);
    }
}

#[cfg(test)]
mod tests {
    use super::ComboBox;
    use crate::core::value::Value;
    use crate::core::value_type::ValueType;
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::Interactive;

    #[test]
    fn type_items_sort_by_name_and_truncate() {
        let mut combo = ComboBox::new("type-a");
        combo.items_from_types(&[ValueType::Text, ValueType::Bool, ValueType::Int], 3);
        let labels: Vec<&str> = combo.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["boo", "int", "str"]);
    }

    #[test]
    fn stepping_reports_selected_value() {
        let mut combo = ComboBox::new("type-a");
        combo.items_from_types(&[ValueType::Int, ValueType::Text], 50);
        combo.set_current_value(&Value::Type(ValueType::Int));

        let result = combo.on_key(KeyEvent::new(KeyCode::Right));
        assert_eq!(
            result.actions,
            [WidgetAction::edited("type-a", Value::Type(ValueType::Text))]
        );
        let back = combo.on_key(KeyEvent::new(KeyCode::Right));
        assert_eq!(
            back.actions,
            [WidgetAction::edited("type-a", Value::Type(ValueType::Int))]
        );
    }

    #[test]
    fn replacing_items_keeps_selection_when_present() {
        let mut combo = ComboBox::new("type-a");
        combo.items_from_types(&[ValueType::Int, ValueType::Text], 50);
        combo.set_current_value(&Value::Type(ValueType::Text));
        combo.items_from_types(&[ValueType::Text, ValueType::Bool], 50);
        assert_eq!(combo.current_value(), Some(&Value::Type(ValueType::Text)));
    }
}
