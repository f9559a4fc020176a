use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{Drawable, InteractionResult, Interactive};

/// Push button. Activation is reported by name; whoever owns the button
/// decides what it does.
#[derive(Debug, Clone)]
pub struct ActionButton {
    base: WidgetBase,
    label: String,
    icon: String,
    tooltip: String,
}

impl ActionButton {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(name),
            label: String::new(),
            icon: String::new(),
            tooltip: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) {
        self.icon = icon.into();
    }

    pub fn set_tooltip(&mut self, tooltip: impl Into<String>) {
        self.tooltip = tooltip.into();
    }

    pub fn set_inactive(&mut self, inactive: bool) {
        self.base.set_inactive(inactive);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    fn glyph(&self) -> &str {
        match self.icon.as_str() {
            "plus" => "+",
            "minus" => "-",
            "update" => "↻",
            "delete" => "✗",
            _ => "",
        }
    }
}

impl Drawable for ActionButton {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn draw(&self, focused: bool) -> SpanLine {
        let text = match (self.glyph(), self.label.as_str()) {
            ("", "") => "[ ]".to_string(),
            (glyph, "") => format!("[{glyph}]"),
            ("", label) => format!("[{label}]"),
            (glyph, label) => format!("[{glyph} {label}]"),
        };
        let style = if focused {
            Style::new().color(Color::White).background(Color::Blue).bold()
        } else {
            Style::new().color(Color::DarkGrey)
        };
        vec![
            Span::new(self.base.focus_marker(focused)),
            Span::styled(text, style),
        ]
    }
}

impl Interactive for ActionButton {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if self.base.is_inactive() {
            return InteractionResult::ignored();
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                InteractionResult::with_action(WidgetAction::activated(self.base.name()))
            }
            _ => InteractionResult::ignored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ActionButton;
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::Interactive;

    #[test]
    fn enter_reports_activation_by_name() {
        let mut button = ActionButton::new("del-a").with_icon("minus");
        let result = button.on_key(KeyEvent::new(KeyCode::Enter));
        assert_eq!(result.actions, [WidgetAction::activated("del-a")]);
    }

    #[test]
    fn inactive_button_ignores_keys() {
        let mut button = ActionButton::new("del-a");
        button.set_inactive(true);
        assert!(!button.on_key(KeyEvent::new(KeyCode::Enter)).handled);
    }
}
