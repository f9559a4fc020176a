use crate::core::value::Value;
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{Drawable, InteractionResult, Interactive};

pub struct Checkbox {
    base: WidgetBase,
    checked: bool,
}

impl Checkbox {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(name),
            checked: false,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_inactive(&mut self, inactive: bool) {
        self.base.set_inactive(inactive);
    }
}

impl Drawable for Checkbox {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn draw(&self, focused: bool) -> SpanLine {
        let (text, style) = if self.checked {
            ("[✓] true", Style::new().color(Color::Green))
        } else {
            ("[ ] false", Style::new().color(Color::Red))
        };
        vec![
            Span::new(self.base.focus_marker(focused)),
            Span::styled(text, style),
        ]
    }
}

impl Interactive for Checkbox {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if self.base.is_inactive() {
            return InteractionResult::ignored();
        }
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.checked = !self.checked;
                InteractionResult::with_action(WidgetAction::edited(
                    self.base.name(),
                    Value::Bool(self.checked),
                ))
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Bool(self.checked))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(checked) = value.as_bool() {
            self.checked = checked;
        }
    }
}
