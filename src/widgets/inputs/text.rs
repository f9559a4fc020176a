use super::text_edit;
use crate::core::value::Value;
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{Drawable, InteractionResult, Interactive};

/// Single-line editor. Typing changes a draft; Enter commits it, Esc
/// restores the last committed text.
pub struct TextField {
    base: WidgetBase,
    committed: String,
    draft: String,
    cursor: usize,
}

impl TextField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(name),
            committed: String::new(),
            draft: String::new(),
            cursor: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.committed
    }

    pub fn set_inactive(&mut self, inactive: bool) {
        self.base.set_inactive(inactive);
    }

    fn commit(&mut self) -> InteractionResult {
        if !self.is_dirty() {
            return InteractionResult::handled();
        }
        self.committed = self.draft.clone();
        InteractionResult::with_action(WidgetAction::edited(
            self.base.name(),
            Value::Text(self.draft.clone()),
        ))
    }

    fn revert(&mut self) -> bool {
        if !self.is_dirty() {
            return false;
        }
        self.draft = self.committed.clone();
        self.cursor = text_edit::char_count(&self.draft);
        true
    }
}

impl Drawable for TextField {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn draw(&self, focused: bool) -> SpanLine {
        let style = if self.is_dirty() {
            Style::new().color(Color::Yellow)
        } else if focused {
            Style::new().color(Color::Cyan)
        } else {
            Style::default()
        };
        let mut line = vec![Span::new(self.base.focus_marker(focused))];
        if focused && !self.base.is_inactive() {
            let split = self
                .draft
                .char_indices()
                .nth(self.cursor)
                .map(|(idx, _)| idx)
                .unwrap_or(self.draft.len());
            let (before, after) = self.draft.split_at(split);
            line.push(Span::styled(before, style));
            line.push(Span::styled("▏", Style::new().color(Color::DarkGrey)));
            line.push(Span::styled(after, style));
        } else {
            line.push(Span::styled(self.draft.clone(), style));
        }
        line
    }
}

impl Interactive for TextField {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if self.base.is_inactive() {
            return InteractionResult::ignored();
        }
        let edited = match key.code {
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                text_edit::delete_word_left(&mut self.draft, &mut self.cursor)
            }
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return InteractionResult::ignored();
            }
            KeyCode::Char(ch) => {
                text_edit::insert_char(&mut self.draft, &mut self.cursor, ch);
                true
            }
            KeyCode::Backspace => text_edit::backspace_char(&mut self.draft, &mut self.cursor),
            KeyCode::Delete => text_edit::delete_char(&mut self.draft, &mut self.cursor),
            KeyCode::Left => text_edit::move_left(&mut self.cursor, &self.draft),
            KeyCode::Right => text_edit::move_right(&mut self.cursor, &self.draft),
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(&self.draft);
                true
            }
            KeyCode::Enter => return self.commit(),
            KeyCode::Esc => self.revert(),
            _ => return InteractionResult::ignored(),
        };
        if edited {
            InteractionResult::handled()
        } else {
            InteractionResult::ignored()
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.draft.clone()))
    }

    fn set_value(&mut self, value: Value) {
        self.committed = value.to_string();
        self.draft = self.committed.clone();
        self.cursor = text_edit::char_count(&self.draft);
    }
}

#[cfg(test)]
mod tests {
    use super::TextField;
    use crate::core::value::Value;
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::Interactive;

    fn type_text(field: &mut TextField, text: &str) {
        for ch in text.chars() {
            field.on_key(KeyEvent::new(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn enter_commits_draft_once() {
        let mut field = TextField::new("value-a");
        field.set_value(Value::Int(1));
        type_text(&mut field, "2");

        let result = field.on_key(KeyEvent::new(KeyCode::Enter));
        assert_eq!(
            result.actions,
            [WidgetAction::edited("value-a", Value::from("12"))]
        );

        let again = field.on_key(KeyEvent::new(KeyCode::Enter));
        assert!(again.actions.is_empty());
    }

    #[test]
    fn esc_restores_committed_text() {
        let mut field = TextField::new("key-a");
        field.set_value(Value::from("a"));
        type_text(&mut field, "bc");
        assert!(field.is_dirty());
        field.on_key(KeyEvent::new(KeyCode::Esc));
        assert_eq!(field.text(), "a");
    }

    #[test]
    fn inactive_fields_ignore_keys() {
        let mut field = TextField::new("key-a");
        field.set_inactive(true);
        let result = field.on_key(KeyEvent::new(KeyCode::Char('x')));
        assert!(!result.handled);
        assert_eq!(field.text(), "");
    }
}
