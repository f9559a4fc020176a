use std::fmt;

use crate::core::value::Value;
use crate::terminal::KeyEvent;
use crate::ui::span::SpanLine;
use crate::widgets::inputs::{ActionButton, Checkbox, ComboBox, TextField};
use crate::widgets::traits::{Drawable, FocusMode, InteractionResult, Interactive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    TextField,
    Checkbox,
    ComboBox,
    Action,
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextField => "text-field",
            Self::Checkbox => "checkbox",
            Self::ComboBox => "combo-box",
            Self::Action => "action",
        };
        f.write_str(name)
    }
}

/// Declarative child slot: what kind of widget, under which name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeAndName {
    pub kind: WidgetKind,
    pub name: String,
}

impl TypeAndName {
    pub fn new(kind: WidgetKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// A realised widget.
pub enum Node {
    TextField(TextField),
    Checkbox(Checkbox),
    ComboBox(ComboBox),
    Action(ActionButton),
}

impl Node {
    pub fn new(kind: WidgetKind, name: impl Into<String>) -> Self {
        let name = name.into();
        match kind {
            WidgetKind::TextField => Self::TextField(TextField::new(name)),
            WidgetKind::Checkbox => Self::Checkbox(Checkbox::new(name)),
            WidgetKind::ComboBox => Self::ComboBox(ComboBox::new(name)),
            WidgetKind::Action => Self::Action(ActionButton::new(name)),
        }
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::TextField(_) => WidgetKind::TextField,
            Self::Checkbox(_) => WidgetKind::Checkbox,
            Self::ComboBox(_) => WidgetKind::ComboBox,
            Self::Action(_) => WidgetKind::Action,
        }
    }

    pub fn name(&self) -> &str {
        self.as_drawable().name()
    }

    pub fn matches(&self, slot: &TypeAndName) -> bool {
        self.kind() == slot.kind && self.name() == slot.name
    }

    pub fn draw(&self, focused: bool) -> SpanLine {
        self.as_drawable().draw(focused)
    }

    pub fn focus_mode(&self) -> FocusMode {
        self.as_interactive().focus_mode()
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        self.as_interactive_mut().on_key(key)
    }

    pub fn value(&self) -> Option<Value> {
        self.as_interactive().value()
    }

    pub fn set_value(&mut self, value: Value) {
        self.as_interactive_mut().set_value(value);
    }

    pub fn set_inactive(&mut self, inactive: bool) {
        match self {
            Self::TextField(w) => w.set_inactive(inactive),
            Self::Checkbox(w) => w.set_inactive(inactive),
            Self::ComboBox(w) => w.set_inactive(inactive),
            Self::Action(w) => w.set_inactive(inactive),
        }
    }

    pub fn as_combo_box_mut(&mut self) -> Option<&mut ComboBox> {
        match self {
            Self::ComboBox(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_action(&self) -> Option<&ActionButton> {
        match self {
            Self::Action(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_action_mut(&mut self) -> Option<&mut ActionButton> {
        match self {
            Self::Action(w) => Some(w),
            _ => None,
        }
    }

    fn as_drawable(&self) -> &dyn Drawable {
        match self {
            Self::TextField(w) => w,
            Self::Checkbox(w) => w,
            Self::ComboBox(w) => w,
            Self::Action(w) => w,
        }
    }

    fn as_interactive(&self) -> &dyn Interactive {
        match self {
            Self::TextField(w) => w,
            Self::Checkbox(w) => w,
            Self::ComboBox(w) => w,
            Self::Action(w) => w,
        }
    }

    fn as_interactive_mut(&mut self) -> &mut dyn Interactive {
        match self {
            Self::TextField(w) => w,
            Self::Checkbox(w) => w,
            Self::ComboBox(w) => w,
            Self::Action(w) => w,
        }
    }
}
