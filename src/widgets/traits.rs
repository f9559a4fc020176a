use crate::core::value::Value;
use crate::runtime::event::WidgetAction;
use crate::terminal::KeyEvent;
use crate::ui::span::SpanLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    /// Node does not participate in focus cycling.
    None,
    /// A single focusable leaf.
    Leaf,
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.actions.extend(other.actions);
    }
}

// ---------------------------------------------------------------------------
// Drawable / Interactive
// ---------------------------------------------------------------------------

pub trait Drawable {
    fn name(&self) -> &str;
    fn draw(&self, focused: bool) -> SpanLine;
}

pub trait Interactive {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Leaf
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    fn value(&self) -> Option<Value> {
        None
    }

    fn set_value(&mut self, _value: Value) {}
}
