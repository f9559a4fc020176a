use crate::core::value::Value;

/// Actions emitted by widgets in `InteractionResult`.
/// These flow upward from widgets to the map view that owns them.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetAction {
    /// The widget named `name` committed a new value.
    Edited { name: String, value: Value },
    /// A button was pressed.
    Activated { name: String },
}

impl WidgetAction {
    pub fn edited(name: impl Into<String>, value: Value) -> Self {
        Self::Edited {
            name: name.into(),
            value,
        }
    }

    pub fn activated(name: impl Into<String>) -> Self {
        Self::Activated { name: name.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Edited { name, .. } | Self::Activated { name } => name,
        }
    }
}

/// Notifications a map view sends to whoever embeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapViewEvent {
    /// Some edit reached the collection.
    Changed,
    /// The grid was configured again; `rows` entries are shown.
    Rebuilt { rows: usize },
}
