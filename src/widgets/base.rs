#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetBase {
    name: String,
    inactive: bool,
}

impl WidgetBase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inactive: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_inactive(&self) -> bool {
        self.inactive
    }

    pub fn set_inactive(&mut self, inactive: bool) {
        self.inactive = inactive;
    }

    pub fn focus_marker(&self, focused: bool) -> &'static str {
        if focused { ">" } else { " " }
    }
}
