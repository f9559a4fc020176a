pub mod config;
pub mod core;
pub mod runtime;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use crate::core::collection;
pub use crate::core::registry;
pub use crate::core::value;

pub use crate::runtime::batch;
pub use crate::runtime::event;

pub use crate::terminal::driver;
pub use crate::terminal::input_event;

pub use crate::ui::span;
pub use crate::ui::style;

pub use crate::widgets::components::map_view::{MapView, MapViewOptions};
pub use crate::widgets::value_view::{TmpSave, ValueView};
