pub mod action;
pub mod checkbox;
pub mod combo;
pub mod text;
pub mod text_edit;

pub use action::ActionButton;
pub use checkbox::Checkbox;
pub use combo::{ComboBox, ComboItem};
pub use text::TextField;
