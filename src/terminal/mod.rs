pub mod driver;
pub mod input_event;

pub use driver::App;
pub use input_event::{KeyCode, KeyEvent, KeyModifiers, TerminalEvent, TerminalSize};
