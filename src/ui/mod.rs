pub mod span;
pub mod style;
