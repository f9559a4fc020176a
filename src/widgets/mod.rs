pub mod base;
pub mod components;
pub mod frame;
pub mod inputs;
pub mod node;
pub mod toolbar;
pub mod traits;
pub mod value_view;
