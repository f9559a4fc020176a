pub mod batch;
pub mod event;
pub mod signal;

pub use batch::UpdateBatch;
pub use event::{MapViewEvent, WidgetAction};
pub use signal::Signal;
