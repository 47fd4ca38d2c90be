pub mod event_bus;
pub mod events;
pub mod timer;

pub use event_bus::*;
pub use events::*;
pub use timer::*;
