pub mod entity;
pub mod list;
pub mod pager;
pub mod store;
pub mod viewport;

pub use entity::*;
pub use list::*;
pub use pager::*;
pub use store::*;
