pub mod payload;
pub mod provider;
pub mod search;

pub use payload::*;
pub use provider::*;
pub use search::*;
