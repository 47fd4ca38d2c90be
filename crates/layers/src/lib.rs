pub mod cluster;
pub mod controller;
pub mod host;
pub mod markers;
pub mod symbology;
pub mod visibility;

pub use cluster::*;
pub use controller::*;
pub use host::*;
pub use markers::*;
pub use symbology::*;
pub use visibility::*;
