pub mod convert;
pub mod model;
pub mod params;

pub use convert::*;
pub use model::*;
pub use params::*;
