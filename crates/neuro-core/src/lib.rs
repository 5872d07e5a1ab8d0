pub mod model;
pub mod registry;
pub mod scoring;

pub use model::*;
pub use registry::*;
pub use scoring::*;
