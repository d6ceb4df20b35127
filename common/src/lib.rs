pub mod model;
pub mod metadata;

pub use model::*;
pub use metadata::*;
