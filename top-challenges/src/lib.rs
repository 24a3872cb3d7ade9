mod dataset;
pub use dataset::*;
mod error;
pub use error::*;
mod geometry;
pub use geometry::*;
mod point;
pub use point::*;
mod route;
pub use route::*;
mod solution;
pub use solution::*;
