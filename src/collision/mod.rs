pub mod detection;
pub mod manifold;
pub mod resolution;

pub use detection::*;
pub use manifold::*;
pub use resolution::*;
