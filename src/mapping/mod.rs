pub mod serializer;
pub mod specification;

pub use serializer::*;
pub use specification::*;
