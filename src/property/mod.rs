pub mod descriptor;
pub mod kind;
pub mod trees;

pub use descriptor::*;
pub use kind::*;
pub use trees::*;
