pub mod events;
pub mod model;
pub mod store;

pub use events::*;
pub use model::*;
pub use store::*;
