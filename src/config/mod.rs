pub mod types;
pub mod loader;
pub mod resources;

pub use types::*;
pub use loader::*;
pub use resources::*;
