//! HTTP handlers for resource CRUD, order aggregates and unmatched requests.

pub mod fallback;
pub mod orders;
pub mod resource;
pub use fallback::*;
pub use orders::*;
pub use resource::*;
