//! Typed read descriptions for the remote store (select list, embeds, equality filters).

mod builder;
mod params;
pub use builder::{Embed, Filter, SelectQuery};
pub use params::FilterValue;
