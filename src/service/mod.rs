//! GatewayService: per-resource list / get / create / aggregate over the remote store.

mod crud;
pub mod validation;
pub use crud::{parse_payload, GatewayService};
