//! HTTP handlers: thin translation between requests and the lifecycle
//! engine / repositories.

pub mod orders;
pub mod products;
pub mod settings;
