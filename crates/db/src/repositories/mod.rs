//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Plain reads and standalone writes accept `&PgPool`; the availability
//! flag primitives and order inserts accept an executor so the lifecycle
//! engine can compose them inside a single transaction.

pub mod order_repo;
pub mod product_repo;
pub mod settings_repo;

pub use order_repo::OrderRepo;
pub use product_repo::ProductRepo;
pub use settings_repo::SettingsRepo;
