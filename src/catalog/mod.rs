//! In-memory catalog: entities, read-side queries and engagement mutators.

mod engagement;
mod error;
pub mod models;
mod queries;
mod seed;
mod store;

pub use error::CatalogError;
pub use store::CatalogStore;
