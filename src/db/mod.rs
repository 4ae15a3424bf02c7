//! Persistence module split across logical submodules.

mod connection;
mod items;

pub use connection::{ensure_schema, ItemStore};
pub use items::log_store_error;
