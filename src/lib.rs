//! Core library surface for the task-list TUI application.
//!
//! The binary only wires these pieces together; keeping them in a library
//! lets the tests drive the store and the UI state directly.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

/// Runtime locations for the database and logs.
pub use config::Config;

/// The item store and its shared error handler.
pub use db::{log_store_error, ItemStore};

pub use error::ItemError;
pub use logging::init_logging;
pub use models::TodoItem;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
