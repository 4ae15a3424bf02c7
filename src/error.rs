//! Typed errors raised by the item store. They travel inside `anyhow::Error`
//! and can be recovered with `downcast_ref` when a caller cares which one it got.

/// Failures specific to todo item operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ItemError {
    #[error("Todo item {0} not found")]
    NotFound(i64),
}
