//! Item operations on the store. Each one maps to one or two SQL statements
//! run inside a single transaction.

use anyhow::{Context, Error, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, error};

use super::connection::ItemStore;
use crate::error::ItemError;
use crate::models::TodoItem;

const SELECT_ITEM: &str = "SELECT id, content, completed FROM todo_items WHERE id = ?1";

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<TodoItem> {
    let content: Option<String> = row.get(1)?;
    let completed: Option<i64> = row.get(2)?;
    Ok(TodoItem {
        id: row.get(0)?,
        content: content.unwrap_or_default(),
        completed: completed.unwrap_or(0) != 0,
    })
}

fn select_item(conn: &Connection, id: i64) -> Result<Option<TodoItem>> {
    conn.query_row(SELECT_ITEM, params![id], row_to_item)
        .optional()
        .context("failed to load todo item")
}

impl ItemStore {
    /// Insert a new, uncompleted item and read the stored row back by its
    /// rowid, all inside one transaction.
    pub fn create_item(&mut self, content: &str) -> Result<TodoItem> {
        let tx = self
            .conn
            .transaction()
            .context("failed to begin transaction")?;

        tx.execute(
            "INSERT INTO todo_items (id, content, completed) VALUES (NULL, ?1, 0)",
            params![content],
        )
        .context("failed to insert todo item")?;

        let id = tx.last_insert_rowid();
        let item = select_item(&tx, id)?.ok_or(ItemError::NotFound(id))?;
        tx.commit().context("failed to commit new todo item")?;

        debug!(id = item.id, "created todo item");
        Ok(item)
    }

    /// Every item in insertion order.
    pub fn fetch_all_items(&self) -> Result<Vec<TodoItem>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, content, completed FROM todo_items ORDER BY id")
            .context("failed to prepare todo item query")?;

        let items = stmt
            .query_map([], row_to_item)
            .context("failed to load todo items")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect todo items")?;

        Ok(items)
    }

    /// Look up one item. A missing id is not an error.
    pub fn fetch_item(&self, id: i64) -> Result<Option<TodoItem>> {
        select_item(&self.conn, id)
    }

    /// Flip the completed flag. Fails with `ItemError::NotFound` when no row
    /// has the id, so callers can undo an optimistic UI change.
    pub fn set_item_completion(&mut self, id: i64, completed: bool) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .context("failed to begin transaction")?;

        let updated = tx
            .execute(
                "UPDATE todo_items SET completed = ?1 WHERE id = ?2",
                params![i64::from(completed), id],
            )
            .context("failed to update todo item completion")?;

        if updated == 0 {
            return Err(ItemError::NotFound(id).into());
        }
        tx.commit().context("failed to commit completion change")?;

        debug!(id, completed, "updated todo item completion");
        Ok(())
    }

    /// Replace the item's text and hand back the row as stored.
    pub fn set_item_content(&mut self, id: i64, content: &str) -> Result<TodoItem> {
        let tx = self
            .conn
            .transaction()
            .context("failed to begin transaction")?;

        let updated = tx
            .execute(
                "UPDATE todo_items SET content = ?1 WHERE id = ?2",
                params![content, id],
            )
            .context("failed to update todo item content")?;

        if updated == 0 {
            return Err(ItemError::NotFound(id).into());
        }
        let item = select_item(&tx, id)?.ok_or(ItemError::NotFound(id))?;
        tx.commit().context("failed to commit content change")?;

        debug!(id, "updated todo item content");
        Ok(item)
    }

    /// Remove an item permanently. Deleting an id that is already gone is
    /// reported as `ItemError::NotFound` rather than silently ignored.
    pub fn delete_item(&mut self, id: i64) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .context("failed to begin transaction")?;

        let deleted = tx
            .execute("DELETE FROM todo_items WHERE id = ?1", params![id])
            .context("failed to delete todo item")?;

        if deleted == 0 {
            return Err(ItemError::NotFound(id).into());
        }
        tx.commit().context("failed to commit delete")?;

        debug!(id, "deleted todo item");
        Ok(())
    }
}

/// Shared failure sink for store calls: record the whole error chain.
pub fn log_store_error(err: &Error) {
    error!("todo store operation failed: {err:#}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ItemStore {
        ItemStore::open_in_memory().unwrap()
    }

    fn not_found(err: &Error) -> Option<i64> {
        match err.downcast_ref::<ItemError>() {
            Some(ItemError::NotFound(id)) => Some(*id),
            None => None,
        }
    }

    #[test]
    fn create_returns_stored_row() {
        let mut store = store();
        let item = store.create_item("buy milk").unwrap();

        assert_eq!(item.content, "buy milk");
        assert!(!item.completed);
        assert_eq!(store.fetch_item(item.id).unwrap(), Some(item));
    }

    #[test]
    fn ids_are_unique_and_not_reused() {
        let mut store = store();
        let first = store.create_item("one").unwrap();
        let second = store.create_item("two").unwrap();
        assert!(second.id > first.id);

        store.delete_item(second.id).unwrap();
        let third = store.create_item("three").unwrap();
        assert!(third.id > second.id);
    }

    #[test]
    fn fetch_all_keeps_insertion_order() {
        let mut store = store();
        assert!(store.fetch_all_items().unwrap().is_empty());

        let a = store.create_item("a").unwrap();
        let b = store.create_item("b").unwrap();
        let c = store.create_item("c").unwrap();

        assert_eq!(store.fetch_all_items().unwrap(), vec![a, b, c]);
    }

    #[test]
    fn fetch_missing_item_is_none() {
        let store = store();
        assert_eq!(store.fetch_item(42).unwrap(), None);
    }

    #[test]
    fn completion_round_trips_through_integer_column() {
        let mut store = store();
        let item = store.create_item("walk dog").unwrap();

        store.set_item_completion(item.id, true).unwrap();
        let raw: i64 = store
            .conn
            .query_row(
                "SELECT completed FROM todo_items WHERE id = ?1",
                [item.id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(raw, 1);
        assert!(store.fetch_item(item.id).unwrap().unwrap().completed);

        store.set_item_completion(item.id, false).unwrap();
        assert!(!store.fetch_item(item.id).unwrap().unwrap().completed);
    }

    #[test]
    fn content_update_returns_fresh_item() {
        let mut store = store();
        let item = store.create_item("draft").unwrap();
        store.set_item_completion(item.id, true).unwrap();

        let updated = store.set_item_content(item.id, "final").unwrap();
        assert_eq!(updated.id, item.id);
        assert_eq!(updated.content, "final");
        assert!(updated.completed);
    }

    #[test]
    fn mutations_on_missing_ids_report_not_found() {
        let mut store = store();

        let err = store.set_item_completion(7, true).unwrap_err();
        assert_eq!(not_found(&err), Some(7));

        let err = store.set_item_content(8, "nope").unwrap_err();
        assert_eq!(not_found(&err), Some(8));

        let err = store.delete_item(9).unwrap_err();
        assert_eq!(not_found(&err), Some(9));
    }

    #[test]
    fn delete_removes_only_target() {
        let mut store = store();
        let keep = store.create_item("keep").unwrap();
        let gone = store.create_item("gone").unwrap();

        store.delete_item(gone.id).unwrap();
        assert_eq!(store.fetch_all_items().unwrap(), vec![keep]);
    }

    #[test]
    fn null_columns_read_as_defaults() {
        let store = store();
        store
            .conn
            .execute(
                "INSERT INTO todo_items (content, completed) VALUES (NULL, NULL)",
                [],
            )
            .unwrap();

        let items = store.fetch_all_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].content, "");
        assert!(!items[0].completed);
    }
}
