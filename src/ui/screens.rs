use crate::models::TodoItem;

/// Buttons revealed on a list row by the "swipe" gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ItemButton {
    Edit,
    Delete,
    Cancel,
}

impl ItemButton {
    pub(crate) const ALL: [ItemButton; 3] =
        [ItemButton::Edit, ItemButton::Delete, ItemButton::Cancel];

    pub(crate) fn label(self) -> &'static str {
        match self {
            ItemButton::Edit => "Edit",
            ItemButton::Delete => "Delete",
            ItemButton::Cancel => "Cancel",
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            ItemButton::Edit => ItemButton::Delete,
            ItemButton::Delete => ItemButton::Cancel,
            ItemButton::Cancel => ItemButton::Edit,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            ItemButton::Edit => ItemButton::Cancel,
            ItemButton::Delete => ItemButton::Edit,
            ItemButton::Cancel => ItemButton::Delete,
        }
    }
}

/// Which row currently shows its buttons instead of its content. Only one row
/// can be in this state at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RevealedButtons {
    pub(crate) item_id: i64,
    pub(crate) focused: ItemButton,
}

/// State behind the home screen: the items newest-first plus the cursor.
pub(crate) struct ItemListScreen {
    pub(crate) items: Vec<TodoItem>,
    pub(crate) selected: usize,
    pub(crate) revealed: Option<RevealedButtons>,
}

impl ItemListScreen {
    /// Takes items in storage order and flips them so the newest sits on top,
    /// matching where freshly created items get inserted.
    pub(crate) fn new(mut items: Vec<TodoItem>) -> Self {
        items.reverse();
        Self {
            items,
            selected: 0,
            revealed: None,
        }
    }

    pub(crate) fn current_item(&self) -> Option<&TodoItem> {
        self.items.get(self.selected)
    }

    /// Add a row for a new item at the top, unless one already exists for the
    /// id, in which case that row is refreshed instead.
    pub(crate) fn insert_new(&mut self, item: TodoItem) {
        if let Some(pos) = self.position(item.id) {
            self.items[pos] = item;
            self.selected = pos;
        } else {
            self.items.insert(0, item);
            self.selected = 0;
        }
    }

    /// Refresh an existing row in place. Returns false when no row matches.
    pub(crate) fn replace(&mut self, item: TodoItem) -> bool {
        match self.position(item.id) {
            Some(pos) => {
                self.items[pos] = item;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_completed(&mut self, id: i64, completed: bool) {
        if let Some(pos) = self.position(id) {
            self.items[pos].completed = completed;
        }
    }

    pub(crate) fn remove(&mut self, id: i64) -> Option<TodoItem> {
        let pos = self.position(id)?;
        let removed = self.items.remove(pos);
        if self.revealed.map(|r| r.item_id) == Some(id) {
            self.revealed = None;
        }
        self.ensure_in_bounds();
        Some(removed)
    }

    /// Swap in a freshly loaded list, keeping the cursor where possible.
    pub(crate) fn set_items(&mut self, items: Vec<TodoItem>) {
        let focus = self.current_item().map(|item| item.id);
        *self = Self::new(items);
        if let Some(pos) = focus.and_then(|id| self.position(id)) {
            self.selected = pos;
        }
    }

    pub(crate) fn reveal(&mut self, item_id: i64) {
        self.revealed = Some(RevealedButtons {
            item_id,
            focused: ItemButton::Edit,
        });
    }

    pub(crate) fn hide_buttons(&mut self) {
        self.revealed = None;
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn ensure_in_bounds(&mut self) {
        if self.items.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.items.len() {
            self.selected = self.items.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, content: &str) -> TodoItem {
        TodoItem {
            id,
            content: content.to_string(),
            completed: false,
        }
    }

    #[test]
    fn newest_items_come_first() {
        let screen = ItemListScreen::new(vec![item(1, "old"), item(2, "new")]);
        let ids: Vec<i64> = screen.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn insert_new_prepends_once() {
        let mut screen = ItemListScreen::new(vec![item(1, "a")]);
        screen.move_selection(5);

        screen.insert_new(item(2, "b"));
        assert_eq!(screen.items[0].id, 2);
        assert_eq!(screen.selected, 0);

        screen.insert_new(item(2, "b again"));
        assert_eq!(screen.items.len(), 2);
        assert_eq!(screen.items[0].content, "b again");
    }

    #[test]
    fn removing_revealed_row_hides_buttons_and_clamps_cursor() {
        let mut screen = ItemListScreen::new(vec![item(1, "a"), item(2, "b")]);
        screen.select_last();
        screen.reveal(1);

        assert!(screen.remove(1).is_some());
        assert_eq!(screen.revealed, None);
        assert_eq!(screen.selected, 0);
        assert!(screen.remove(1).is_none());
    }

    #[test]
    fn selection_is_clamped() {
        let mut screen = ItemListScreen::new(vec![item(1, "a"), item(2, "b"), item(3, "c")]);
        screen.move_selection(-3);
        assert_eq!(screen.selected, 0);
        screen.move_selection(10);
        assert_eq!(screen.selected, 2);

        let mut empty = ItemListScreen::new(Vec::new());
        empty.move_selection(1);
        empty.select_last();
        assert_eq!(empty.selected, 0);
        assert!(empty.current_item().is_none());
    }

    #[test]
    fn buttons_cycle_both_ways() {
        for button in ItemButton::ALL {
            assert_eq!(button.next().previous(), button);
        }
        assert_eq!(ItemButton::Cancel.next(), ItemButton::Edit);
    }
}
