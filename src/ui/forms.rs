use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::TodoItem;

/// Label printed in front of the editable value.
pub(crate) const CONTENT_LABEL: &str = "Content: ";

/// State of the item form screen. `item_id` plays the role of the hidden id
/// field: `None` means the form creates a new item.
#[derive(Default, Clone, Debug)]
pub(crate) struct ItemForm {
    pub(crate) content: String,
    pub(crate) item_id: Option<i64>,
    pub(crate) error: Option<String>,
}

impl ItemForm {
    /// Empty form for the add button.
    pub(crate) fn blank() -> Self {
        Self::default()
    }

    /// Populate the form from an existing item when editing.
    pub(crate) fn for_item(item: &TodoItem) -> Self {
        Self {
            content: item.content.clone(),
            item_id: Some(item.id),
            error: None,
        }
    }

    pub(crate) fn is_edit(&self) -> bool {
        self.item_id.is_some()
    }

    pub(crate) fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Item"
        } else {
            "New Item"
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            false
        } else {
            self.content.push(ch);
            true
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.content.pop();
    }

    /// Validate the input and return the text ready for persistence.
    pub(crate) fn parse_content(&self) -> Result<String> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(anyhow!("Item content is required."));
        }
        Ok(content.to_string())
    }

    /// Render the single input line of the form.
    pub(crate) fn build_line(&self) -> Line<'static> {
        let (display, style) = if self.content.is_empty() {
            ("<required>".to_string(), Style::default().fg(Color::DarkGray))
        } else {
            (self.content.clone(), Style::default().fg(Color::Yellow))
        };

        Line::from(vec![Span::raw(CONTENT_LABEL), Span::styled(display, style)])
    }

    pub(crate) fn content_len(&self) -> usize {
        self.content.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_form_creates() {
        let form = ItemForm::blank();
        assert!(!form.is_edit());
        assert_eq!(form.title(), "New Item");
        assert!(form.parse_content().is_err());
    }

    #[test]
    fn edit_form_carries_id_and_content() {
        let item = TodoItem {
            id: 4,
            content: "call mum".to_string(),
            completed: true,
        };
        let form = ItemForm::for_item(&item);
        assert_eq!(form.item_id, Some(4));
        assert_eq!(form.title(), "Edit Item");
        assert_eq!(form.parse_content().unwrap(), "call mum");
    }

    #[test]
    fn typing_ignores_control_characters_and_trims_on_save() {
        let mut form = ItemForm::blank();
        for ch in "  hi\t ".chars() {
            form.push_char(ch);
        }
        assert_eq!(form.content, "  hi ");
        assert_eq!(form.parse_content().unwrap(), "hi");

        form.backspace();
        form.backspace();
        form.backspace();
        assert_eq!(form.content_len(), 2);
        assert!(form.parse_content().is_err());
    }
}
