use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::TodoItem;

use super::screens::ItemButton;

/// Build the visible row for an item: checkbox plus content, crossed out and
/// dimmed once completed.
pub(crate) fn item_line(item: &TodoItem) -> Line<'static> {
    let content_style = if item.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::styled(
            format!("{} ", item.checkbox()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(item.content.clone(), content_style),
    ])
}

/// Row shown instead of the content while an item's buttons are revealed.
pub(crate) fn button_line(focused: ItemButton) -> Line<'static> {
    let mut spans = Vec::with_capacity(ItemButton::ALL.len() * 2);
    for button in ItemButton::ALL {
        let base = match button {
            ItemButton::Delete => Style::default().fg(Color::Red),
            _ => Style::default().fg(Color::White),
        };
        let style = if button == focused {
            base.add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            base
        };
        spans.push(Span::styled(format!("[ {} ]", button.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.pop();
    Line::from(spans)
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Context};

    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn completed_items_are_crossed_out() {
        let mut item = TodoItem {
            id: 1,
            content: "laundry".to_string(),
            completed: false,
        };
        let open = item_line(&item);
        assert_eq!(text(&open), "[ ] laundry");
        assert!(!open.spans[1]
            .style
            .add_modifier
            .contains(Modifier::CROSSED_OUT));

        item.completed = true;
        let done = item_line(&item);
        assert_eq!(text(&done), "[x] laundry");
        assert!(done.spans[1]
            .style
            .add_modifier
            .contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn button_line_lists_all_buttons() {
        let line = button_line(ItemButton::Delete);
        assert_eq!(text(&line), "[ Edit ] [ Delete ] [ Cancel ]");
        assert!(line.spans[2]
            .style
            .add_modifier
            .contains(Modifier::REVERSED));
    }

    #[test]
    fn surface_error_picks_root_cause() {
        let err = Err::<(), _>(anyhow!("Todo item 3 not found"))
            .context("failed to delete")
            .unwrap_err();
        assert_eq!(surface_error(&err), "Todo item 3 not found");
    }
}
