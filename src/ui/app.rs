use std::mem;

use anyhow::{Error, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::info;

use crate::db::{log_store_error, ItemStore};
use crate::error::ItemError;
use crate::models::TodoItem;

use super::forms::{ItemForm, CONTENT_LABEL};
use super::helpers::{button_line, centered_rect, item_line, surface_error};
use super::screens::{ItemButton, ItemListScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// The two pages of the application. The form keeps its own state so leaving
/// it discards unsaved input.
enum Screen {
    List,
    Form(ItemForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state: the store handle, the list rows and whichever
/// page is showing.
pub struct App {
    store: ItemStore,
    list: ItemListScreen,
    screen: Screen,
    status: Option<StatusMessage>,
}

impl App {
    /// `items` is the initial load from the store, in storage order.
    pub fn new(store: ItemStore, items: Vec<TodoItem>) -> Self {
        Self {
            store,
            list: ItemListScreen::new(items),
            screen: Screen::List,
            status: None,
        }
    }

    /// Route one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let screen = mem::replace(&mut self.screen, Screen::List);

        self.screen = match screen {
            Screen::List => {
                if self.list.revealed.is_some() {
                    self.handle_buttons_key(code)?
                } else {
                    self.handle_list_key(code, &mut exit)?
                }
            }
            Screen::Form(form) => self.handle_form_key(code, form)?,
        };

        Ok(exit)
    }

    fn handle_list_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Screen> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => self.list.move_selection(-1),
            KeyCode::Down => self.list.move_selection(1),
            KeyCode::PageUp => self.list.move_selection(-5),
            KeyCode::PageDown => self.list.move_selection(5),
            KeyCode::Home => self.list.select_first(),
            KeyCode::End => self.list.select_last(),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(item) = self.list.current_item().cloned() {
                    self.toggle_item(item.id, !item.completed);
                }
            }
            KeyCode::Right | KeyCode::Char('a') => {
                if let Some(item) = self.list.current_item() {
                    let id = item.id;
                    self.list.reveal(id);
                } else {
                    self.set_status("No item selected.", StatusKind::Error);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('n') => {
                self.clear_status();
                return Ok(Screen::Form(ItemForm::blank()));
            }
            _ => {}
        }
        Ok(Screen::List)
    }

    fn handle_buttons_key(&mut self, code: KeyCode) -> Result<Screen> {
        let Some(mut revealed) = self.list.revealed else {
            return Ok(Screen::List);
        };

        let pressed = match code {
            KeyCode::Left | KeyCode::BackTab => {
                revealed.focused = revealed.focused.previous();
                None
            }
            KeyCode::Right | KeyCode::Tab => {
                revealed.focused = revealed.focused.next();
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(revealed.focused),
            KeyCode::Char('e') => Some(ItemButton::Edit),
            KeyCode::Char('d') => Some(ItemButton::Delete),
            KeyCode::Esc | KeyCode::Char('c') => Some(ItemButton::Cancel),
            _ => None,
        };
        self.list.revealed = Some(revealed);

        match pressed {
            Some(ItemButton::Edit) => {
                self.list.hide_buttons();
                Ok(self.open_edit_form(revealed.item_id))
            }
            Some(ItemButton::Delete) => {
                self.delete_item(revealed.item_id);
                Ok(Screen::List)
            }
            Some(ItemButton::Cancel) => {
                self.list.hide_buttons();
                Ok(Screen::List)
            }
            None => Ok(Screen::List),
        }
    }

    fn handle_form_key(&mut self, code: KeyCode, mut form: ItemForm) -> Result<Screen> {
        match code {
            KeyCode::Esc => {
                let message = if form.is_edit() {
                    "Edit cancelled."
                } else {
                    "New item discarded."
                };
                self.set_status(message, StatusKind::Info);
                return Ok(Screen::List);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_item(&form) {
                Ok(()) => return Ok(Screen::List),
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Screen::Form(form))
    }

    /// Restyle the row right away, then persist. A failed write puts the row
    /// back the way it was.
    fn toggle_item(&mut self, id: i64, completed: bool) {
        self.list.set_completed(id, completed);
        match self.store.set_item_completion(id, completed) {
            Ok(()) => self.clear_status(),
            Err(err) => {
                self.list.set_completed(id, !completed);
                self.report_store_error(&err);
            }
        }
    }

    /// Drop the row first, then the stored item. If the store refuses, the
    /// list is reloaded so it matches what is actually persisted.
    fn delete_item(&mut self, id: i64) {
        let removed = self.list.remove(id);
        match self.store.delete_item(id) {
            Ok(()) => {
                let label = removed.map(|item| item.content).unwrap_or_default();
                info!(id, "todo item deleted from list");
                self.set_status(format!("Deleted \"{label}\"."), StatusKind::Info);
            }
            Err(err) => {
                self.report_store_error(&err);
                self.reload_items();
            }
        }
    }

    /// Fetch the item fresh from the store and prefill the form with it.
    fn open_edit_form(&mut self, id: i64) -> Screen {
        match self.store.fetch_item(id) {
            Ok(Some(item)) => {
                self.clear_status();
                Screen::Form(ItemForm::for_item(&item))
            }
            Ok(None) => {
                self.list.remove(id);
                self.set_status("That item no longer exists.", StatusKind::Error);
                Screen::List
            }
            Err(err) => {
                self.report_store_error(&err);
                Screen::List
            }
        }
    }

    /// Create or update from the form. An edit whose item vanished also drops
    /// the stale row so the list matches the store once the form closes.
    fn save_item(&mut self, form: &ItemForm) -> Result<()> {
        let content = form.parse_content()?;
        let saved = match form.item_id {
            None => self.store.create_item(&content),
            Some(id) => self.store.set_item_content(id, &content),
        };

        let item = saved.inspect_err(|err| {
            log_store_error(err);
            if let (Some(id), Some(ItemError::NotFound(_))) =
                (form.item_id, err.downcast_ref::<ItemError>())
            {
                self.list.remove(id);
            }
        })?;
        if form.is_edit() {
            if !self.list.replace(item.clone()) {
                self.list.insert_new(item.clone());
            }
            self.set_status(format!("Updated \"{}\".", item.content), StatusKind::Info);
        } else {
            info!(id = item.id, "todo item added to list");
            self.list.insert_new(item.clone());
            self.set_status(format!("Added \"{}\".", item.content), StatusKind::Info);
        }
        Ok(())
    }

    fn reload_items(&mut self) {
        match self.store.fetch_all_items() {
            Ok(items) => self.list.set_items(items),
            Err(err) => self.report_store_error(&err),
        }
    }

    fn report_store_error(&mut self, err: &Error) {
        log_store_error(err);
        self.set_status(surface_error(err), StatusKind::Error);
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::List => self.draw_item_list(frame, content_area),
            Screen::Form(form) => self.draw_item_form(frame, content_area, form),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }
    }

    fn draw_item_list(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Todo ({} open)", self.open_count()));

        if self.list.items.is_empty() {
            let message = Paragraph::new("Nothing to do. Press '+' to add an item.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let rows: Vec<ListItem> = self
            .list
            .items
            .iter()
            .map(|item| match self.list.revealed {
                Some(revealed) if revealed.item_id == item.id => {
                    ListItem::new(button_line(revealed.focused))
                }
                _ => ListItem::new(item_line(item)),
            })
            .collect();

        let list = List::new(rows)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.list.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_item_form(&self, frame: &mut Frame, area: Rect, form: &ItemForm) {
        let popup_area = centered_rect(70, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(form.title()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![form.build_line(), Line::from("")];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save, Esc to go back",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let offset = u16::try_from(CONTENT_LABEL.len() + form.content_len()).unwrap_or(u16::MAX);
        let cursor_x = inner
            .x
            .saturating_add(offset)
            .min(inner.right().saturating_sub(1));
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match (&self.screen, self.list.revealed) {
            (Screen::Form(_), _) => &[("[Enter]", " Save   "), ("[Esc]", " Back")],
            (Screen::List, Some(_)) => &[
                ("[←→]", " Choose   "),
                ("[Enter]", " Press   "),
                ("[Esc]", " Cancel"),
            ],
            (Screen::List, None) => &[
                ("[↑↓]", " Navigate   "),
                ("[Space]", " Done   "),
                ("[→]", " Actions   "),
                ("[+]", " Add   "),
                ("[Q]", " Quit"),
            ],
        };

        Line::from(
            keys.iter()
                .flat_map(|(key, label)| {
                    [Span::styled(*key, key_style), Span::raw(*label)]
                })
                .collect::<Vec<_>>(),
        )
    }

    fn open_count(&self) -> usize {
        self.list.items.iter().filter(|item| !item.completed).count()
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
