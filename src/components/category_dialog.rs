//! Category picker dialog
//!
//! Lists every catalog category with its record count; the first entry is
//! the "all categories" label.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::catalog::Catalog;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Category picker
pub struct CategoryDialog {
    /// Category labels with their record counts
    pub categories: Vec<(String, usize)>,
    pub selected_index: usize,
    pub list_state: ListState,
    /// The category active when the dialog opened
    pub current: String,
}

impl Default for CategoryDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            categories: Vec::new(),
            selected_index: 0,
            list_state,
            current: String::new(),
        }
    }

    /// Load categories and put the cursor on the active one
    pub fn set_categories(&mut self, catalog: &Catalog, current: &str) {
        self.categories = catalog
            .categories()
            .iter()
            .map(|c| (c.clone(), catalog.category_count(c)))
            .collect();
        self.current = current.to_string();
        self.selected_index = self
            .categories
            .iter()
            .position(|(c, _)| c == current)
            .unwrap_or(0);
        self.list_state.select(Some(self.selected_index));
    }

    pub fn get_selected_category(&self) -> Option<&str> {
        self.categories
            .get(self.selected_index)
            .map(|(c, _)| c.as_str())
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.categories.len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for CategoryDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Enter => self
                .get_selected_category()
                .map(|c| Action::SetCategory(c.to_string())),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                Some(Action::ModalUp)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Some(Action::ModalDown)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_width = 44u16.min(area.width.saturating_sub(4));
        let popup_height = (self.categories.len() as u16 + 8).min(area.height.saturating_sub(2));
        let popup_area = centered_popup(area, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Category list
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled("Current: ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.current.clone(), Style::default().fg(Color::Cyan)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Category ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, chunks[0]);

        let items: Vec<ListItem> = self
            .categories
            .iter()
            .map(|(category, count)| {
                let is_current = *category == self.current;
                ListItem::new(Line::from(vec![
                    Span::styled(
                        if is_current { "● " } else { "  " },
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(
                        category.clone(),
                        if is_current {
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::White)
                        },
                    ),
                    Span::styled(format!(" ({})", count), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Select  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::fixtures::{catalog, record};
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut CategoryDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_opens_on_current_category_with_counts() {
        let catalog = catalog(vec![
            record(1, "a", "Gothic"),
            record(2, "b", "Surreal"),
            record(3, "c", "Gothic"),
        ]);
        let mut dialog = CategoryDialog::new();
        dialog.set_categories(&catalog, "Surreal");

        assert_eq!(
            dialog.categories,
            vec![
                ("All".to_string(), 3),
                ("Gothic".to_string(), 2),
                ("Surreal".to_string(), 1)
            ]
        );
        assert_eq!(dialog.selected_index, 2);
        assert_eq!(dialog.get_selected_category(), Some("Surreal"));
    }

    #[test]
    fn test_navigate_and_select() {
        let catalog = catalog(vec![record(1, "a", "Gothic"), record(2, "b", "Surreal")]);
        let mut dialog = CategoryDialog::new();
        dialog.set_categories(&catalog, "All");

        press(&mut dialog, KeyCode::Char('k'));
        assert_eq!(dialog.selected_index, 0);
        press(&mut dialog, KeyCode::Char('j'));
        press(&mut dialog, KeyCode::Char('j'));
        press(&mut dialog, KeyCode::Char('j'));
        assert_eq!(dialog.selected_index, 2);

        assert_eq!(
            press(&mut dialog, KeyCode::Enter),
            Some(Action::SetCategory("Surreal".to_string()))
        );
        assert_eq!(press(&mut dialog, KeyCode::Esc), Some(Action::CloseModal));
    }
}
