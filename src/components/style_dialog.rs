//! Style detail dialog
//!
//! The enlarged view of one style: image reference, description, example
//! prompt and numbered tags. Tags and the category act as filter shortcuts.

use crate::action::Action;
use crate::component::Component;
use crate::model::browse::BrowseState;
use crate::model::style::StyleRecord;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Tags reachable with the digit keys
const MAX_TAG_SHORTCUTS: usize = 9;

#[derive(Default)]
pub struct StyleDialog {
    code: String,
    category: String,
    tags: Vec<String>,
}

impl StyleDialog {
    /// Remember what the key shortcuts act on
    pub fn set_style(&mut self, style: &StyleRecord) {
        self.code = style.code.clone();
        self.category = style.category.clone();
        self.tags = style.tags.clone();
    }

    pub fn draw_with_style(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        style: &StyleRecord,
        browse: &BrowseState,
    ) -> Result<()> {
        let margin = 4;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin / 2,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin),
        );
        frame.render_widget(Clear, dialog_area);

        let label = Style::default().fg(Color::DarkGray);
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Image     ", label),
                Span::styled(
                    style.image_or_placeholder().to_string(),
                    Style::default().fg(Color::Blue),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Category  ", label),
                Span::styled(style.category.clone(), Style::default().fg(Color::Cyan)),
                Span::styled("  (c to filter)", label),
            ]),
            Line::from(vec![
                Span::styled("  Code      ", label),
                Span::styled(
                    format!("--sref {}", style.code),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                if browse.is_copied(&style.code) {
                    Span::styled(" ✓ Copied! ", Style::default().fg(Color::Black).bg(Color::Green))
                } else {
                    Span::styled(" y Copy ", Style::default().fg(Color::Black).bg(Color::Cyan))
                },
            ]),
            Line::from(""),
        ];

        if let Some(description) = &style.description {
            lines.push(Line::from(Span::styled(
                format!("  {}", description),
                Style::default().fg(Color::White),
            )));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled("  Example", label)));
        lines.push(Line::from(Span::styled(
            format!("  {}", style.example),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));

        if !style.tags.is_empty() {
            let mut spans = vec![Span::styled("  Tags  ", label)];
            for (i, tag) in style.tags.iter().enumerate() {
                if i < MAX_TAG_SHORTCUTS {
                    spans.push(Span::styled(
                        format!("{} ", i + 1),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ));
                }
                spans.push(Span::styled(
                    format!("{}   ", tag),
                    Style::default().fg(Color::Cyan),
                ));
            }
            lines.push(Line::from(spans));
        }

        let mut title = vec![Span::styled(
            format!(" {} ", style.name),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(badge) = style.badge() {
            title.push(Span::styled(
                format!("[{}] ", badge),
                Style::default().fg(Color::LightRed),
            ));
        }

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(Line::from(title))
                    .title_bottom(
                        Line::from(" 1-9 search tag · c category · y copy · Esc close ")
                            .alignment(Alignment::Center),
                    ),
            );
        frame.render_widget(paragraph, dialog_area);
        Ok(())
    }
}

impl Component for StyleDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('o') => Some(Action::CloseModal),
            KeyCode::Char('y') | KeyCode::Enter => Some(Action::CopyCode(self.code.clone())),
            KeyCode::Char('c') => Some(Action::SetCategory(self.category.clone())),
            KeyCode::Char(d @ '1'..='9') => {
                let index = d as usize - '1' as usize;
                self.tags.get(index).cloned().map(Action::SearchTag)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the record; see draw_with_style
        Ok(())
    }
}
