//! Home component - Main application screen
//!
//! Displays the featured banner, search/sort/view controls, the category
//! bar, and the result grid or list. Owns cursor and scroll state; the
//! browse state itself lives in App.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{
    calculate_main_layout, grid_columns, grid_rows, truncate, CARD_HEIGHT, CARD_WIDTH,
};
use crate::model::browse::BrowseState;
use crate::model::catalog::Catalog;
use crate::model::style::StyleRecord;
use crate::model::ui::ViewMode;
use crate::services::visible::Visible;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Cursor position past which the back-to-top hint appears
pub const BACK_TO_TOP_AFTER: usize = 12;

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

/// Home component for the main browser view
pub struct HomeComponent {
    /// Index of the focused record in the visible slice
    pub cursor: usize,

    /// Whether search mode is active
    pub search_mode: bool,

    /// Card columns in the last drawn grid
    pub columns: usize,

    /// First grid row on screen
    pub scroll_row: usize,

    /// List selection state
    pub list_state: ListState,
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeComponent {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            search_mode: false,
            columns: 1,
            scroll_row: 0,
            list_state: ListState::default(),
        }
    }

    /// The focused record, if any record is visible
    pub fn selected<'a>(&self, visible: &Visible<'a>) -> Option<&'a StyleRecord> {
        visible.records.get(self.cursor).copied()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn next(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move one row down: a full grid row, or one line in list view
    pub fn next_row(&mut self, len: usize, view: ViewMode) {
        let step = self.row_step(view);
        if self.cursor + step < len {
            self.cursor += step;
        } else if len > 0 {
            self.cursor = len - 1;
        }
    }

    pub fn previous_row(&mut self, view: ViewMode) {
        let step = self.row_step(view);
        self.cursor = self.cursor.saturating_sub(step);
    }

    pub fn select_last(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
    }

    pub fn scroll_to_top(&mut self) {
        self.cursor = 0;
        self.scroll_row = 0;
        self.list_state.select(Some(0));
    }

    /// Keep the cursor inside the visible slice after it shrinks
    pub fn clamp(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    pub fn show_back_to_top(&self) -> bool {
        self.cursor >= BACK_TO_TOP_AFTER
    }

    fn row_step(&self, view: ViewMode) -> usize {
        match view {
            ViewMode::Grid => self.columns.max(1),
            ViewMode::List => 1,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }

            // Navigation
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextItem),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevItem),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') | KeyCode::Char('t') | KeyCode::Home => Some(Action::ScrollToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),

            // Filters
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Char('f') => Some(Action::OpenCategoryPicker),
            KeyCode::Char('c') => Some(Action::SelectRecordCategory),
            KeyCode::Char(']') => Some(Action::NextCategory),
            KeyCode::Char('[') => Some(Action::PrevCategory),
            KeyCode::Char('x') => Some(Action::ClearFilters),

            // Sort, view, paging
            KeyCode::Char('s') => Some(Action::CycleSort),
            KeyCode::Char('v') => Some(Action::ToggleViewMode),
            KeyCode::Char('m') => Some(Action::LoadMore),

            // Clipboard
            KeyCode::Char('y') | KeyCode::Enter => Some(Action::CopySelected),
            KeyCode::Char('Y') => Some(Action::CopyFeatured),

            // Modals
            KeyCode::Char('o') => Some(Action::OpenStyleDetail),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),

            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the catalog; see draw_home_screen
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub catalog: &'a Catalog,
    pub browse: &'a BrowseState,
    pub status_message: Option<&'a str>,
}

/// "Showing X of Y styles in category C for search "S""
pub fn results_summary(visible: &Visible<'_>, browse: &BrowseState, catalog: &Catalog) -> String {
    let mut summary = format!(
        "Showing {} of {} styles",
        visible.records.len(),
        visible.total
    );
    if browse.selected_category() != catalog.all_label() {
        summary.push_str(&format!(" in category {}", browse.selected_category()));
    }
    if !browse.search_term().is_empty() {
        summary.push_str(&format!(" for search \"{}\"", browse.search_term()));
    }
    summary
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let visible = ctx.browse.visible(ctx.catalog);
    home.clamp(visible.records.len());

    let featured = ctx.catalog.featured();
    let layout = calculate_main_layout(area, featured.is_some());

    if let (Some(banner_area), Some(style)) = (layout.featured, featured) {
        render_featured(frame, banner_area, style, ctx.browse);
    }
    render_controls(frame, layout.controls, home, ctx.browse);
    render_categories(frame, layout.categories, ctx);

    let summary = Paragraph::new(Line::from(Span::styled(
        results_summary(&visible, ctx.browse, ctx.catalog),
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(summary, layout.summary);

    if visible.is_empty() {
        let lines = empty_state_lines(ctx.browse.has_active_filters(ctx.catalog));
        render_empty_state(frame, layout.results, lines);
    } else {
        match ctx.browse.view_mode() {
            ViewMode::Grid => render_grid(frame, layout.results, home, &visible, ctx.browse),
            ViewMode::List => render_list(frame, layout.results, home, &visible, ctx.browse),
        }
    }

    render_footer(frame, layout.footer, home, &visible);
    render_status_bar(frame, layout.status, home, &visible, ctx);
    render_help_bar(frame, layout.help, home, ctx.browse);

    Ok(())
}

fn copy_span(code: &str, browse: &BrowseState) -> Span<'static> {
    if browse.is_copied(code) {
        Span::styled(
            " ✓ Copied! ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" Copy ", Style::default().fg(Color::Black).bg(Color::Cyan))
    }
}

fn badge_span(style: &StyleRecord) -> Option<Span<'static>> {
    let color = if style.featured {
        Color::LightRed
    } else {
        Color::Green
    };
    style.badge().map(|badge| {
        Span::styled(
            format!(" {} ", badge),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
    })
}

fn render_featured(frame: &mut Frame, area: Rect, style: &StyleRecord, browse: &BrowseState) {
    let width = area.width.saturating_sub(4) as usize;
    let lines = vec![
        Line::from(vec![
            Span::styled(
                style.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("--sref {}", style.code),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  "),
            copy_span(&style.code, browse),
            Span::styled("  Y", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            truncate(&style.example, width),
            Style::default().fg(Color::Gray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightRed))
        .title(" ★ Featured Style ")
        .title_style(
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_controls(frame: &mut Frame, area: Rect, home: &HomeComponent, browse: &BrowseState) {
    let search_style = if home.search_mode {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if home.search_mode { "▏" } else { "" };

    let search_text = if browse.search_term().is_empty() && !home.search_mode {
        Span::styled(
            "Search by name, tag or code...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(format!("{}{}", browse.search_term(), cursor), search_style)
    };

    let line = Line::from(vec![
        Span::styled(" 🔍 ", Style::default().fg(Color::Cyan)),
        search_text,
        Span::raw("   "),
        Span::styled("│ Sort: ", Style::default().fg(Color::DarkGray)),
        Span::styled(browse.sort_key().label(), Style::default().fg(Color::Yellow)),
        Span::styled("  │ View: ", Style::default().fg(Color::DarkGray)),
        Span::styled(browse.view_mode().label(), Style::default().fg(Color::Yellow)),
    ]);

    let border = if home.search_mode {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_categories(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let mut spans = vec![Span::raw(" ")];
    for category in ctx.catalog.categories() {
        let count = ctx.catalog.category_count(category);
        let label = format!(" {} ({}) ", category, count);
        if category == ctx.browse.selected_category() {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(Color::Gray)));
        }
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Text for an empty result set. The clear-filters hint only appears when
/// there is something to clear.
fn empty_state_lines(has_filters: bool) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No styles found",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if has_filters {
        lines.extend([
            Line::from(""),
            Line::from(Span::styled(
                "Try adjusting your search or filters",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " x ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Clear filters"),
            ]),
        ]);
    }
    lines
}

fn render_empty_state(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn render_grid(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    visible: &Visible<'_>,
    browse: &BrowseState,
) {
    let columns = grid_columns(area.width);
    let rows_on_screen = grid_rows(area.height);
    home.columns = columns;

    // Keep the cursor's row on screen
    let cursor_row = home.cursor / columns;
    if cursor_row < home.scroll_row {
        home.scroll_row = cursor_row;
    } else if cursor_row >= home.scroll_row + rows_on_screen {
        home.scroll_row = cursor_row + 1 - rows_on_screen;
    }

    let first = home.scroll_row * columns;
    let last = (first + rows_on_screen * columns).min(visible.records.len());

    for (offset, style) in visible.records[first..last].iter().enumerate() {
        let index = first + offset;
        let row = (offset / columns) as u16;
        let col = (offset % columns) as u16;
        let card = Rect::new(
            area.x + col * CARD_WIDTH,
            area.y + row * CARD_HEIGHT,
            CARD_WIDTH.min(area.width),
            CARD_HEIGHT.min(area.height.saturating_sub(row * CARD_HEIGHT)),
        );
        render_card(frame, card, style, index == home.cursor, browse);
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    style: &StyleRecord,
    focused: bool,
    browse: &BrowseState,
) {
    let inner_width = area.width.saturating_sub(2) as usize;

    let mut title_spans = vec![Span::styled(
        truncate(&style.name, inner_width.saturating_sub(2)),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(badge) = badge_span(style) {
        title_spans.push(Span::raw(" "));
        title_spans.push(badge);
    }

    let lines = vec![
        Line::from(Span::styled(
            truncate(&style.category, inner_width),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(vec![
            Span::styled(style.code.clone(), Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            copy_span(&style.code, browse),
        ]),
        Line::from(Span::styled(
            truncate(&style.tags.join(" · "), inner_width),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let border = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if style.featured {
        Style::default().fg(Color::LightRed)
    } else if style.new {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Line::from(title_spans));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    visible: &Visible<'_>,
    browse: &BrowseState,
) {
    let name_width = (area.width as usize / 3).max(12);

    let items: Vec<ListItem> = visible
        .records
        .iter()
        .map(|style| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<width$}", truncate(&style.name, name_width), width = name_width),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {:<16}", truncate(&style.category, 16)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!(" {:<12} ", style.code),
                    Style::default().fg(Color::Yellow),
                ),
            ];
            if browse.is_copied(&style.code) {
                spans.push(copy_span(&style.code, browse));
            }
            if let Some(badge) = badge_span(style) {
                spans.push(Span::raw(" "));
                spans.push(badge);
            }
            spans.push(Span::styled(
                format!(" {}", style.tags.join(", ")),
                Style::default().fg(Color::DarkGray),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    home.list_state.select(Some(home.cursor));

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

    frame.render_stateful_widget(list, area, &mut home.list_state);
}

fn render_footer(frame: &mut Frame, area: Rect, home: &HomeComponent, visible: &Visible<'_>) {
    let mut spans = Vec::new();
    if visible.has_more {
        spans.push(Span::styled(
            " m ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" Load more ({} remaining)", visible.remaining()),
            Style::default().fg(Color::Cyan),
        ));
    }
    if home.show_back_to_top() {
        if !spans.is_empty() {
            spans.push(Span::raw("    "));
        }
        spans.push(Span::styled(
            " t ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(" ↑ Back to top", Style::default().fg(Color::Gray)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    home: &HomeComponent,
    visible: &Visible<'_>,
    ctx: &HomeRenderContext,
) {
    let mut spans = vec![];

    if let Some(style) = home.selected(visible) {
        spans.push(Span::styled(
            format!(" {} ", style.name),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", style.image_or_placeholder()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(code) = ctx.browse.copied_code() {
        spans.push(Span::styled(
            format!("  Copied {} to clipboard", code),
            Style::default().fg(Color::Green),
        ));
    }

    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!("  {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent, browse: &BrowseState) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let help_spans = if home.search_mode {
        vec![
            key(" Esc/Enter ", Color::Yellow),
            Span::raw("Done  "),
            key(" Backspace ", Color::Cyan),
            Span::raw("Delete  "),
            Span::styled(
                format!("Search: {}", browse.search_term()),
                Style::default().fg(Color::Cyan),
            ),
        ]
    } else {
        vec![
            key(" q ", Color::Yellow),
            Span::raw("Quit "),
            key(" / ", Color::Cyan),
            Span::raw("Search "),
            key(" f ", Color::Cyan),
            Span::raw("Category "),
            key(" s ", Color::Cyan),
            Span::raw("Sort "),
            key(" v ", Color::Cyan),
            Span::raw("View "),
            key(" y ", Color::Green),
            Span::raw("Copy "),
            key(" o ", Color::Magenta),
            Span::raw("Details "),
            key(" x ", Color::Yellow),
            Span::raw("Clear "),
            key(" ? ", Color::White),
            Span::raw("Help"),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(help_spans)), area);
}
