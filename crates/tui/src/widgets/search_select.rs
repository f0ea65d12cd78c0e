//! Terminal rendering of a search-select control.
//!
//! The input box and the results popup are drawn in two passes so a form can
//! draw every input first and the open popup last, on top of whatever lies
//! below the input. Both passes record the screen rectangles they used in a
//! [`SearchSelectRegions`], which mouse handling hit-tests against.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Widget},
};
use vx_core::search::{PopupView, SearchSelect};

/// Braille spinner shown while a lookup is in flight.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Most candidate rows shown at once; the list scrolls with the highlight.
pub const MAX_VISIBLE_ROWS: usize = 6;

pub const NO_RESULTS: &str = "No results found.";

const SEARCH_GLYPH: &str = "›";
const CLEAR_MARKER: &str = "×";

/// Row renderer for the popup.
pub type CandidateRenderer<'a, T> = &'a dyn Fn(&T) -> Line<'static>;

/// What a mouse position falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The input box, or the popup outside any row.
    Input,
    ClearButton,
    /// The candidate at this index of the results.
    Candidate(usize),
    /// Anywhere not covered by the control.
    Outside,
}

/// Screen areas occupied by a control in the last frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSelectRegions {
    pub input: Rect,
    pub clear_button: Option<Rect>,
    pub popup: Option<Rect>,
    /// Visible candidate rows with their index into the results.
    pub rows: Vec<(usize, Rect)>,
    /// Where the terminal cursor goes when the control has focus.
    pub cursor: Option<Position>,
}

impl SearchSelectRegions {
    /// Classify a cell position.
    pub fn hit_test(&self, column: u16, row: u16) -> Hit {
        let position = Position::new(column, row);

        if self.clear_button.is_some_and(|area| area.contains(position)) {
            return Hit::ClearButton;
        }
        if let Some((index, _)) = self.rows.iter().find(|(_, area)| area.contains(position)) {
            return Hit::Candidate(*index);
        }
        if self.input.contains(position) || self.popup.is_some_and(|area| area.contains(position)) {
            return Hit::Input;
        }
        Hit::Outside
    }
}

/// Borrowed view of a [`SearchSelect`] for one frame.
pub struct SearchSelectView<'a, T> {
    field: &'a SearchSelect<T>,
    label: &'a str,
    placeholder: &'a str,
    focused: bool,
    spinner_frame: usize,
    render_candidate: Option<CandidateRenderer<'a, T>>,
}

impl<'a, T> SearchSelectView<'a, T>
where
    T: Clone + Send + 'static,
{
    pub fn new(field: &'a SearchSelect<T>, label: &'a str) -> Self {
        Self {
            field,
            label,
            placeholder: "",
            focused: false,
            spinner_frame: 0,
            render_candidate: None,
        }
    }

    /// Hint shown while the input is empty.
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn spinner_frame(mut self, frame: usize) -> Self {
        self.spinner_frame = frame;
        self
    }

    /// Custom popup rows; without one, rows show the display label.
    pub fn render_candidate(mut self, render: CandidateRenderer<'a, T>) -> Self {
        self.render_candidate = Some(render);
        self
    }

    /// Draw the labelled input box into `area` (three rows high).
    pub fn render_input(&self, area: Rect, buf: &mut Buffer) -> SearchSelectRegions {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Line::styled(
                self.label.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut regions = SearchSelectRegions {
            input: area,
            ..SearchSelectRegions::default()
        };
        if inner.width < 3 || inner.height == 0 {
            return regions;
        }

        let glyph = if self.field.is_loading() {
            SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
        } else {
            SEARCH_GLYPH
        };
        buf.set_string(inner.x, inner.y, glyph, Style::default().fg(Color::Cyan));

        let text_x = inner.x + 2;
        let mut text_width = inner.width - 2;
        if self.field.shows_clear_button() && inner.width >= 6 {
            let x = inner.right() - 1;
            buf.set_string(x, inner.y, CLEAR_MARKER, Style::default().fg(Color::Red));
            regions.clear_button = Some(Rect::new(x, inner.y, 1, 1));
            text_width -= 2;
        }

        let query = self.field.query();
        if query.is_empty() {
            buf.set_stringn(
                text_x,
                inner.y,
                self.placeholder,
                text_width as usize,
                Style::default().fg(Color::DarkGray),
            );
        } else {
            buf.set_stringn(text_x, inner.y, query, text_width as usize, Style::default());
        }

        if self.focused {
            let typed = Line::from(query).width().min(text_width as usize) as u16;
            regions.cursor = Some(Position::new(text_x + typed, inner.y));
        }

        regions
    }

    /// Draw the results popup directly under the input, clipped to `bounds`.
    ///
    /// Does nothing when the control has nothing to show or there is no room
    /// for at least one row.
    pub fn render_popup(&self, regions: &mut SearchSelectRegions, bounds: Rect, buf: &mut Buffer) {
        regions.popup = None;
        regions.rows.clear();

        let view = self.field.popup_view();
        let rows_needed = match view {
            PopupView::Hidden => return,
            PopupView::Candidates(items) => items.len().min(MAX_VISIBLE_ROWS),
            PopupView::NoResults => 1,
        };

        let y = regions.input.bottom();
        let available = bounds.bottom().saturating_sub(y);
        let height = (rows_needed as u16 + 2).min(available);
        if height < 3 {
            return;
        }

        let area = Rect::new(regions.input.x, y, regions.input.width, height);
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(area);
        block.render(area, buf);
        regions.popup = Some(area);

        match view {
            PopupView::NoResults => {
                buf.set_stringn(
                    inner.x,
                    inner.y,
                    NO_RESULTS,
                    inner.width as usize,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                );
            }
            PopupView::Candidates(items) => {
                let visible = inner.height as usize;
                let highlighted = self.field.highlighted();
                let offset = (highlighted + 1).saturating_sub(visible);

                let rows = items.iter().enumerate().skip(offset).take(visible);
                for (row, (index, item)) in rows.enumerate() {
                    let rect = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
                    let line = match self.render_candidate {
                        Some(render) => render(item),
                        None => Line::from(self.field.display_text(item)),
                    };

                    if index == highlighted {
                        buf.set_style(
                            rect,
                            Style::default()
                                .fg(Color::Black)
                                .bg(Color::Yellow)
                                .add_modifier(Modifier::BOLD),
                        );
                    }
                    buf.set_line(rect.x, rect.y, &line, rect.width);
                    regions.rows.push((index, rect));
                }
            }
            PopupView::Hidden => {}
        }
    }
}
