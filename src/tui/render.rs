use std::borrow::Cow;

use super::state::{AppState, Focus, ImageSlot, RecipeRow};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const FALLBACK_GLYPH: char = '✖';

/// Named screen regions. One fixed vertical split shared by the renderer and
/// mouse hit-testing, so clicks always land on what was drawn.
pub struct ScreenChunks {
    pub title: Rect,
    pub name_input: Rect,
    pub url_input: Rect,
    pub button: Rect,
    pub status: Rect,
    pub notice: Rect,
    pub list: Rect,
    pub footer: Rect,
}

pub fn screen_chunks(area: Rect) -> ScreenChunks {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(3), // name input
            Constraint::Length(3), // url input
            Constraint::Length(1), // submit button
            Constraint::Length(1), // status line
            Constraint::Length(1), // transient notice
            Constraint::Min(0),   // recipe list
            Constraint::Length(1), // footer
        ])
        .split(area);

    ScreenChunks {
        title: chunks[0],
        name_input: chunks[1],
        url_input: chunks[2],
        button: chunks[3],
        status: chunks[4],
        notice: chunks[5],
        list: chunks[6],
        footer: chunks[7],
    }
}

pub fn draw(f: &mut Frame, state: &AppState, spinner_frame: u8) {
    let chunks = screen_chunks(f.area());

    draw_title(f, state, chunks.title);
    draw_input(
        f,
        "Nombre de la receta",
        &state.name_draft,
        state.focus == Focus::NameInput,
        chunks.name_input,
    );
    draw_input(
        f,
        "URL de la imagen (https)",
        &state.url_draft,
        state.focus == Focus::UrlInput,
        chunks.url_input,
    );
    draw_button(f, state, chunks.button);
    draw_status(f, state, chunks.status);
    draw_notice(f, state, chunks.notice);
    draw_list(f, state, spinner_frame, chunks.list);
    draw_footer(f, chunks.footer);
}

fn draw_title(f: &mut Frame, state: &AppState, area: Rect) {
    let count = state.rows.len();
    let line = Line::from(vec![
        Span::styled("  Recetario", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  · {} receta{}", count, if count == 1 { "" } else { "s" }),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_input(f: &mut Frame, label: &str, value: &str, focused: bool, area: Rect) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    // Show the tail of the value when it outgrows the field, keeping the
    // cursor cell visible.
    let inner_width = area.width.saturating_sub(2) as usize;
    let char_count = value.chars().count();
    let skip = char_count.saturating_sub(inner_width.saturating_sub(1));
    let shown: String = value.chars().skip(skip).collect();

    let input = Paragraph::new(shown.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(label.to_string()),
    );
    f.render_widget(input, area);

    if focused && area.width > 2 && area.height > 2 {
        let cursor_x = area.x + 1 + (char_count - skip) as u16;
        f.set_cursor_position(Position::new(cursor_x.min(area.x + area.width - 2), area.y + 1));
    }
}

fn draw_button(f: &mut Frame, state: &AppState, area: Rect) {
    let style = if state.can_submit {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let line = Line::from(vec![Span::styled("  [ Agregar ]", style)]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_status(f: &mut Frame, state: &AppState, area: Rect) {
    if state.status.is_empty() {
        return;
    }
    let width = area.width.saturating_sub(2) as usize;
    let line = Line::from(Span::styled(
        format!("  {}", truncate_with_ellipsis(&state.status, width)),
        Style::default().fg(Color::Cyan),
    ));
    f.render_widget(Paragraph::new(line), area);
}

fn draw_notice(f: &mut Frame, state: &AppState, area: Rect) {
    let Some(notice) = &state.notice else { return };
    let width = area.width.saturating_sub(2) as usize;
    let line = Line::from(Span::styled(
        format!(" {} ", truncate_with_ellipsis(notice, width)),
        Style::default().fg(Color::Black).bg(Color::Yellow),
    ));
    f.render_widget(Paragraph::new(line), area);
}

/// Lines one list row occupies: the thumbnail rows plus one spacer line.
pub fn row_height(thumb_rows: u16) -> u16 {
    thumb_rows + 1
}

/// First row index shown for the current selection, keeping the selected
/// row inside the viewport.
pub fn first_visible_row(selected: usize, row_count: usize, rows_that_fit: usize) -> usize {
    if rows_that_fit == 0 || row_count <= rows_that_fit {
        return 0;
    }
    let max_first = row_count - rows_that_fit;
    selected
        .saturating_sub(rows_that_fit.saturating_sub(1))
        .min(max_first)
}

/// Map a terminal coordinate to the list row drawn there, using the same
/// geometry as `draw_list`. `None` outside any full row.
pub fn row_at(
    list: Rect,
    thumb_rows: u16,
    selected: usize,
    row_count: usize,
    x: u16,
    y: u16,
) -> Option<usize> {
    if row_count == 0 || !list.contains(Position::new(x, y)) {
        return None;
    }
    let height = row_height(thumb_rows);
    if height == 0 {
        return None;
    }
    let fit = (list.height / height) as usize;
    let first = first_visible_row(selected, row_count, fit);
    let offset = ((y - list.y) / height) as usize;
    let index = first + offset;
    (offset < fit && index < row_count).then_some(index)
}

fn draw_list(f: &mut Frame, state: &AppState, spinner_frame: u8, area: Rect) {
    if state.rows.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "  (sin recetas todavía)",
            Style::default().add_modifier(Modifier::DIM),
        )));
        f.render_widget(hint, area);
        return;
    }

    let height = row_height(state.thumb_rows);
    let fit = (area.height / height) as usize;
    let first = first_visible_row(state.selected, state.rows.len(), fit);

    for (slot_index, row_index) in (first..state.rows.len().min(first + fit)).enumerate() {
        let rect = Rect::new(
            area.x,
            area.y + slot_index as u16 * height,
            area.width,
            height,
        );
        let selected = state.focus == Focus::List && row_index == state.selected;
        draw_recipe_row(f, state, &state.rows[row_index], selected, spinner_frame, rect);
    }
}

fn draw_recipe_row(
    f: &mut Frame,
    state: &AppState,
    row: &RecipeRow,
    selected: bool,
    spinner_frame: u8,
    area: Rect,
) {
    let cols = state.thumb_cols;
    let rows = state.thumb_rows;
    let name_line = rows / 2;

    let mut lines: Vec<Line> = Vec::with_capacity(rows as usize);
    for cell_y in 0..rows {
        let mut spans: Vec<Span> = Vec::with_capacity(cols as usize + 3);
        spans.push(Span::raw(if selected && cell_y == name_line {
            "▶ "
        } else {
            "  "
        }));

        match &row.slot {
            ImageSlot::Ready(thumb) => {
                for cell_x in 0..cols {
                    let ((tr, tg, tb), (br, bg, bb)) = thumb.cell(cell_x, cell_y);
                    spans.push(Span::styled(
                        "▀",
                        Style::default()
                            .fg(Color::Rgb(tr, tg, tb))
                            .bg(Color::Rgb(br, bg, bb)),
                    ));
                }
            }
            ImageSlot::Loading => {
                let glyph = SPINNER_FRAMES[spinner_frame as usize % SPINNER_FRAMES.len()];
                spans.push(placeholder_span(cols, cell_y, rows, glyph));
            }
            ImageSlot::Failed => {
                spans.push(placeholder_span(cols, cell_y, rows, FALLBACK_GLYPH));
            }
        }

        if cell_y == name_line {
            let used = 2 + cols as usize + 2;
            let available = (area.width as usize).saturating_sub(used);
            let name_style = if selected {
                Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                Style::default()
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                truncate_with_ellipsis(&row.name, available).into_owned(),
                name_style,
            ));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// Blank thumbnail-wide span with a single centered glyph on the middle row.
fn placeholder_span(cols: u16, cell_y: u16, rows: u16, glyph: char) -> Span<'static> {
    let width = cols as usize;
    let text = if cell_y == rows / 2 {
        let left = width.saturating_sub(1) / 2;
        format!(
            "{}{}{}",
            " ".repeat(left),
            glyph,
            " ".repeat(width.saturating_sub(left + 1))
        )
    } else {
        " ".repeat(width)
    };
    Span::styled(text, Style::default().add_modifier(Modifier::DIM))
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("  [Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" campo  "),
        Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
        Span::raw(" agregar/eliminar  "),
        Span::styled("[↑/↓]", Style::default().fg(Color::Yellow)),
        Span::raw(" elegir  "),
        Span::styled("[clic]", Style::default().fg(Color::Yellow)),
        Span::raw(" eliminar  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" salir"),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn truncate_with_ellipsis(s: &str, max_width: usize) -> Cow<'_, str> {
    let char_count = s.chars().count();
    if char_count <= max_width {
        Cow::Borrowed(s)
    } else if max_width <= 3 {
        Cow::Owned(".".repeat(max_width))
    } else {
        let end = s
            .char_indices()
            .nth(max_width - 3)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        Cow::Owned(format!("{}...", &s[..end]))
    }
}
