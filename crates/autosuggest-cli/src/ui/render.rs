//! TUI rendering functions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use autosuggest_core::{EditBuffer, Point};

use crate::app::{App, Popup};

/// Maximum number of suggestion rows shown at once.
const POPUP_MAX_ROWS: u16 = 8;

/// Style of the suggested (selected, not yet typed) part of the input.
fn suggestion_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Draw the full UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let lines = input_lines(&app.input);
    let max_input_height = frame.area().height.saturating_sub(2).max(3);
    let input_height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .clamp(3, max_input_height);

    let [header, input, _, status] = Layout::vertical([
        Constraint::Length(1),            // Header
        Constraint::Length(input_height), // Input (dynamic)
        Constraint::Min(0),               // Room for the popup
        Constraint::Length(1),            // Status bar
    ])
    .areas(frame.area());

    draw_header(frame, header);
    draw_input(frame, app, lines, input);
    draw_status_bar(frame, app, status);

    if app.popup.visible {
        draw_popup(frame, &app.popup);
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "autosuggest",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Ctrl+Space: all | Up/Down: cycle | Tab/Enter/Right: accept | Esc: hide",
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(header, area);
}

/// Split the input into display lines, dimming the selected suggestion.
pub fn input_lines(buffer: &EditBuffer) -> Vec<Line<'static>> {
    let selection = buffer.selection();
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_selected = false;

    let flush = |spans: &mut Vec<Span<'static>>, run: &mut String, selected: bool| {
        if run.is_empty() {
            return;
        }
        let text = std::mem::take(run);
        spans.push(if selected {
            Span::styled(text, suggestion_style())
        } else {
            Span::raw(text)
        });
    };

    for (i, c) in buffer.text().chars().enumerate() {
        if c == '\n' {
            flush(&mut spans, &mut run, run_selected);
            lines.push(Line::from(std::mem::take(&mut spans)));
            continue;
        }
        let selected = selection.contains(&i);
        if selected != run_selected {
            flush(&mut spans, &mut run, run_selected);
            run_selected = selected;
        }
        run.push(c);
    }
    flush(&mut spans, &mut run, run_selected);
    lines.push(Line::from(spans));
    lines
}

fn draw_input(frame: &mut Frame, app: &mut App, lines: Vec<Line<'static>>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Input");
    let inner = block.inner(area);
    app.input_origin = Point {
        top: i32::from(inner.y),
        left: i32::from(inner.x),
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);

    let (row, col) = app.caret_cells();
    let cursor_x = inner
        .x
        .saturating_add(u16::try_from(col).unwrap_or(u16::MAX))
        .min(inner.right().saturating_sub(1));
    let cursor_y = inner
        .y
        .saturating_add(u16::try_from(row).unwrap_or(u16::MAX))
        .min(inner.bottom().saturating_sub(1));
    frame.set_cursor_position((cursor_x, cursor_y));
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::styled(&app.status, Style::default().fg(Color::DarkGray)),
        Span::styled(" | Ctrl+C: quit", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(status, area);
}

/// Screen rectangle for the popup, clipped to `bounds`. `None` when the
/// popup has nothing to show or falls outside the screen.
pub fn popup_area(popup: &Popup, bounds: Rect) -> Option<Rect> {
    if popup.items.is_empty() {
        return None;
    }
    let x = u16::try_from(popup.position.left.max(0)).unwrap_or(u16::MAX);
    let y = u16::try_from(popup.position.top.max(0)).unwrap_or(u16::MAX);
    let widest = popup
        .items
        .iter()
        .map(|i| UnicodeWidthStr::width(i.label.as_str()))
        .max()
        .unwrap_or(0);
    let width = u16::try_from(widest).unwrap_or(u16::MAX).saturating_add(4);
    let rows = u16::try_from(popup.items.len())
        .unwrap_or(u16::MAX)
        .min(POPUP_MAX_ROWS);
    let area = Rect::new(x, y, width, rows.saturating_add(2)).intersection(bounds);
    (area.width > 2 && area.height > 2).then_some(area)
}

fn draw_popup(frame: &mut Frame, popup: &Popup) {
    let Some(area) = popup_area(popup, frame.area()) else {
        return;
    };
    let rows: Vec<ratatui::widgets::ListItem<'_>> = popup
        .items
        .iter()
        .map(|item| ratatui::widgets::ListItem::new(item.label.as_str()))
        .collect();
    let list = List::new(rows)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(popup.highlighted());

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}
