use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::constants::INDICATOR_SPACE;
use crate::core::controller::ChatSnapshot;
use crate::core::text_wrapping::{TextWrapper, WrapConfig};
use crate::ui::transcript::build_transcript_lines;
use crate::ui::view::ChatView;
use crate::ui::welcome::build_welcome_lines;

const HEADER_HEIGHT: u16 = 3;
const MAX_INPUT_LINES: usize = 6;
const PLACEHOLDER: &str = "Ask me about IoT, networking, or tech support...";
const INPUT_HINT: &str = " Enter send · Alt+Enter newline · Esc clear · Ctrl+C quit ";

pub fn ui(f: &mut Frame, snapshot: &ChatSnapshot, view: &mut ChatView) {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(view.theme.background_color)),
        area,
    );

    let input_inner_width = area.width.saturating_sub(2 + INDICATOR_SPACE).max(1);
    let input_lines = draft_lines(&snapshot.draft, input_inner_width);
    let input_height = input_lines.len().clamp(1, MAX_INPUT_LINES) as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(input_height),
        ])
        .split(area);

    render_header(f, chunks[0], view);
    if snapshot.exchanges.is_empty() {
        render_welcome(f, chunks[1], view);
    } else {
        render_transcript(f, chunks[1], snapshot, view);
    }
    render_input(f, chunks[2], snapshot, view, &input_lines);
}

fn render_header(f: &mut Frame, area: Rect, view: &ChatView) {
    let theme = &view.theme;
    let header = Paragraph::new(Line::from(vec![
        Span::styled("🚀 IoTrix", theme.title_style),
        Span::styled("  ·  IoT & Network Assistant", theme.subtitle_style),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme.header_border_style),
    );
    // Vertically center the single line in the space above the border.
    let inner = Rect {
        y: area.y + area.height.saturating_sub(2) / 2,
        height: area.height.min(2),
        ..area
    };
    f.render_widget(header, inner);
}

fn render_welcome(f: &mut Frame, area: Rect, view: &mut ChatView) {
    let lines = build_welcome_lines(
        &view.theme,
        area.width,
        view.show_suggestions,
        view.selected_suggestion,
    );
    let top_padding = area.height.saturating_sub(lines.len() as u16) / 2;
    let padded = Rect {
        y: area.y + top_padding,
        height: area.height - top_padding,
        ..area
    };
    view.transcript_height = area.height;
    view.transcript_lines = 0;
    f.render_widget(Paragraph::new(lines), padded);
}

fn render_transcript(f: &mut Frame, area: Rect, snapshot: &ChatSnapshot, view: &mut ChatView) {
    // One column of breathing room on each side.
    let inner = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };
    let dots = view.dots.text();
    let lines = build_transcript_lines(&snapshot.exchanges, &view.theme, inner.width, &dots);

    view.transcript_height = inner.height;
    view.transcript_lines = lines.len();
    let offset = view.scroll.resolve(lines.len(), inner.height);

    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);
}

fn render_input(
    f: &mut Frame,
    area: Rect,
    snapshot: &ChatSnapshot,
    view: &ChatView,
    draft_lines: &[String],
) {
    let theme = &view.theme;

    let (title, border_style) = if snapshot.pending {
        (
            format!(" Waiting for IoTrix {} ", view.dots.spinner()),
            theme.input_border_disabled_style,
        )
    } else if snapshot.can_submit() {
        (" Message · Enter to send ".to_string(), theme.input_border_style)
    } else {
        (" Message ".to_string(), theme.input_border_style)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, theme.input_title_style))
        .title_bottom(Line::from(Span::styled(INPUT_HINT, theme.hint_style)).alignment(Alignment::Right));

    let visible_rows = area.height.saturating_sub(2) as usize;
    let first_visible = draft_lines.len().saturating_sub(visible_rows);

    let body: Vec<Line<'static>> = if snapshot.draft.is_empty() {
        let placeholder = if snapshot.pending { "" } else { PLACEHOLDER };
        vec![Line::from(Span::styled(placeholder, theme.placeholder_style))]
    } else {
        draft_lines[first_visible..]
            .iter()
            .map(|line| Line::from(Span::styled(line.clone(), theme.input_text_style)))
            .collect()
    };

    f.render_widget(Paragraph::new(body).block(block), area);

    if !snapshot.pending {
        let last = draft_lines.last().map(String::as_str).unwrap_or("");
        let row = (draft_lines.len() - first_visible).saturating_sub(1) as u16;
        let col = TextWrapper::display_width(last) as u16;
        f.set_cursor_position((area.x + 1 + col, area.y + 1 + row));
    }
}

fn draft_lines(draft: &str, width: u16) -> Vec<String> {
    TextWrapper::wrap_hard(draft, &WrapConfig::new(width as usize))
}
