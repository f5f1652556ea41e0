use ratatui::layout::Alignment;
use ratatui::text::{Line, Span};

use crate::core::constants::SUGGESTED_QUESTIONS;
use crate::core::text_wrapping::{TextWrapper, WrapConfig};
use crate::ui::theme::Theme;

const WELCOME_TITLE: &str = "Welcome to IoTrix!";
const WELCOME_TEXT: &str = "I'm here to help you with IoT devices, networking, and technical \
questions. Ask me anything about smart devices, network protocols, or troubleshooting!";
const SUGGESTION_HINT: &str = "Tab to cycle suggestions · Alt+1-4 to pick one";
const MAX_TEXT_WIDTH: usize = 60;

/// Lines for the empty-conversation panel, centered horizontally.
pub fn build_welcome_lines(
    theme: &Theme,
    width: u16,
    show_suggestions: bool,
    selected: Option<usize>,
) -> Vec<Line<'static>> {
    let text_width = (width as usize).clamp(1, MAX_TEXT_WIDTH);
    let mut lines = vec![
        Line::from(Span::styled("🤖", theme.welcome_title_style)),
        Line::from(""),
        Line::from(Span::styled(WELCOME_TITLE, theme.welcome_title_style)),
        Line::from(""),
    ];

    for line in TextWrapper::wrap_words(WELCOME_TEXT, &WrapConfig::new(text_width)) {
        lines.push(Line::from(Span::styled(line, theme.welcome_text_style)));
    }

    if show_suggestions {
        lines.push(Line::from(""));
        for (index, question) in SUGGESTED_QUESTIONS.iter().enumerate() {
            let style = if selected == Some(index) {
                theme.suggestion_selected_style
            } else {
                theme.suggestion_style
            };
            lines.push(Line::from(Span::styled(
                format!(" {}. {} ", index + 1, question),
                style,
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(SUGGESTION_HINT, theme.hint_style)));
    }

    lines
        .into_iter()
        .map(|line| line.alignment(Alignment::Center))
        .collect()
}

/// Next suggestion for Tab cycling.
pub fn next_suggestion(current: Option<usize>) -> usize {
    match current {
        Some(index) => (index + 1) % SUGGESTED_QUESTIONS.len(),
        None => 0,
    }
}
