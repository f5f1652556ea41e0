//! Builds the transcript as pre-wrapped, styled bubble lines.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::core::constants::FALLBACK_MESSAGE;
use crate::core::message::Exchange;
use crate::core::text_wrapping::{TextWrapper, WrapConfig};
use crate::ui::theme::Theme;

pub const USER_LABEL: &str = "You";
pub const BOT_LABEL: &str = "IoTrix";

/// Border plus one column of padding on each side.
const BUBBLE_CHROME: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleSide {
    Left,
    Right,
}

struct BubbleStyle {
    border: Style,
    label: Style,
    text: Style,
}

/// Render every exchange as a user bubble followed by a reply bubble, or
/// the loading dots while the reply is pending.
pub fn build_transcript_lines(
    exchanges: &[Exchange],
    theme: &Theme,
    width: u16,
    dots: &str,
) -> Vec<Line<'static>> {
    let width = width as usize;
    let mut lines = Vec::new();

    let user_style = BubbleStyle {
        border: theme.user_border_style,
        label: theme.user_label_style,
        text: theme.user_text_style,
    };

    for (index, exchange) in exchanges.iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(""));
        }

        lines.extend(bubble(
            USER_LABEL,
            exchange.user(),
            BubbleSide::Right,
            width,
            &user_style,
        ));

        let (body, text_style) = if exchange.is_pending() {
            (dots, theme.loading_dots_style)
        } else if exchange.bot() == FALLBACK_MESSAGE {
            (exchange.bot(), theme.fallback_text_style)
        } else {
            (exchange.bot(), theme.bot_text_style)
        };
        let bot_style = BubbleStyle {
            border: theme.bot_border_style,
            label: theme.bot_label_style,
            text: text_style,
        };
        lines.extend(bubble(BOT_LABEL, body, BubbleSide::Left, width, &bot_style));
    }

    lines
}

/// Widest text column a bubble may use in a transcript of `width` columns.
pub fn max_bubble_text_width(width: usize) -> usize {
    let four_fifths = width * 4 / 5;
    four_fifths
        .saturating_sub(BUBBLE_CHROME)
        .max(1)
        .min(width.saturating_sub(BUBBLE_CHROME).max(1))
}

fn bubble(
    label: &str,
    text: &str,
    side: BubbleSide,
    width: usize,
    style: &BubbleStyle,
) -> Vec<Line<'static>> {
    let wrapped = TextWrapper::wrap_words(text, &WrapConfig::new(max_bubble_text_width(width)));
    let label_width = TextWrapper::display_width(label);
    let text_width = wrapped
        .iter()
        .map(|line| TextWrapper::display_width(line))
        .max()
        .unwrap_or(0)
        .max(label_width + 1);
    let outer_width = text_width + BUBBLE_CHROME;
    let indent = match side {
        BubbleSide::Left => 0,
        BubbleSide::Right => width.saturating_sub(outer_width),
    };
    let pad = " ".repeat(indent);

    let mut lines = Vec::with_capacity(wrapped.len() + 2);

    // ╭─ Label ───╮
    let fill = outer_width.saturating_sub(label_width + 5);
    lines.push(Line::from(vec![
        Span::raw(pad.clone()),
        Span::styled("╭─ ", style.border),
        Span::styled(label.to_string(), style.label),
        Span::styled(format!(" {}╮", "─".repeat(fill)), style.border),
    ]));

    for line in wrapped {
        let trailing = text_width.saturating_sub(TextWrapper::display_width(&line));
        lines.push(Line::from(vec![
            Span::raw(pad.clone()),
            Span::styled("│ ", style.border),
            Span::styled(line, style.text),
            Span::raw(" ".repeat(trailing)),
            Span::styled(" │", style.border),
        ]));
    }

    lines.push(Line::from(vec![
        Span::raw(pad),
        Span::styled(
            format!("╰{}╯", "─".repeat(outer_width.saturating_sub(2))),
            style.border,
        ),
    ]));

    lines
}
