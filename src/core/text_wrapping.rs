//! Width-aware text wrapping for the transcript and the input box.
//!
//! Lines are pre-wrapped here and rendered without ratatui's own wrapping,
//! so line counts used for scrolling and cursor placement always match what
//! ends up on screen.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const TAB_WIDTH: usize = 4;

/// Configuration for text wrapping behavior
#[derive(Debug, Clone, Copy)]
pub struct WrapConfig {
    /// Maximum display width of a wrapped line
    pub width: usize,
}

impl WrapConfig {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }
}

pub struct TextWrapper;

impl TextWrapper {
    /// Wrap at word boundaries, breaking words only when a single word is
    /// wider than the line. Explicit newlines are kept; whitespace at a
    /// wrap point is dropped.
    pub fn wrap_words(text: &str, config: &WrapConfig) -> Vec<String> {
        let text = normalize(text);
        text.split('\n')
            .flat_map(|paragraph| wrap_paragraph(paragraph, config.width))
            .collect()
    }

    /// Wrap every `width` columns regardless of word boundaries. Every input
    /// character is kept, which keeps cursor math trivial for the input box.
    pub fn wrap_hard(text: &str, config: &WrapConfig) -> Vec<String> {
        let text = normalize(text);
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut current = String::new();
            let mut current_width = 0;
            for grapheme in paragraph.graphemes(true) {
                let w = grapheme.width();
                if current_width + w > config.width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push_str(grapheme);
                current_width += w;
            }
            lines.push(current);
        }
        lines
    }

    pub fn display_width(text: &str) -> usize {
        text.width()
    }
}

fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', &" ".repeat(TAB_WIDTH))
}

fn wrap_paragraph(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for segment in paragraph.split_word_bounds() {
        let segment_width = segment.width();
        let is_space = segment.chars().all(char::is_whitespace);

        if current_width + segment_width <= width {
            current.push_str(segment);
            current_width += segment_width;
            continue;
        }

        if is_space {
            lines.push(current.trim_end().to_string());
            current.clear();
            current_width = 0;
            continue;
        }

        if segment_width <= width {
            lines.push(current.trim_end().to_string());
            current = segment.to_string();
            current_width = segment_width;
            continue;
        }

        for grapheme in segment.graphemes(true) {
            let w = grapheme.width();
            if current_width + w > width && !current.is_empty() {
                lines.push(current.trim_end().to_string());
                current.clear();
                current_width = 0;
            }
            current.push_str(grapheme);
            current_width += w;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current.trim_end().to_string());
    }
    lines
}
