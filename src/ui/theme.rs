use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,

    // Header
    pub title_style: Style,
    pub subtitle_style: Style,
    pub header_border_style: Style,

    // Bubbles
    pub user_border_style: Style,
    pub user_label_style: Style,
    pub user_text_style: Style,
    pub bot_border_style: Style,
    pub bot_label_style: Style,
    pub bot_text_style: Style,
    pub fallback_text_style: Style,
    pub loading_dots_style: Style,

    // Welcome screen
    pub welcome_title_style: Style,
    pub welcome_text_style: Style,
    pub suggestion_style: Style,
    pub suggestion_selected_style: Style,

    // Input area
    pub input_border_style: Style,
    pub input_border_disabled_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,
    pub placeholder_style: Style,
    pub hint_style: Style,
}

impl Theme {
    pub fn dark() -> Self {
        let accent = Color::Rgb(168, 85, 247);
        let blue = Color::Rgb(96, 165, 250);
        let lavender = Color::Rgb(216, 180, 254);
        Theme {
            background_color: Color::Rgb(15, 23, 42),

            title_style: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            subtitle_style: Style::default().fg(lavender),
            header_border_style: Style::default().fg(Color::Rgb(71, 85, 105)),

            user_border_style: Style::default().fg(blue),
            user_label_style: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::White),
            bot_border_style: Style::default().fg(accent),
            bot_label_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::Rgb(226, 232, 240)),
            fallback_text_style: Style::default().fg(Color::Rgb(252, 165, 165)),
            loading_dots_style: Style::default().fg(lavender),

            welcome_title_style: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            welcome_text_style: Style::default().fg(lavender),
            suggestion_style: Style::default().fg(Color::Rgb(233, 213, 255)),
            suggestion_selected_style: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(88, 28, 135))
                .add_modifier(Modifier::BOLD),

            input_border_style: Style::default().fg(accent),
            input_border_disabled_style: Style::default().fg(Color::Rgb(71, 85, 105)),
            input_title_style: Style::default().fg(lavender),
            input_text_style: Style::default().fg(Color::White),
            placeholder_style: Style::default().fg(Color::Rgb(148, 163, 184)),
            hint_style: Style::default().fg(Color::Rgb(148, 163, 184)),
        }
    }

    pub fn light() -> Self {
        let accent = Color::Rgb(126, 34, 206);
        let blue = Color::Rgb(29, 78, 216);
        Theme {
            background_color: Color::Rgb(248, 250, 252),

            title_style: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            subtitle_style: Style::default().fg(accent),
            header_border_style: Style::default().fg(Color::Gray),

            user_border_style: Style::default().fg(blue),
            user_label_style: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Black),
            bot_border_style: Style::default().fg(accent),
            bot_label_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::Rgb(30, 41, 59)),
            fallback_text_style: Style::default().fg(Color::Rgb(185, 28, 28)),
            loading_dots_style: Style::default().fg(accent),

            welcome_title_style: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            welcome_text_style: Style::default().fg(Color::DarkGray),
            suggestion_style: Style::default().fg(accent),
            suggestion_selected_style: Style::default()
                .fg(Color::White)
                .bg(accent)
                .add_modifier(Modifier::BOLD),

            input_border_style: Style::default().fg(accent),
            input_border_disabled_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::DarkGray),
            input_text_style: Style::default().fg(Color::Black),
            placeholder_style: Style::default().fg(Color::Gray),
            hint_style: Style::default().fg(Color::Gray),
        }
    }

    /// Look up a built-in theme by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
