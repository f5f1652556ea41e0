use crate::ui::loading::LoadingDots;
use crate::ui::theme::Theme;
use crate::utils::scroll::ScrollState;

/// UI-only state that lives beside the shared chat session.
#[derive(Debug, Clone)]
pub struct ChatView {
    pub theme: Theme,
    pub show_suggestions: bool,
    pub selected_suggestion: Option<usize>,
    pub scroll: ScrollState,
    pub dots: LoadingDots,
    pub exit_requested: bool,
    /// Transcript geometry from the last draw, used for paging.
    pub transcript_height: u16,
    pub transcript_lines: usize,
    was_pending: bool,
}

impl ChatView {
    pub fn new(theme: Theme, show_suggestions: bool) -> Self {
        Self {
            theme,
            show_suggestions,
            selected_suggestion: None,
            scroll: ScrollState::default(),
            dots: LoadingDots::new(),
            exit_requested: false,
            transcript_height: 0,
            transcript_lines: 0,
            was_pending: false,
        }
    }

    /// React to a conversation change: jump to the newest line and restart
    /// the loading animation when a new exchange begins.
    pub fn on_conversation_changed(&mut self, pending: bool) {
        self.scroll.scroll_to_bottom();
        self.selected_suggestion = None;
        if pending && !self.was_pending {
            self.dots.restart();
        }
        self.was_pending = pending;
    }

    pub fn page_size(&self) -> u16 {
        self.transcript_height.saturating_sub(1).max(1)
    }
}
