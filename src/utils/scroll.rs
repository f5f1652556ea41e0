//! Transcript scroll position with follow-the-bottom behavior.

/// Scroll offset over pre-wrapped lines.
///
/// While `follow` is set the view stays pinned to the newest line; any
/// manual scroll upward releases it, and reaching the bottom again
/// re-engages it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    offset: u16,
    follow: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            follow: true,
        }
    }
}

impl ScrollState {
    pub fn max_offset(total_lines: usize, viewport_height: u16) -> u16 {
        let total = u16::try_from(total_lines).unwrap_or(u16::MAX);
        total.saturating_sub(viewport_height)
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Offset to render with for the current content size.
    pub fn resolve(&mut self, total_lines: usize, viewport_height: u16) -> u16 {
        let max = Self::max_offset(total_lines, viewport_height);
        if self.follow || self.offset > max {
            self.offset = max;
        }
        self.offset
    }

    pub fn scroll_up(&mut self, lines: u16) {
        if lines == 0 {
            return;
        }
        self.offset = self.offset.saturating_sub(lines);
        self.follow = false;
    }

    pub fn scroll_down(&mut self, lines: u16, total_lines: usize, viewport_height: u16) {
        let max = Self::max_offset(total_lines, viewport_height);
        self.offset = self.offset.saturating_add(lines).min(max);
        if self.offset == max {
            self.follow = true;
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow = true;
    }
}
