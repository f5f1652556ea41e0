//! Animation frames for the pending-reply indicators.

use std::time::{Duration, Instant};

/// Time each loading-dot frame stays on screen.
pub const DOT_INTERVAL: Duration = Duration::from_millis(350);

const DOT_COUNT: usize = 3;

/// Tracks when the current pending period started.
#[derive(Debug, Clone, Copy)]
pub struct LoadingDots {
    started: Instant,
}

impl Default for LoadingDots {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingDots {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn restart(&mut self) {
        self.started = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn text(&self) -> String {
        dots_text(self.elapsed())
    }

    pub fn spinner(&self) -> &'static str {
        spinner_glyph(self.elapsed())
    }
}

/// Three dots with one highlighted, moving left to right.
pub fn dots_text(elapsed: Duration) -> String {
    let active = (elapsed.as_millis() / DOT_INTERVAL.as_millis()) as usize % DOT_COUNT;
    (0..DOT_COUNT)
        .map(|i| if i == active { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pulsing glyph shown in the input title while a reply is pending.
pub fn spinner_glyph(elapsed: Duration) -> &'static str {
    // Two pulses per second, rising then falling.
    let phase = (elapsed.as_millis() as f32 / 1000.0 * 2.0) % 2.0;
    let intensity = if phase < 1.0 { phase } else { 2.0 - phase };

    if intensity < 0.33 {
        "○"
    } else if intensity < 0.66 {
        "◐"
    } else {
        "●"
    }
}
