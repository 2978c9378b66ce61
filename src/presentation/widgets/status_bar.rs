//! Status bar widget.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }

    /// Symbol shown before the message.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Info => "•",
            Self::Success => "✓",
            Self::Warning => "!",
            Self::Error => "✗",
        }
    }
}

/// Transient message shown in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    shown_at: Instant,
}

impl StatusMessage {
    #[must_use]
    pub fn new(text: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            text: text.into(),
            level,
            shown_at: Instant::now(),
        }
    }

    /// Errors stay until replaced; everything else fades after `ttl`.
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.level != StatusLevel::Error && self.shown_at.elapsed() >= ttl
    }
}

/// One-line bar: the current message on the left, session info on the right.
#[derive(Debug, Clone, Default)]
pub struct StatusBar {
    message: Option<(String, StatusLevel)>,
    right: String,
}

impl StatusBar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a message at the given level.
    #[must_use]
    pub fn message(mut self, text: impl Into<String>, level: StatusLevel) -> Self {
        self.message = Some((text.into(), level));
        self
    }

    #[must_use]
    pub fn right(mut self, content: impl Into<String>) -> Self {
        self.right = content.into();
        self
    }

    /// Status bar showing a message on the left.
    #[must_use]
    pub fn from_message(message: Option<&StatusMessage>) -> Self {
        message.map_or_else(Self::new, |m| Self::new().message(&m.text, m.level))
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dim = Style::default().fg(Color::DarkGray);
        let width = usize::from(area.width);
        let right_width = self.right.width();

        let mut spans = Vec::new();
        let mut used = 0;
        if let Some((text, level)) = &self.message {
            let style = Style::default()
                .fg(level.color())
                .add_modifier(Modifier::BOLD);
            let marker = format!("{} ", level.marker());
            used += marker.width() + text.width();
            spans.push(Span::styled(marker, style));
            spans.push(Span::styled(text.as_str(), style));
        }

        if !self.right.is_empty() {
            let gap = width.saturating_sub(used + right_width).max(1);
            spans.push(Span::raw(" ".repeat(gap)));
            spans.push(Span::styled(self.right.as_str(), dim));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_do_not_expire() {
        let info = StatusMessage::new("Refreshed", StatusLevel::Info);
        let error = StatusMessage::new("Failed", StatusLevel::Error);

        assert!(info.is_expired(Duration::ZERO));
        assert!(!error.is_expired(Duration::ZERO));
    }

    #[test]
    fn test_renders_left_and_right() {
        let bar = StatusBar::new()
            .message("Saved", StatusLevel::Success)
            .right("admin");
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);

        (&bar).render(area, &mut buf);

        let line: String = (0..20).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(line.starts_with("✓ Saved"));
        assert!(line.ends_with("admin"));
    }
}
