//! Shared UI helpers

use std::time::{Duration, Instant};

use ratatui::{prelude::*, widgets::*};

const BANNER_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Info,
    Error,
}

/// Transient status line, the terminal stand-in for a browser alert
#[derive(Debug)]
pub struct Banner {
    pub text: String,
    pub level: BannerLevel,
    shown_at: Instant,
}

impl Banner {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: BannerLevel::Info,
            shown_at: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: BannerLevel::Error,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() > BANNER_TTL
    }

    pub fn line(&self) -> Line<'_> {
        let style = match self.level {
            BannerLevel::Info => Style::default().fg(Color::Green),
            BannerLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        };
        Line::from(Span::styled(self.text.as_str(), style))
    }
}

/// Bordered block with a bold title
pub fn title_block(title: &str) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

/// Key-hint footer line: `[key] action  [key] action ...`
pub fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (key, action) in hints {
        spans.push(Span::styled(
            format!("[{key}]"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {action}  ")));
    }
    Line::from(spans)
}

/// Footer: the banner while one is live, otherwise the key hints
pub fn footer<'a>(banner: &'a Option<Banner>, hints: &[(&str, &str)]) -> Paragraph<'a> {
    let line = match banner {
        Some(banner) => banner.line(),
        None => hint_line(hints),
    };
    Paragraph::new(line)
}

/// Clock portion of an ISO timestamp, or the raw string when unparseable
pub fn format_time(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Style for the row under the cursor
pub fn selected_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Move a cursor up or down inside a list of `len` rows
pub fn step_cursor(idx: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if down {
        (idx + 1).min(len - 1)
    } else {
        idx.saturating_sub(1)
    }
}
