//! LogPanel component — tail of hifm.log under the main panes.
//!
//! Follows the bottom of the file until the user scrolls up.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_SECONDARY, C_TOAST_ERROR, C_TOAST_WARNING},
    widgets::pane_chrome::pane_chrome,
};

pub struct LogPanel {
    /// First visible line; `usize::MAX` pins to the bottom.
    pub scroll: usize,
    last_log_count: usize,
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            scroll: usize::MAX,
            last_log_count: 0,
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        self.scroll = if delta < 0 {
            self.scroll.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll.saturating_add(delta as usize)
        };
    }
}

impl Component for LogPanel {
    fn id(&self) -> ComponentId {
        ComponentId::LogPanel
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-10),
            KeyCode::PageDown => self.scroll_by(10),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll = usize::MAX,
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-1),
            MouseEventKind::ScrollDown => self.scroll_by(1),
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleLogs = action {
            self.scroll = usize::MAX;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }
        frame.render_widget(Clear, area);

        let block = pane_chrome("log", None, focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let logs = &state.log_lines;
        if logs.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no log entries yet", Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        let max_scroll = logs.len().saturating_sub(height);
        if logs.len() > self.last_log_count {
            // keep following when we were at (or next to) the bottom
            if self.scroll >= max_scroll.saturating_sub(1) {
                self.scroll = usize::MAX;
            }
            self.last_log_count = logs.len();
        }
        self.scroll = self.scroll.min(max_scroll);

        let lines: Vec<Line> = logs
            .iter()
            .skip(self.scroll)
            .take(height)
            .map(|raw| {
                let entry = LogEntry::parse(raw);
                let mut spans = vec![Span::raw(" ")];
                if let Some(time) = entry.time {
                    spans.push(Span::styled(format!("{} ", time), Style::default().fg(C_MUTED)));
                }
                if let Some(level) = entry.level {
                    spans.push(Span::styled(
                        format!("{:<5} ", level),
                        Style::default().fg(level_color(level)),
                    ));
                }
                spans.push(Span::styled(entry.message, Style::default().fg(C_SECONDARY)));
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

// ── Log line parsing ──────────────────────────────────────────────────────────

/// One `tracing_subscriber::fmt` line split into its parts.
#[derive(Debug, PartialEq, Eq)]
pub struct LogEntry<'a> {
    pub time: Option<String>,
    pub level: Option<&'static str>,
    pub message: &'a str,
}

impl<'a> LogEntry<'a> {
    /// `2025-03-04T10:11:12.123456Z  INFO hifm_core::session: generated …`
    /// becomes time `10:11:12` (local), level `INFO`, message `generated …`.
    /// Lines that do not look like that are kept whole as the message.
    pub fn parse(raw: &'a str) -> Self {
        let mut rest = raw.trim();
        let mut time = None;
        let mut level = None;

        if let Some((tok, rem)) = rest.split_once(char::is_whitespace) {
            if let Some(ts) = compact_timestamp(tok) {
                time = Some(ts);
                rest = rem.trim_start();
            }
        }
        if let Some((tok, rem)) = rest.split_once(char::is_whitespace) {
            level = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"]
                .into_iter()
                .find(|l| l.eq_ignore_ascii_case(tok));
            if level.is_some() {
                rest = rem.trim_start();
            }
        }
        // module target, e.g. "hifm_tui::speech: "
        if let Some((target, msg)) = rest.split_once(": ") {
            if !target.is_empty()
                && target.len() <= 48
                && target
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':'))
            {
                rest = msg;
            }
        }
        Self {
            time,
            level,
            message: rest,
        }
    }
}

fn compact_timestamp(token: &str) -> Option<String> {
    let dt = chrono::DateTime::parse_from_rfc3339(token).ok()?;
    let local = dt.with_timezone(&chrono::Local);
    let fmt = if local.date_naive() == chrono::Local::now().date_naive() {
        "%H:%M:%S"
    } else {
        "%m-%d %H:%M"
    };
    Some(local.format(fmt).to_string())
}

fn level_color(level: &str) -> Color {
    match level {
        "ERROR" => C_TOAST_ERROR,
        "WARN" => C_TOAST_WARNING,
        _ => C_MUTED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fmt_line() {
        let e = LogEntry::parse(
            "2020-01-02T03:04:05.000000Z  INFO hifm_core::session: generated g-1-abc (x)",
        );
        assert!(e.time.is_some());
        assert_eq!(e.level, Some("INFO"));
        assert_eq!(e.message, "generated g-1-abc (x)");
    }

    #[test]
    fn keeps_unrecognised_lines_whole() {
        let e = LogEntry::parse("plain text: with a colon and spaces");
        assert_eq!(e.time, None);
        assert_eq!(e.level, None);
        assert_eq!(e.message, "plain text: with a colon and spaces");
    }

    #[test]
    fn level_without_timestamp() {
        let e = LogEntry::parse("warn speech: no speech program found");
        assert_eq!(e.level, Some("WARN"));
        assert_eq!(e.message, "no speech program found");
    }
}
