//! HelpOverlay component — centered popup listing every shortcut.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_BG, C_MUTED, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY},
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "topics  [1]",
        &[
            ("↑ / ↓  or  j / k", "move through topics"),
            ("enter / click", "focus the feed on that topic"),
            ("del / backspace", "clear selection (whole catalog)"),
            ("/", "search topics (esc clears, then closes)"),
        ],
    ),
    (
        "generator  [2]",
        &[
            ("↑ / ↓", "move between topic, tone, length"),
            ("← / →", "change tone or length"),
            ("+ / -", "length up / down (2–20 min)"),
            ("enter", "edit topic as free text"),
            ("t", "next tone"),
            ("g", "generate a micro-episode"),
            ("p / space", "play / stop the preview"),
        ],
    ),
    (
        "feed  [3]",
        &[
            ("enter / p", "play / stop narration"),
            ("l", "like (saved for this session)"),
            ("y", "share: copy title and description"),
        ],
    ),
    (
        "anywhere",
        &[
            ("tab / shift-tab", "next / previous pane"),
            ("1 / 2 / 3", "jump to pane"),
            ("x", "stop narration"),
            ("K / L", "toggle keys bar / log panel"),
            ("?", "toggle this help"),
            ("q / Ctrl+C", "quit"),
        ],
    ),
];

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    fn lines() -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                " keyboard shortcuts",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (heading, rows) in SECTIONS {
            lines.push(Line::from(Span::styled(
                format!(" {}", heading),
                Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
            )));
            lines.extend(rows.iter().map(|(k, d)| help_row(k, d)));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            " press ? or esc to close",
            Style::default().fg(C_MUTED),
        )));
        lines
    }
}

impl Component for HelpOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::HelpOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => vec![Action::ToggleHelp],
            // swallow everything else while open
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleHelp = action {
            self.visible = !self.visible;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        if !self.visible {
            return;
        }
        let lines = Self::lines();
        let popup = centered_rect(60, lines.len() as u16 + 2, area);

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(C_PANEL_BORDER))
                        .style(Style::default().bg(C_BG)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn help_row(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("   "),
        Span::styled(
            format!("{:<20}", key),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(C_SECONDARY)),
    ])
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(r.height)),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use std::path::PathBuf;

    #[test]
    fn esc_asks_app_to_close() {
        let state = AppState::new(PathBuf::new());
        let mut help = HelpOverlay::new();
        help.on_action(&Action::ToggleHelp, &state);
        assert!(help.visible);

        let swallowed = help.handle_key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE), &state);
        assert!(swallowed.is_empty());

        let actions = help.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), &state);
        assert!(matches!(&actions[..], [Action::ToggleHelp]));
    }

    #[test]
    fn centered_rect_fits_small_terminals() {
        let r = centered_rect(60, 40, Rect::new(0, 0, 80, 20));
        assert!(r.height <= 20);
        assert!(r.width <= 48);
    }
}
