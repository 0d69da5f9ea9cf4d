//! FilterInput — wraps tui-input for one-line text entry inside panes.
//!
//! Used for the topic search bar and for editing the generator's topic.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_FILTER_BG, C_FILTER_FG, C_MUTED};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    Changed(String),
    Confirmed,
    Cancelled,
}

pub struct FilterInput {
    input: Input,
    active: bool,
    placeholder: String,
    prefix: &'static str,
}

impl FilterInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            placeholder: placeholder.into(),
            prefix: "/",
        }
    }

    /// Same input with a different leading glyph (e.g. `›` for edit fields).
    pub fn with_prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn set_value(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Handle a key event. Returns what happened.
    ///
    /// Esc behaviour:
    ///   - If the input has text: clear the text, emit `Changed("")` (keeps input open but empty)
    ///   - If the input is already empty: deactivate and emit `Cancelled`
    pub fn handle_key(&mut self, key: KeyEvent) -> FilterAction {
        match key.code {
            KeyCode::Esc => {
                if !self.input.value().is_empty() {
                    self.input = Input::default();
                    FilterAction::Changed(String::new())
                } else {
                    self.deactivate();
                    FilterAction::Cancelled
                }
            }
            KeyCode::Enter => {
                self.deactivate();
                FilterAction::Confirmed
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
                FilterAction::Changed(self.input.value().to_string())
            }
        }
    }

    /// Render the input bar into `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(4) as usize);
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled(
                format!("{} {}", self.prefix, self.placeholder),
                Style::default().fg(C_MUTED),
            )
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(
                format!("{} {}", self.prefix, visible),
                Style::default().fg(C_FILTER_FG),
            )
        };

        let paragraph =
            Paragraph::new(Line::from(vec![display])).style(Style::default().bg(C_FILTER_BG));
        frame.render_widget(paragraph, area);

        if self.active && area.width > 0 {
            let cursor_x = area.x + 2 + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

impl Default for FilterInput {
    fn default() -> Self {
        Self::new("filter...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_reports_value() {
        let mut input = FilterInput::new("Search topics");
        input.activate();
        input.handle_key(key(KeyCode::Char('l')));
        assert_eq!(
            input.handle_key(key(KeyCode::Char('o'))),
            FilterAction::Changed("lo".into())
        );
        assert_eq!(input.text(), "lo");
    }

    #[test]
    fn esc_clears_then_closes() {
        let mut input = FilterInput::default();
        input.activate();
        input.set_value("work");
        assert_eq!(
            input.handle_key(key(KeyCode::Esc)),
            FilterAction::Changed(String::new())
        );
        assert!(input.is_active());
        assert_eq!(input.handle_key(key(KeyCode::Esc)), FilterAction::Cancelled);
        assert!(!input.is_active());
    }

    #[test]
    fn enter_confirms_and_keeps_text() {
        let mut input = FilterInput::default().with_prefix("›");
        input.activate();
        input.set_value("Night Shifts");
        assert_eq!(input.handle_key(key(KeyCode::Enter)), FilterAction::Confirmed);
        assert!(!input.is_active());
        assert_eq!(input.text(), "Night Shifts");
    }
}
