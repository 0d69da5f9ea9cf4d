//! Generator component — the micro-episode form with its live preview.
//!
//! Three fields (topic, tone, length) and a preview paragraph that always
//! shows the description the current values would produce.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use hifm_core::generator::{Draft, MAX_LENGTH, MIN_LENGTH};

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, PREVIEW_KEY},
    component::Component,
    theme::{
        C_ACCENT, C_ACCENT_SOFT, C_MUTED, C_PRIMARY, C_SECONDARY, C_SELECTION_BG, C_SPEAKING,
    },
    widgets::{
        filter_input::{FilterAction, FilterInput},
        pane_chrome::pane_chrome,
    },
};

const LABEL_WIDTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Topic,
    Tone,
    Length,
}

impl Field {
    const ALL: [Field; 3] = [Field::Topic, Field::Tone, Field::Length];

    fn label(self) -> &'static str {
        match self {
            Self::Topic => "Topic",
            Self::Tone => "Tone",
            Self::Length => "Length",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Topic => 0,
            Self::Tone => 1,
            Self::Length => 2,
        }
    }
}

pub struct Generator {
    pub draft: Draft,
    pub field: Field,
    topic_input: FilterInput,
    /// Restored when the edit is cancelled.
    topic_before_edit: Option<String>,
}

impl Generator {
    pub fn new(draft: Draft) -> Self {
        Self {
            draft,
            field: Field::Topic,
            topic_input: FilterInput::new("e.g. Everyday Heroes").with_prefix("›"),
            topic_before_edit: None,
        }
    }

    fn move_field(&mut self, delta: isize) {
        let idx = (self.field.index() as isize + delta).clamp(0, Field::ALL.len() as isize - 1);
        self.field = Field::ALL[idx as usize];
    }

    /// Step the focused value left (-1) or right (+1).
    fn step(&mut self, dir: i32) {
        match self.field {
            Field::Topic => {}
            Field::Tone => {
                self.draft.tone = if dir < 0 {
                    self.draft.tone.prev()
                } else {
                    self.draft.tone.next()
                }
            }
            Field::Length => self.draft.bump_length(dir),
        }
    }

    fn begin_edit(&mut self) -> Vec<Action> {
        self.topic_before_edit = Some(self.draft.topic.clone());
        self.topic_input.set_value(&self.draft.topic);
        self.topic_input.activate();
        vec![Action::OpenEdit]
    }

    fn finish_edit(&mut self, keep: bool) {
        let previous = self.topic_before_edit.take();
        let blank = self.draft.topic.trim().is_empty();
        if !keep || blank {
            if let Some(prev) = previous {
                self.draft.topic = prev;
            }
        } else {
            self.draft.topic = self.draft.topic.trim().to_string();
        }
        self.topic_input.deactivate();
    }

    fn generate(&self) -> Vec<Action> {
        vec![Action::Generate {
            topic: self.draft.topic.clone(),
            tone: self.draft.tone,
            length: self.draft.length,
        }]
    }

    fn play_preview(&self) -> Vec<Action> {
        vec![Action::Play {
            key: PREVIEW_KEY.to_string(),
            text: self.draft.preview(),
        }]
    }

    fn field_line(&self, field: Field, focused: bool) -> Line<'static> {
        let is_cursor = self.field == field;
        let label_style = if is_cursor && focused {
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_MUTED)
        };
        let value_style = Style::default().fg(C_PRIMARY);
        let arrows = Style::default().fg(if is_cursor { C_ACCENT_SOFT } else { C_MUTED });

        let mut spans = vec![Span::styled(
            format!(" {:<width$}", field.label(), width = LABEL_WIDTH),
            label_style,
        )];
        match field {
            Field::Topic => spans.push(Span::styled(self.draft.topic.clone(), value_style)),
            Field::Tone => {
                spans.push(Span::styled("‹ ", arrows));
                spans.push(Span::styled(self.draft.tone.label(), value_style));
                spans.push(Span::styled(" ›", arrows));
            }
            Field::Length => {
                spans.push(Span::styled("‹ ", arrows));
                spans.push(Span::styled(format!("{} min", self.draft.length), value_style));
                spans.push(Span::styled(" ›", arrows));
                spans.push(Span::styled(
                    format!("  ({}–{})", MIN_LENGTH, MAX_LENGTH),
                    Style::default().fg(C_MUTED),
                ));
            }
        }
        let line = Line::from(spans);
        if is_cursor && focused {
            line.style(Style::default().bg(C_SELECTION_BG))
        } else {
            line
        }
    }
}

impl Component for Generator {
    fn id(&self) -> ComponentId {
        ComponentId::Generator
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        if self.topic_input.is_active() {
            return match self.topic_input.handle_key(key) {
                FilterAction::Changed(text) => {
                    self.draft.topic = text;
                    vec![]
                }
                FilterAction::Confirmed => vec![Action::CloseEdit],
                FilterAction::Cancelled => {
                    self.finish_edit(false);
                    vec![Action::CloseEdit]
                }
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_field(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_field(1),
            KeyCode::Left | KeyCode::Char('h') => self.step(-1),
            KeyCode::Right | KeyCode::Char('l') => self.step(1),
            KeyCode::Char('+') | KeyCode::Char('=') => self.draft.bump_length(1),
            KeyCode::Char('-') => self.draft.bump_length(-1),
            KeyCode::Char('t') => self.draft.tone = self.draft.tone.next(),
            KeyCode::Enter if self.field == Field::Topic => return self.begin_edit(),
            KeyCode::Enter | KeyCode::Char('g') => return self.generate(),
            KeyCode::Char('p') | KeyCode::Char(' ') => return self.play_preview(),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            let row = event.row.saturating_sub(area.y + 1) as usize;
            if event.row > area.y && row < Field::ALL.len() {
                self.field = Field::ALL[row];
            }
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::CloseEdit if self.topic_input.is_active() || self.topic_before_edit.is_some() => {
                self.finish_edit(true);
            }
            // Tab away while editing keeps what was typed.
            Action::FocusNext | Action::FocusPrev | Action::FocusPane(_)
                if self.topic_input.is_active() =>
            {
                self.finish_edit(true);
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("Generate a micro-episode", Some('2'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let mut y = inner.y;
        for field in Field::ALL {
            if y >= inner.y + inner.height {
                return;
            }
            let row = Rect { y, height: 1, ..inner };
            if field == Field::Topic && self.topic_input.is_active() {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        format!(" {:<width$}", field.label(), width = LABEL_WIDTH),
                        Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
                    )),
                    row,
                );
                let input_x = row.x + LABEL_WIDTH as u16 + 1;
                let input_area = Rect {
                    x: input_x.min(row.x + row.width),
                    width: row.width.saturating_sub(LABEL_WIDTH as u16 + 1),
                    ..row
                };
                self.topic_input.draw(frame, input_area);
            } else {
                frame.render_widget(Paragraph::new(self.field_line(field, focused)), row);
            }
            y += 1;
        }

        // blank spacer, then the preview
        y += 1;
        if y >= inner.y + inner.height {
            return;
        }
        let speaking = state.is_speaking(PREVIEW_KEY);
        let (indicator, ind_style) = if speaking {
            ("■ Stop", Style::default().fg(C_SPEAKING).add_modifier(Modifier::BOLD))
        } else {
            ("▶ Play", Style::default().fg(C_ACCENT_SOFT))
        };
        let heading = Line::from(vec![
            Span::styled(" Preview  ", Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD)),
            Span::styled(indicator, ind_style),
            Span::styled("  [p]", Style::default().fg(C_MUTED)),
        ]);
        frame.render_widget(Paragraph::new(heading), Rect { y, height: 1, ..inner });
        y += 1;

        let preview_area = Rect {
            x: inner.x + 1,
            y,
            width: inner.width.saturating_sub(2),
            height: (inner.y + inner.height).saturating_sub(y),
        };
        if preview_area.height > 0 {
            frame.render_widget(
                Paragraph::new(self.draft.preview())
                    .style(Style::default().fg(C_SECONDARY))
                    .wrap(Wrap { trim: true }),
                preview_area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hifm_core::generator::describe;
    use hifm_core::Tone;
    use ratatui::crossterm::event::KeyModifiers;
    use std::path::PathBuf;

    fn press(c: KeyCode) -> KeyEvent {
        KeyEvent::new(c, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        AppState::new(PathBuf::new())
    }

    #[test]
    fn arrows_change_tone_and_length_within_bounds() {
        let s = state();
        let mut g = Generator::new(Draft::new(Some("Work & Purpose")));
        g.handle_key(press(KeyCode::Down), &s);
        g.handle_key(press(KeyCode::Right), &s);
        assert_eq!(g.draft.tone, Tone::Reflective);

        g.handle_key(press(KeyCode::Down), &s);
        for _ in 0..40 {
            g.handle_key(press(KeyCode::Right), &s);
        }
        assert_eq!(g.draft.length, MAX_LENGTH);
        g.handle_key(press(KeyCode::Char('-')), &s);
        assert_eq!(g.draft.length, MAX_LENGTH - 1);
    }

    #[test]
    fn generate_and_play_carry_form_values() {
        let s = state();
        let mut g = Generator::new(Draft::new(Some("Overcoming Odds")));
        g.handle_key(press(KeyCode::Char('t')), &s);

        match &g.handle_key(press(KeyCode::Char('g')), &s)[..] {
            [Action::Generate { topic, tone, length }] => {
                assert_eq!(topic, "Overcoming Odds");
                assert_eq!(*tone, Tone::Reflective);
                assert_eq!(*length, 5);
            }
            other => panic!("unexpected {:?}", other),
        }

        match &g.handle_key(press(KeyCode::Char('p')), &s)[..] {
            [Action::Play { key, text }] => {
                assert_eq!(key, PREVIEW_KEY);
                assert_eq!(text, &describe("Overcoming Odds", Tone::Reflective, 5));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn topic_edit_updates_live_and_cancel_restores() {
        let s = state();
        let mut g = Generator::new(Draft::new(None));
        assert!(matches!(&g.handle_key(press(KeyCode::Enter), &s)[..], [Action::OpenEdit]));
        g.handle_key(press(KeyCode::Char('!')), &s);
        assert_eq!(g.draft.topic, "Everyday Heroes!");

        // first Esc clears, second cancels
        g.handle_key(press(KeyCode::Esc), &s);
        let actions = g.handle_key(press(KeyCode::Esc), &s);
        assert!(matches!(&actions[..], [Action::CloseEdit]));
        assert_eq!(g.draft.topic, "Everyday Heroes");
        assert!(!g.topic_input.is_active());
    }

    #[test]
    fn confirmed_edit_keeps_new_topic() {
        let s = state();
        let mut g = Generator::new(Draft::new(None));
        g.handle_key(press(KeyCode::Enter), &s);
        for _ in 0.."Everyday Heroes".len() {
            g.handle_key(press(KeyCode::Backspace), &s);
        }
        for c in "Night Shift".chars() {
            g.handle_key(press(KeyCode::Char(c)), &s);
        }
        let actions = g.handle_key(press(KeyCode::Enter), &s);
        for a in &actions {
            g.on_action(a, &s);
        }
        assert_eq!(g.draft.topic, "Night Shift");
        assert!(g.draft.preview().contains("In night shift,"));
    }
}
