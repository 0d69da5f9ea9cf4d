//! TopicList component — left pane: the eight topics with a search bar.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_ACCENT_SOFT, C_MUTED, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    widgets::{
        filter_input::{FilterAction, FilterInput},
        pane_chrome::pane_chrome,
        scrollable_list::ScrollableList,
    },
};

const SUBTITLE: &str = "✦ Curated for human-interest storytelling";

pub struct TopicList {
    pub list: ScrollableList<&'static str>,
    pub filter_input: FilterInput,
}

impl TopicList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(),
            filter_input: FilterInput::new("Search topics"),
        }
    }

    /// Pull the visible topics from state, keeping the cursor on the same
    /// topic when it is still listed.
    pub fn sync_topics(&mut self, state: &AppState) {
        if self.list.items == state.visible_topics {
            return;
        }
        let current = self.list.selected_item().copied();
        self.list.set_items(state.visible_topics.clone());
        let kept = current.is_some_and(|c| self.list.select_where(|t| *t == c));
        if !kept {
            let selected = state.selected_topic.as_deref();
            if !self.list.select_where(|t| Some(*t) == selected) {
                self.list.select_first();
            }
        }
    }

    fn select_current(&self) -> Vec<Action> {
        match self.list.selected_item() {
            Some(topic) => vec![Action::SelectTopic(topic.to_string())],
            None => vec![],
        }
    }

    fn render_row(&self, topic: &'static str, is_cursor: bool, focused: bool, state: &AppState) -> Line<'static> {
        let selected = state.is_selected(topic);
        let (marker, marker_color) = if selected {
            ("●", C_ACCENT)
        } else {
            ("○", C_MUTED)
        };
        let name_style = if selected {
            Style::default().fg(C_ACCENT_SOFT).add_modifier(Modifier::BOLD)
        } else if is_cursor && focused {
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_SECONDARY)
        };
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(marker, Style::default().fg(marker_color)),
            Span::raw(" "),
            Span::styled(topic, name_style),
        ]);
        if is_cursor {
            line.style(Style::default().bg(C_SELECTION_BG))
        } else {
            line
        }
    }
}

impl Component for TopicList {
    fn id(&self) -> ComponentId {
        ComponentId::TopicList
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        // Search mode input
        if self.filter_input.is_active() {
            match key.code {
                KeyCode::Up => {
                    self.list.select_up(1);
                    return vec![];
                }
                KeyCode::Down => {
                    self.list.select_down(1);
                    return vec![];
                }
                _ => {}
            }
            return match self.filter_input.handle_key(key) {
                FilterAction::Changed(q) => vec![Action::SearchChanged(q)],
                FilterAction::Confirmed => {
                    let mut actions = vec![Action::CloseFilter];
                    actions.extend(self.select_current());
                    actions
                }
                FilterAction::Cancelled => vec![Action::SearchChanged(String::new()), Action::CloseFilter],
            };
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter | KeyCode::Char(' ') => return self.select_current(),
            KeyCode::Backspace | KeyCode::Delete => return vec![Action::ClearTopic],
            KeyCode::Char('/') => {
                self.filter_input.activate();
                return vec![Action::OpenFilter];
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        // border + subtitle row
        let rel_row = event.row.saturating_sub(area.y + 2) as usize;
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                if event.row >= area.y + 2 && self.list.handle_click(rel_row) {
                    return self.select_current();
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::CloseFilter
            | Action::FocusNext
            | Action::FocusPrev
            | Action::FocusPane(_) => self.filter_input.deactivate(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.sync_topics(state);

        let block = pane_chrome("Explore Topics", Some('1'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {}", SUBTITLE), Style::default().fg(C_MUTED))),
            Rect { height: 1, ..inner },
        );

        let show_search = self.filter_input.is_active() || !state.search_query.is_empty();
        let reserved = 1 + u16::from(show_search);
        let list_area = Rect {
            y: inner.y + 1,
            height: inner.height.saturating_sub(reserved),
            ..inner
        };

        if self.list.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no topics match", Style::default().fg(C_MUTED))),
                list_area,
            );
        } else {
            let height = list_area.height as usize;
            self.list.ensure_visible(height);
            let lines: Vec<Line> = self
                .list
                .visible_items(height)
                .into_iter()
                .map(|(idx, topic)| self.render_row(topic, idx == self.list.selected, focused, state))
                .collect();
            frame.render_widget(Paragraph::new(lines), list_area);
        }

        if show_search && inner.height > 1 {
            let search_area = Rect {
                y: inner.y + inner.height - 1,
                height: 1,
                ..inner
            };
            if !self.filter_input.is_active() && self.filter_input.text() != state.search_query {
                self.filter_input.set_value(&state.search_query);
            }
            self.filter_input.draw(frame, search_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hifm_core::topic::TOPICS;
    use std::path::PathBuf;

    fn state() -> AppState {
        let mut s = AppState::new(PathBuf::new());
        s.visible_topics = TOPICS.to_vec();
        s.selected_topic = Some("Everyday Heroes".into());
        s
    }

    fn press(c: KeyCode) -> KeyEvent {
        KeyEvent::new(c, KeyModifiers::NONE)
    }

    #[test]
    fn enter_selects_cursor_topic() {
        let s = state();
        let mut t = TopicList::new();
        t.sync_topics(&s);
        t.handle_key(press(KeyCode::Down), &s);
        let actions = t.handle_key(press(KeyCode::Enter), &s);
        assert!(matches!(&actions[..], [Action::SelectTopic(x)] if x == "Life Transitions"));
    }

    #[test]
    fn search_keystrokes_emit_query() {
        let s = state();
        let mut t = TopicList::new();
        t.sync_topics(&s);
        assert!(matches!(&t.handle_key(press(KeyCode::Char('/')), &s)[..], [Action::OpenFilter]));
        let actions = t.handle_key(press(KeyCode::Char('w')), &s);
        assert!(matches!(&actions[..], [Action::SearchChanged(q)] if q == "w"));
    }

    #[test]
    fn cursor_follows_topic_across_filtering() {
        let mut s = state();
        let mut t = TopicList::new();
        t.sync_topics(&s);
        t.list.select_where(|x| *x == "Work & Purpose");

        s.visible_topics = vec!["Overcoming Odds", "Work & Purpose"];
        t.sync_topics(&s);
        assert_eq!(t.list.selected_item(), Some(&"Work & Purpose"));

        s.visible_topics = vec!["Love & Relationships"];
        t.sync_topics(&s);
        assert_eq!(t.list.selected_item(), Some(&"Love & Relationships"));
    }

    #[test]
    fn delete_clears_selection() {
        let s = state();
        let mut t = TopicList::new();
        assert!(matches!(&t.handle_key(press(KeyCode::Delete), &s)[..], [Action::ClearTopic]));
    }
}
