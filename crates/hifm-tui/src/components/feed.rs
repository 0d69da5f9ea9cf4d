//! Feed component — right-bottom pane: "Recommended for you" episode cards.
//!
//! Each card spans [`CARD_HEIGHT`] rows:
//!
//! ```text
//!  ▶ The Bus Driver's Piano                      6 min  ♥
//!    A retired bus driver turns an abandoned piano into a
//!    neighborhood ritual that brings strangers together…
//!    # Everyday Heroes
//! ```

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
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use hifm_core::Episode;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        C_ACCENT, C_ACCENT_SOFT, C_BADGE, C_CHIP, C_LIKED, C_MUTED, C_PRIMARY, C_SECONDARY,
        C_SELECTION_BG, C_SPEAKING,
    },
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
    },
};

pub const CARD_HEIGHT: u16 = 5;
const DESCRIPTION_LINES: usize = 2;
/// Left gutter under the play indicator.
const INDENT: usize = 3;

pub struct Feed {
    pub list: ScrollableList<Episode>,
}

impl Feed {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(),
        }
    }

    /// Pull the composed feed from state, keeping the cursor on the same
    /// episode. A newly generated episode lands at the top and takes the
    /// cursor with it.
    pub fn sync_feed(&mut self, state: &AppState) {
        let unchanged = self.list.items.len() == state.feed.len()
            && self
                .list
                .items
                .iter()
                .zip(&state.feed)
                .all(|(a, b)| a.id == b.id);
        if unchanged {
            return;
        }
        let current = self.list.selected_item().map(|e| e.id.clone());
        let known: Vec<_> = self.list.items.iter().map(|e| e.id.clone()).collect();
        self.list.set_items(state.feed.clone());

        let fresh_top = state
            .feed
            .first()
            .is_some_and(|e| e.is_generated() && !known.is_empty() && !known.contains(&e.id));
        if fresh_top {
            self.list.select_first();
            return;
        }
        let kept = current.is_some_and(|id| self.list.select_where(|e| e.id == id));
        if !kept {
            self.list.select_first();
        }
    }

    fn selected(&self) -> Option<&Episode> {
        self.list.selected_item()
    }

    fn card_lines(&self, ep: &Episode, is_cursor: bool, focused: bool, width: usize, state: &AppState) -> Vec<Line<'static>> {
        let speaking = state.is_speaking(ep.id.as_str());
        let liked = state.is_liked(&ep.id);

        let (indicator, ind_style) = if speaking {
            (" ■ ", Style::default().fg(C_SPEAKING).add_modifier(Modifier::BOLD))
        } else {
            (" ▶ ", Style::default().fg(C_ACCENT_SOFT))
        };
        let title_style = if is_cursor && focused {
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_PRIMARY)
        };
        let badge = format!(" {} ", ep.length_badge());
        let like_mark = if liked { " ♥" } else { "  " };
        let title_room = width
            .saturating_sub(INDENT)
            .saturating_sub(badge.width() + like_mark.width() + 1);
        let title = truncate(&ep.title, title_room);
        let pad = title_room.saturating_sub(title.width());

        let mut lines = vec![Line::from(vec![
            Span::styled(indicator, ind_style),
            Span::styled(title, title_style),
            Span::raw(" ".repeat(pad + 1)),
            Span::styled(badge, Style::default().fg(C_BADGE).add_modifier(Modifier::BOLD)),
            Span::styled(like_mark, Style::default().fg(C_LIKED)),
        ])];

        let text_width = width.saturating_sub(INDENT + 1);
        let mut desc = wrap_text(&ep.description, text_width, DESCRIPTION_LINES);
        desc.resize(DESCRIPTION_LINES, String::new());
        for l in desc {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(INDENT)),
                Span::styled(l, Style::default().fg(C_SECONDARY)),
            ]));
        }

        let mut chip = vec![Span::raw(" ".repeat(INDENT))];
        if let Some(topic) = &ep.topic {
            chip.push(Span::styled(format!("# {}", topic), Style::default().fg(C_CHIP)));
        }
        if let Some(tone) = ep.tone {
            chip.push(Span::styled(
                format!("  {} · generated", tone.label().to_lowercase()),
                Style::default().fg(C_ACCENT),
            ));
        }
        lines.push(Line::from(chip));
        lines.push(Line::default());

        if is_cursor {
            lines
                .into_iter()
                .map(|l| l.style(Style::default().bg(C_SELECTION_BG)))
                .collect()
        } else {
            lines
        }
    }
}

/// Cut `s` to at most `width` columns, ending in `…` when shortened.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    format!("{}…", take_width(s, width - 1))
}

/// Longest prefix of `s` that fits in `width` columns.
fn take_width(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out
}

/// Greedy word wrap into at most `max_lines` lines of `width` columns.
/// The last line ends in `…` when text remains.
pub fn wrap_text(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.width()
        } else {
            current.width() + 1 + word.width()
        };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if lines.len() == max_lines {
            if let Some(last) = lines.last_mut() {
                *last = format!("{}…", take_width(last, width - 1));
            }
            return lines;
        }
        current = truncate(word, width);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

impl Component for Feed {
    fn id(&self) -> ComponentId {
        ComponentId::Feed
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            3
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(3),
            KeyCode::PageDown => self.list.select_down(3),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char(' ') => {
                if let Some(ep) = self.selected() {
                    return vec![Action::Play {
                        key: ep.id.as_str().to_string(),
                        text: ep.description.clone(),
                    }];
                }
            }
            KeyCode::Char('l') => {
                if let Some(ep) = self.selected() {
                    return vec![Action::Like(ep.id.clone())];
                }
            }
            KeyCode::Char('y') => {
                if let Some(ep) = self.selected() {
                    return vec![Action::Share(ep.id.clone())];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) if event.row > area.y => {
                let card = (event.row - area.y - 1) / CARD_HEIGHT;
                self.list.handle_click(card as usize);
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.sync_feed(state);

        let block = pane_chrome(
            "Recommended for you",
            Some('3'),
            focused,
            Some(Badge {
                text: &state.feed_heading,
                color: C_ACCENT_SOFT,
            }),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        if self.list.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  nothing to recommend yet", Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        let cards = ((inner.height / CARD_HEIGHT) as usize).max(1);
        self.list.ensure_visible(cards);
        let width = inner.width as usize;
        let lines: Vec<Line> = self
            .list
            .visible_items(cards)
            .into_iter()
            .flat_map(|(idx, ep)| self.card_lines(ep, idx == self.list.selected, focused, width, state))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
