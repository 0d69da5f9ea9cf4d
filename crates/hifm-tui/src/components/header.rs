//! Header — 2-row top bar.
//!
//! Row 1: brand + tagline (left), channel blurb (right).
//! Row 2: hero line, replaced by the liked summary once something is liked.
//!
//! Not focusable.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    app_state::AppState,
    theme::{C_ACCENT, C_ACCENT_SOFT, C_LIKED, C_PRIMARY, C_SECONDARY},
};

pub const BRAND: &str = "Human Interest FM";
pub const TAGLINE: &str = "Stories that stay with you";
const BLURB: &str = "Tune in to curated and AI-generated episodes";
const HERO: &str = "Human Interest Podcasts — curated and AI-generated";

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    /// The second row: liked summary when present, otherwise the hero line.
    pub fn subline(state: &AppState) -> Line<'static> {
        match &state.liked_summary {
            Some(summary) => Line::from(vec![
                Span::styled(" ♥ ", Style::default().fg(C_LIKED)),
                Span::styled(summary.clone(), Style::default().fg(C_ACCENT_SOFT)),
            ]),
            None => Line::from(Span::styled(
                format!(" {}", HERO),
                Style::default().fg(C_SECONDARY),
            )),
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        if area.height == 0 {
            return;
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[0]);

        let brand = Line::from(vec![
            Span::styled(" ◉ ", Style::default().fg(C_ACCENT)),
            Span::styled(
                BRAND,
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ", Style::default()),
            Span::styled(TAGLINE, Style::default().fg(C_SECONDARY)),
        ]);
        frame.render_widget(Paragraph::new(brand), halves[0]);

        let speech = if state.speech_available { "♪ " } else { "" };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(speech, Style::default().fg(C_ACCENT_SOFT)),
                Span::styled(BLURB, Style::default().fg(C_SECONDARY)),
                Span::styled(" ✦ ", Style::default().fg(C_ACCENT)),
            ]))
            .alignment(Alignment::Right),
            halves[1],
        );

        if rows[1].height > 0 {
            frame.render_widget(Paragraph::new(Self::subline(state)), rows[1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn subline_switches_to_liked_summary() {
        let mut state = AppState::new(PathBuf::new());
        assert!(text(&Header::subline(&state)).contains("curated and AI-generated"));

        state.liked_summary = Some("You liked 2 episodes — saved for later listening.".into());
        assert!(text(&Header::subline(&state)).ends_with("saved for later listening."));
    }
}
