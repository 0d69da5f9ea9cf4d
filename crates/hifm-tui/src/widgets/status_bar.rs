//! Status bar — keybindings line and the page footer.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::ComponentId;
use crate::theme::{C_MODE_EDIT, C_MODE_FILTER, C_MODE_NORMAL, C_MUTED, C_SECONDARY, C_SPEAKING};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    /// Typing into the topic search bar.
    Filter,
    /// Editing the generator's topic field.
    Edit,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Filter => "SEARCH",
            Self::Edit => "EDIT",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Filter => C_MODE_FILTER,
            Self::Edit => C_MODE_EDIT,
        }
    }
}

/// Key hints for the current mode and focused pane.
pub fn key_hints(mode: InputMode, focused: Option<ComponentId>) -> &'static str {
    match mode {
        InputMode::Filter => "type to search  ↑↓ move  Enter keep  Esc clear+close  Tab next pane",
        InputMode::Edit => "type a topic  Enter done  Esc clear/cancel",
        InputMode::Normal => match focused {
            Some(ComponentId::TopicList) => {
                "↑↓/jk move  Enter select  Del clear  / search  x stop  Tab/1-3 panes  ? help  q quit"
            }
            Some(ComponentId::Generator) => {
                "↑↓ field  ←→ change  Enter edit topic  g generate  p play/stop  x stop  ? help  q quit"
            }
            Some(ComponentId::Feed) => {
                "↑↓/jk move  Enter/p play/stop  l like  y share  x stop  Tab/1-3 panes  ? help  q quit"
            }
            _ => "↑↓ scroll  Tab/1-3 panes  L close log  ? help  q quit",
        },
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    focused: Option<ComponentId>,
    speaking: bool,
) {
    let mut spans = vec![Span::styled(
        format!(" {} ", mode.label()),
        Style::default()
            .fg(mode.color())
            .add_modifier(Modifier::BOLD),
    )];
    if speaking {
        spans.push(Span::styled(
            "♪",
            Style::default().fg(C_SPEAKING).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        key_hints(mode, focused),
        Style::default().fg(C_MUTED),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the page footer: copyright left, sign-off right.
pub fn draw_footer(frame: &mut Frame, area: Rect, year: i32) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let style = Style::default().fg(C_SECONDARY);
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {}", copyright(year)), style)),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled("Built for story lovers ", style)).alignment(Alignment::Right),
        halves[1],
    );
}

pub fn copyright(year: i32) -> String {
    format!("© {} Human Interest FM", year)
}
