//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns the [`Session`], the [`Narrator`], every component and the
//!   read-only [`AppState`] snapshot the components render from.
//! - A `tokio::mpsc` channel carries terminal events in from a blocking reader.
//! - The loop also `select!`s on the narrator's completion channel, so the
//!   speaking indicator clears as soon as the speech program exits.
//! - Components return `Vec<Action>`; App applies each Action, then re-syncs
//!   `AppState` from the session.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Datelike;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use hifm_core::generator::Draft;
use hifm_core::narration::{NarrationEvent, Narrator, PlayOutcome};
use hifm_core::Session;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        feed::Feed, generator::Generator, header::Header, help_overlay::HelpOverlay,
        log_panel::LogPanel, topic_list::TopicList,
    },
    theme::C_BG,
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
    workspace::WorkspaceManager,
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
}

const LOG_TAIL_LINES: usize = 500;
const TOPICS_WIDTH: u16 = 34;
const GENERATOR_HEIGHT: u16 = 12;
const LOG_HEIGHT: u16 = 10;

// ── Pane area tracking ────────────────────────────────────────────────────────

/// Last-drawn rects of the focusable panes, for mouse hit-testing.
#[derive(Default, Clone, Copy)]
struct PaneAreas {
    topic_list: Rect,
    generator: Rect,
    feed: Rect,
    log_panel: Rect,
}

pub struct App {
    session: Session,
    narrator: Narrator,
    state: AppState,
    wm: WorkspaceManager,
    toast: ToastManager,

    header: Header,
    topic_list: TopicList,
    generator: Generator,
    feed: Feed,
    log_panel: LogPanel,
    help_overlay: HelpOverlay,

    pane_areas: PaneAreas,
    should_quit: bool,
    /// The "speech unavailable" notice is shown once per run.
    speech_notice_shown: bool,
}

impl App {
    pub fn new(session: Session, narrator: Narrator, draft: Draft, log_path: PathBuf) -> Self {
        let mut state = AppState::new(log_path);
        state.sync(&session, &narrator);

        let mut app = Self {
            session,
            narrator,
            state,
            wm: WorkspaceManager::new(),
            toast: ToastManager::new(),
            header: Header::new(),
            topic_list: TopicList::new(),
            generator: Generator::new(draft),
            feed: Feed::new(),
            log_panel: LogPanel::new(),
            help_overlay: HelpOverlay::new(),
            pane_areas: PaneAreas::default(),
            should_quit: false,
            speech_notice_shown: false,
        };
        app.topic_list.sync_topics(&app.state);
        app.feed.sync_feed(&app.state);
        app
    }

    pub async fn run(mut self, mut narration_rx: mpsc::Receiver<NarrationEvent>) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Periodic timers ───────────────────────────────────────────────────
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // hifm.log tail refresh: every 2s, only when the log panel is open
        let mut log_refresh = tokio::time::interval(Duration::from_secs(2));
        log_refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    let mut redraw = self.handle_message(msg);
                    while let Ok(next) = rx.try_recv() {
                        redraw |= self.handle_message(next);
                    }
                    needs_redraw = redraw;
                }

                Some(ev) = narration_rx.recv() => {
                    if self.narrator.handle_event(ev) {
                        self.state.sync(&self.session, &self.narrator);
                        needs_redraw = true;
                    }
                }

                _ = toast_tick.tick() => {
                    if !self.toast.is_empty() {
                        self.toast.tick();
                        needs_redraw = true;
                    }
                }

                _ = log_refresh.tick() => {
                    if self.wm.show_log_panel {
                        self.reload_log();
                        needs_redraw = true;
                    }
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.narrator.stop();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("hifm exiting");

        Ok(())
    }

    /// Returns whether the frame needs redrawing.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return false;
                }
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
                true
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                let actions = self.handle_mouse(mouse);
                let redraw = !actions.is_empty()
                    || matches!(
                        mouse.kind,
                        MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
                    );
                for action in actions {
                    self.dispatch(action);
                }
                redraw
            }
            AppMessage::Event(Event::Resize(w, h)) => {
                self.dispatch(Action::Resize(w, h));
                true
            }
            AppMessage::Event(_) => false,
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let mode = self.state.input_mode;

        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // Help overlay captures all keys when visible
        if self.wm.show_help {
            let actions = self.help_overlay.handle_key(key, &self.state);
            if !actions.is_empty() {
                return actions;
            }
            return vec![Action::ToggleHelp];
        }

        if mode == InputMode::Normal {
            match key.code {
                KeyCode::Char('q') if key.modifiers == KeyModifiers::NONE => {
                    return vec![Action::Quit]
                }
                KeyCode::Char('?') => return vec![Action::ToggleHelp],
                KeyCode::Char('L') => return vec![Action::ToggleLogs],
                KeyCode::Char('K') => return vec![Action::ToggleKeys],
                KeyCode::Char('x') => return vec![Action::StopNarration],
                KeyCode::Char('1') => return vec![Action::FocusPane(ComponentId::TopicList)],
                KeyCode::Char('2') => return vec![Action::FocusPane(ComponentId::Generator)],
                KeyCode::Char('3') => return vec![Action::FocusPane(ComponentId::Feed)],
                _ => {}
            }
        }

        // Tab / Shift-Tab always cycle focus, closing any open text input first
        let close_input = match mode {
            InputMode::Normal => None,
            InputMode::Filter => Some(Action::CloseFilter),
            InputMode::Edit => Some(Action::CloseEdit),
        };
        let focus_move = match key.code {
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            _ => None,
        };
        if let Some(mv) = focus_move {
            return close_input.into_iter().chain([mv]).collect();
        }

        // Dispatch to the focused component
        let s = &self.state;
        match self.wm.focused() {
            Some(ComponentId::TopicList) => self.topic_list.handle_key(key, s),
            Some(ComponentId::Generator) => self.generator.handle_key(key, s),
            Some(ComponentId::Feed) => self.feed.handle_key(key, s),
            Some(ComponentId::LogPanel) => self.log_panel.handle_key(key, s),
            Some(ComponentId::HelpOverlay) | None => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click || self.wm.show_help {
            return vec![];
        }

        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let areas = self.pane_areas;
        let (col, row) = (event.column, event.row);
        let s = &self.state;

        let (id, mut actions) = if hit(areas.topic_list, col, row) {
            (ComponentId::TopicList, self.topic_list.handle_mouse(event, areas.topic_list, s))
        } else if hit(areas.generator, col, row) {
            (ComponentId::Generator, self.generator.handle_mouse(event, areas.generator, s))
        } else if hit(areas.feed, col, row) {
            (ComponentId::Feed, self.feed.handle_mouse(event, areas.feed, s))
        } else if hit(areas.log_panel, col, row) {
            (ComponentId::LogPanel, self.log_panel.handle_mouse(event, areas.log_panel, s))
        } else {
            return vec![];
        };

        // Focus follows the click
        if self.wm.focused() != Some(id) {
            actions.insert(0, Action::FocusPane(id));
        }
        actions
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Components see the action first (e.g. to close their inputs)
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.topic_list.on_action(&action, s));
            out.extend(self.generator.on_action(&action, s));
            out.extend(self.feed.on_action(&action, s));
            out.extend(self.log_panel.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);

        // Secondary actions are applied once, not re-broadcast
        for a in secondary {
            self.apply_action(a);
        }
        self.state.sync(&self.session, &self.narrator);
        self.topic_list.sync_topics(&self.state);
        self.feed.sync_feed(&self.state);
    }

    fn apply_action(&mut self, action: Action) {
        if !matches!(action, Action::Resize(..)) {
            debug!("apply_action: {:?}", action);
        }
        match action {
            // ── Topics ────────────────────────────────────────────────────────
            Action::SelectTopic(topic) => self.session.set_selected_topic(topic),
            Action::ClearTopic => {
                self.session.clear_selected_topic();
                self.toast.info("showing every story");
            }
            Action::SearchChanged(query) => self.session.set_search_query(query),

            // ── Generator ─────────────────────────────────────────────────────
            Action::Generate { topic, tone, length } => {
                let episode = self.session.generate(&topic, tone, length);
                self.toast.success(format!("generated: {}", episode.title));
            }

            // ── Narration ─────────────────────────────────────────────────────
            Action::Play { key, text } => match self.narrator.play(&key, &text) {
                PlayOutcome::Started | PlayOutcome::Stopped => {}
                PlayOutcome::Unavailable if self.narrator.is_available() => {
                    self.toast.warning("could not start speech");
                }
                PlayOutcome::Unavailable => {
                    if !self.speech_notice_shown {
                        self.speech_notice_shown = true;
                        self.toast
                            .info("speech unavailable: install espeak-ng or set HIFM_SPEECH_PATH");
                    }
                }
            },
            Action::StopNarration => {
                self.narrator.stop();
            }

            // ── Feed ──────────────────────────────────────────────────────────
            Action::Like(id) => {
                let Some(episode) = self.session.find(&id).cloned() else {
                    warn!("like: unknown episode {}", id);
                    return;
                };
                if self.session.like(&episode) {
                    self.toast.success(format!("liked: {}", episode.title));
                } else {
                    self.toast.info("already liked");
                }
            }
            Action::Share(id) => match self.session.find(&id).map(|e| e.share_text()) {
                Some(text) => self.apply_action(Action::CopyToClipboard(text)),
                None => warn!("share: unknown episode {}", id),
            },

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.wm.focus_next();
                self.state.input_mode = InputMode::Normal;
            }
            Action::FocusPrev => {
                self.wm.focus_prev();
                self.state.input_mode = InputMode::Normal;
            }
            Action::FocusPane(id) => {
                self.wm.focus_set(id);
                self.state.input_mode = InputMode::Normal;
            }

            // ── Text input ────────────────────────────────────────────────────
            Action::OpenFilter => self.state.input_mode = InputMode::Filter,
            Action::OpenEdit => self.state.input_mode = InputMode::Edit,
            Action::CloseFilter | Action::CloseEdit => self.state.input_mode = InputMode::Normal,

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleLogs => {
                self.wm.toggle_log_panel();
                if self.wm.show_log_panel {
                    self.reload_log();
                }
            }
            Action::ToggleHelp => self.wm.show_help = !self.wm.show_help,
            Action::ToggleKeys => self.wm.show_keys_bar = !self.wm.show_keys_bar,
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => {
                self.narrator.stop();
                self.should_quit = true;
            }
            Action::Resize(..) => {}
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        // ── Outer layout: header | body | (log) | (keys) | footer ─────────────
        let keys_h = if self.wm.show_keys_bar { 1 } else { 0 };
        let log_h = if self.wm.show_log_panel { LOG_HEIGHT } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(log_h),
                Constraint::Length(keys_h),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.draw(frame, outer[0], &self.state);

        // ── Body: topics | (generator over feed) ──────────────────────────────
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(TOPICS_WIDTH), Constraint::Min(0)])
            .split(outer[1]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(GENERATOR_HEIGHT), Constraint::Min(0)])
            .split(columns[1]);

        self.pane_areas.topic_list = columns[0];
        self.pane_areas.generator = right[0];
        self.pane_areas.feed = right[1];

        let focused = self.wm.focused();
        self.topic_list.draw(
            frame,
            columns[0],
            focused == Some(ComponentId::TopicList),
            &self.state,
        );
        self.generator.draw(
            frame,
            right[0],
            focused == Some(ComponentId::Generator),
            &self.state,
        );
        self.feed
            .draw(frame, right[1], focused == Some(ComponentId::Feed), &self.state);

        // ── Log panel ─────────────────────────────────────────────────────────
        if self.wm.show_log_panel {
            self.log_panel.draw(
                frame,
                outer[2],
                focused == Some(ComponentId::LogPanel),
                &self.state,
            );
            self.pane_areas.log_panel = outer[2];
        } else {
            self.pane_areas.log_panel = Rect::default();
        }

        // ── Keys bar + footer ─────────────────────────────────────────────────
        if self.wm.show_keys_bar {
            status_bar::draw_keys_bar(
                frame,
                outer[3],
                self.state.input_mode,
                focused,
                self.state.speaking.is_some(),
            );
        }
        status_bar::draw_footer(frame, outer[4], chrono::Local::now().year());

        // ── Help overlay (on top of everything) ──────────────────────────────
        if self.wm.show_help {
            self.help_overlay.draw(frame, area, false, &self.state);
        }

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }

    /// Read the last lines of hifm.log into `state.log_lines`.
    fn reload_log(&mut self) {
        match std::fs::read_to_string(&self.state.log_path) {
            Ok(content) => {
                let lines: Vec<&str> = content.lines().collect();
                let start = lines.len().saturating_sub(LOG_TAIL_LINES);
                self.state.log_lines = lines[start..].iter().map(|l| l.to_string()).collect();
            }
            Err(e) => debug!("log reload failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let (narrator, _rx) = Narrator::new(None);
        App::new(
            Session::default(),
            narrator,
            Draft::new(Some("Everyday Heroes")),
            PathBuf::from("hifm.log"),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        for action in app.handle_key(key) {
            app.dispatch(action);
        }
    }

    #[test]
    fn selecting_a_topic_refocuses_the_feed() {
        let mut a = app();
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Enter);
        assert!(a.state.is_selected("Life Transitions"));
        assert_eq!(a.state.feed_heading, "Focusing on life transitions");
        assert_eq!(a.state.feed[0].title, "Letters to My Future Self");

        press(&mut a, KeyCode::Delete);
        assert_eq!(a.state.selected_topic, None);
        assert_eq!(a.state.feed.len(), a.session.catalog().len());
    }

    #[test]
    fn search_mode_swallows_global_keys() {
        let mut a = app();
        press(&mut a, KeyCode::Char('/'));
        assert_eq!(a.state.input_mode, InputMode::Filter);
        press(&mut a, KeyCode::Char('q'));
        assert!(!a.should_quit);
        assert_eq!(a.state.search_query, "q");

        press(&mut a, KeyCode::Tab);
        assert_eq!(a.state.input_mode, InputMode::Normal);
        assert_eq!(a.wm.focused(), Some(ComponentId::Generator));
    }

    #[test]
    fn generate_then_like_twice() {
        let mut a = app();
        press(&mut a, KeyCode::Char('2'));
        press(&mut a, KeyCode::Char('g'));
        assert_eq!(a.session.generated().len(), 1);
        assert!(a.state.feed[0].is_generated());

        press(&mut a, KeyCode::Char('3'));
        press(&mut a, KeyCode::Char('l'));
        press(&mut a, KeyCode::Char('l'));
        assert_eq!(a.session.liked().len(), 1);
        assert_eq!(
            a.state.liked_summary.as_deref(),
            Some("You liked 1 episode — saved for later listening.")
        );
    }

    #[test]
    fn play_without_speech_is_silent() {
        let mut a = app();
        press(&mut a, KeyCode::Char('3'));
        press(&mut a, KeyCode::Char('p'));
        assert_eq!(a.state.speaking, None);
        assert!(a.speech_notice_shown);
        assert_eq!(a.toast.len(), 1);

        press(&mut a, KeyCode::Char('p'));
        assert_eq!(a.toast.len(), 1);
    }

    #[test]
    fn editing_topic_keeps_q_as_text() {
        let mut a = app();
        press(&mut a, KeyCode::Char('2'));
        press(&mut a, KeyCode::Enter);
        assert_eq!(a.state.input_mode, InputMode::Edit);
        press(&mut a, KeyCode::Char('q'));
        assert!(!a.should_quit);
        press(&mut a, KeyCode::Enter);
        assert_eq!(a.state.input_mode, InputMode::Normal);
        assert_eq!(a.generator.draft.topic, "Everyday Heroesq");
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut a = app();
        press(&mut a, KeyCode::Char('q'));
        assert!(a.should_quit);
    }
}
