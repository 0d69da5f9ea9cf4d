//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this for session data, but never mutate it.
//! The App event-loop is the only thing that writes to AppState, via
//! [`AppState::sync`] after every action.

use std::collections::HashSet;
use std::path::PathBuf;

use hifm_core::narration::Narrator;
use hifm_core::{Episode, EpisodeId, Session};

use crate::widgets::status_bar::InputMode;

/// The full shared state of the application.
pub struct AppState {
    // ── Topics ──────────────────────────────────────────────────────────────
    pub selected_topic: Option<String>,
    /// Topics matching the current search query, canonical order.
    pub visible_topics: Vec<&'static str>,
    pub search_query: String,

    // ── Feed ────────────────────────────────────────────────────────────────
    pub feed: Vec<Episode>,
    pub feed_heading: String,
    pub liked_ids: HashSet<EpisodeId>,
    pub liked_summary: Option<String>,

    // ── Narration ───────────────────────────────────────────────────────────
    /// Key of the utterance in flight (an episode id or [`PREVIEW_KEY`]).
    pub speaking: Option<String>,
    pub speech_available: bool,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub input_mode: InputMode,

    // ── Log panel ───────────────────────────────────────────────────────────
    pub log_path: PathBuf,
    /// Cached lines from hifm.log (refreshed periodically by App).
    pub log_lines: Vec<String>,
}

/// Narration key used for the generator preview.
pub const PREVIEW_KEY: &str = "preview";

impl AppState {
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            selected_topic: None,
            visible_topics: Vec::new(),
            search_query: String::new(),
            feed: Vec::new(),
            feed_heading: String::new(),
            liked_ids: HashSet::new(),
            liked_summary: None,
            speaking: None,
            speech_available: false,
            input_mode: InputMode::Normal,
            log_path,
            log_lines: Vec::new(),
        }
    }

    /// Refresh every derived field from the session and narrator.
    pub fn sync(&mut self, session: &Session, narrator: &Narrator) {
        self.selected_topic = session.selected_topic().map(str::to_string);
        self.visible_topics = session.filtered_topics();
        self.search_query = session.search_query().to_string();
        self.feed = session.compose_feed();
        self.feed_heading = session.feed_heading();
        self.liked_ids = session.liked().iter().map(|e| e.id.clone()).collect();
        self.liked_summary = session.liked().summary();
        self.speaking = narrator.speaking_key().map(str::to_string);
        self.speech_available = narrator.is_available();
    }

    pub fn is_speaking(&self, key: &str) -> bool {
        self.speaking.as_deref() == Some(key)
    }

    pub fn is_liked(&self, id: &EpisodeId) -> bool {
        self.liked_ids.contains(id)
    }

    pub fn is_selected(&self, topic: &str) -> bool {
        self.selected_topic.as_deref() == Some(topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_mirrors_session() {
        let mut session = Session::default();
        let (narrator, _rx) = Narrator::new(None);
        let ep = session.catalog()[0].clone();
        session.like(&ep);
        session.set_search_query("life");

        let mut state = AppState::new(PathBuf::from("hifm.log"));
        state.sync(&session, &narrator);

        assert!(state.is_selected("Everyday Heroes"));
        assert_eq!(state.visible_topics, vec!["Life Transitions"]);
        assert_eq!(state.feed.len(), 3);
        assert_eq!(state.feed_heading, "Focusing on everyday heroes");
        assert!(state.is_liked(&ep.id));
        assert!(state.liked_summary.is_some());
        assert!(!state.speech_available);
        assert!(!state.is_speaking(PREVIEW_KEY));
    }
}
