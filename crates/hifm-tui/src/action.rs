//! Action enum — all user-initiated intents and internal events.

use hifm_core::{EpisodeId, Tone};

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    TopicList,
    Generator,
    Feed,
    LogPanel,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Topics ───────────────────────────────────────────────────────────────
    SelectTopic(String),
    ClearTopic,
    SearchChanged(String),

    // ── Generator ────────────────────────────────────────────────────────────
    Generate {
        topic: String,
        tone: Tone,
        length: u32,
    },

    // ── Narration ────────────────────────────────────────────────────────────
    /// Toggle narration of `text` under `key`.
    Play { key: String, text: String },
    StopNarration,

    // ── Feed ─────────────────────────────────────────────────────────────────
    Like(EpisodeId),
    Share(EpisodeId),

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── Text input ───────────────────────────────────────────────────────────
    OpenFilter,
    CloseFilter,
    OpenEdit,
    CloseEdit,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleLogs,
    ToggleHelp,
    ToggleKeys,
    CopyToClipboard(String), // text to copy

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}
