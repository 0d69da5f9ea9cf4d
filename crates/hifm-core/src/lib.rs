//! Core model for Human Interest FM: topics, the episode generator, the feed
//! composer, and the narration state machine.
//!
//! Everything here is UI-agnostic.  The terminal front end in `hifm-tui`
//! owns a [`session::Session`] and a [`narration::Narrator`] and drives them
//! from its event loop.

pub mod catalog;
pub mod config;
pub mod episode;
pub mod feed;
pub mod generator;
pub mod narration;
pub mod platform;
pub mod session;
pub mod tone;
pub mod topic;

pub use episode::{Episode, EpisodeId};
pub use session::Session;
pub use tone::Tone;
