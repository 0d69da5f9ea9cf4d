//! Session — the single owner of all per-run state.
//!
//! Selection, search query, generated episodes and likes live here and are
//! dropped with the session.  Every mutation goes through `&mut self`; the UI
//! event loop is the only writer.

use tracing::{debug, info};

use crate::catalog;
use crate::episode::{Episode, EpisodeId};
use crate::feed::{self, LikedEpisodes};
use crate::generator::EpisodeGenerator;
use crate::tone::Tone;
use crate::topic::TopicSelector;

pub struct Session {
    topics: TopicSelector,
    /// Newest first.
    generated: Vec<Episode>,
    liked: LikedEpisodes,
    catalog: Vec<Episode>,
    generator: EpisodeGenerator,
}

impl Session {
    pub fn new(catalog: Vec<Episode>, initial_topic: Option<String>) -> Self {
        Self::with_generator(catalog, initial_topic, EpisodeGenerator::default())
    }

    pub fn with_generator(
        catalog: Vec<Episode>,
        initial_topic: Option<String>,
        generator: EpisodeGenerator,
    ) -> Self {
        Self {
            topics: TopicSelector::new(initial_topic),
            generated: Vec::new(),
            liked: LikedEpisodes::new(),
            catalog,
            generator,
        }
    }

    // ── Topic selection ─────────────────────────────────────────────────────

    pub fn selected_topic(&self) -> Option<&str> {
        self.topics.selected()
    }

    pub fn set_selected_topic(&mut self, topic: impl Into<String>) {
        let topic = topic.into();
        debug!("session: selected topic {:?}", topic);
        self.topics.select(topic);
    }

    pub fn clear_selected_topic(&mut self) {
        self.topics.clear_selection();
    }

    pub fn search_query(&self) -> &str {
        self.topics.query()
    }

    /// Only narrows the topic list; the feed ignores it.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.topics.set_query(query);
    }

    pub fn filtered_topics(&self) -> Vec<&'static str> {
        self.topics.visible()
    }

    // ── Generation ──────────────────────────────────────────────────────────

    /// Generate an episode and put it at the front of the generated list.
    pub fn generate(&mut self, topic: &str, tone: Tone, length: u32) -> Episode {
        let episode = self.generator.generate(topic, tone, length);
        info!("session: generated {} ({})", episode.id, episode.title);
        self.generated.insert(0, episode.clone());
        episode
    }

    pub fn generated(&self) -> &[Episode] {
        &self.generated
    }

    // ── Likes ───────────────────────────────────────────────────────────────

    /// Returns `false` when an episode with the same id was already liked.
    pub fn like(&mut self, episode: &Episode) -> bool {
        let added = self.liked.like(episode.clone());
        debug!("session: like {} added={}", episode.id, added);
        added
    }

    pub fn liked(&self) -> &LikedEpisodes {
        &self.liked
    }

    pub fn is_liked(&self, id: &EpisodeId) -> bool {
        self.liked.contains(id)
    }

    // ── Feed ────────────────────────────────────────────────────────────────

    pub fn catalog(&self) -> &[Episode] {
        &self.catalog
    }

    pub fn compose_feed(&self) -> Vec<Episode> {
        feed::compose(self.selected_topic(), &self.generated, &self.catalog)
    }

    pub fn feed_heading(&self) -> String {
        feed::heading(self.selected_topic())
    }

    /// Look an episode up by id among generated and catalog entries.
    pub fn find(&self, id: &EpisodeId) -> Option<&Episode> {
        self.generated
            .iter()
            .chain(self.catalog.iter())
            .find(|e| &e.id == id)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            catalog::builtin(),
            Some(crate::topic::DEFAULT_TOPIC.to_string()),
        )
    }
}
