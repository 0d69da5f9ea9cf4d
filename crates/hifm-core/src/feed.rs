//! Feed composition and the liked set.

use crate::episode::{Episode, EpisodeId};

/// Off-topic catalog entries shown after the on-topic ones.
pub const OFF_TOPIC_LIMIT: usize = 2;

/// Ordered feed: generated episodes (newest first), then the catalog view for
/// `selected_topic`.
///
/// With a topic, the catalog view is every entry whose topic equals it
/// exactly, followed by the first [`OFF_TOPIC_LIMIT`] entries that don't.
/// Without one (or with an empty one) it is the whole catalog.  Generated
/// episodes are never deduplicated against the catalog.
pub fn compose(
    selected_topic: Option<&str>,
    generated: &[Episode],
    catalog: &[Episode],
) -> Vec<Episode> {
    let mut feed = Vec::with_capacity(generated.len() + catalog.len());
    feed.extend(generated.iter().cloned());

    match selected_topic.filter(|t| !t.is_empty()) {
        None => feed.extend(catalog.iter().cloned()),
        Some(topic) => {
            let (matching, non_matching): (Vec<&Episode>, Vec<&Episode>) = catalog
                .iter()
                .partition(|e| e.topic.as_deref() == Some(topic));
            feed.extend(matching.into_iter().cloned());
            feed.extend(non_matching.into_iter().take(OFF_TOPIC_LIMIT).cloned());
        }
    }
    feed
}

/// Subtitle shown above the feed.
pub fn heading(selected_topic: Option<&str>) -> String {
    match selected_topic.filter(|t| !t.is_empty()) {
        Some(t) => format!("Focusing on {}", t.to_lowercase()),
        None => "A mix of human-interest stories".to_string(),
    }
}

/// Liked episodes, newest first, unique by id.
#[derive(Debug, Clone, Default)]
pub struct LikedEpisodes {
    items: Vec<Episode>,
}

impl LikedEpisodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `episode` unless one with the same id is already liked.
    /// Returns whether the set changed.
    pub fn like(&mut self, episode: Episode) -> bool {
        if self.contains(&episode.id) {
            return false;
        }
        self.items.insert(0, episode);
        true
    }

    pub fn contains(&self, id: &EpisodeId) -> bool {
        self.items.iter().any(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Episode> {
        self.items.iter()
    }

    /// "You liked 2 episodes — saved for later listening."  `None` when empty.
    pub fn summary(&self) -> Option<String> {
        match self.items.len() {
            0 => None,
            n => Some(format!(
                "You liked {} episode{} — saved for later listening.",
                n,
                if n > 1 { "s" } else { "" }
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::tone::Tone;

    fn ep(id: &str, topic: Option<&str>) -> Episode {
        Episode {
            id: EpisodeId::new(id),
            title: format!("title {id}"),
            topic: topic.map(str::to_string),
            tone: None,
            length: 5,
            description: String::new(),
            created_at: None,
        }
    }

    fn ids(feed: &[Episode]) -> Vec<&str> {
        feed.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn selected_topic_puts_matches_first() {
        let feed = compose(Some("Everyday Heroes"), &[], &catalog::builtin());
        assert_eq!(feed[0].title, "The Bus Driver's Piano");
        assert_eq!(ids(&feed), vec!["e1", "e2", "e3"]);
    }

    #[test]
    fn matching_entry_later_in_catalog_jumps_ahead() {
        let feed = compose(Some("Culture & Identity"), &[], &catalog::builtin());
        assert_eq!(ids(&feed), vec!["e4", "e1", "e2"]);
    }

    #[test]
    fn no_topic_returns_whole_catalog_after_generated() {
        let g1 = ep("g1", Some("Everyday Heroes"));
        let feed = compose(None, std::slice::from_ref(&g1), &catalog::builtin());
        assert_eq!(ids(&feed), vec!["g1", "e1", "e2", "e3", "e4"]);

        let feed = compose(Some(""), &[], &catalog::builtin());
        assert_eq!(ids(&feed), vec!["e1", "e2", "e3", "e4"]);
    }

    #[test]
    fn unknown_topic_only_shows_filler() {
        let feed = compose(Some("Space Travel"), &[], &catalog::builtin());
        assert_eq!(ids(&feed), vec!["e1", "e2"]);
    }

    #[test]
    fn topic_match_is_case_sensitive() {
        let feed = compose(Some("everyday heroes"), &[], &catalog::builtin());
        assert_eq!(ids(&feed), vec!["e1", "e2"]);
    }

    #[test]
    fn all_matches_kept_and_untagged_entries_count_as_filler() {
        let cat = vec![
            ep("a", None),
            ep("b", Some("Work & Purpose")),
            ep("c", Some("Other")),
            ep("d", Some("Work & Purpose")),
            ep("e", Some("Other")),
            ep("f", Some("Work & Purpose")),
        ];
        let feed = compose(Some("Work & Purpose"), &[], &cat);
        assert_eq!(ids(&feed), vec!["b", "d", "f", "a", "c"]);
    }

    #[test]
    fn generated_same_topic_is_not_deduplicated() {
        let g = ep("g1", Some("Everyday Heroes"));
        let feed = compose(Some("Everyday Heroes"), &[g], &catalog::builtin());
        assert_eq!(ids(&feed), vec!["g1", "e1", "e2", "e3"]);
    }

    #[test]
    fn compose_is_idempotent() {
        let generated = vec![ep("g2", None), ep("g1", None)];
        let cat = catalog::builtin();
        let a = compose(Some("Life Transitions"), &generated, &cat);
        let b = compose(Some("Life Transitions"), &generated, &cat);
        assert_eq!(a, b);
        assert_eq!(ids(&a), vec!["g2", "g1", "e3", "e1", "e2"]);
    }

    #[test]
    fn heading_text() {
        assert_eq!(heading(Some("Work & Purpose")), "Focusing on work & purpose");
        assert_eq!(heading(None), "A mix of human-interest stories");
        assert_eq!(heading(Some("")), "A mix of human-interest stories");
    }

    #[test]
    fn like_dedups_by_id_and_prepends() {
        let mut liked = LikedEpisodes::new();
        assert!(liked.like(ep("e1", None)));
        assert_eq!(liked.len(), 1);
        assert!(!liked.like(ep("e1", Some("changed fields"))));
        assert_eq!(liked.len(), 1);
        assert_eq!(liked.iter().next().and_then(|e| e.topic.clone()), None);

        assert!(liked.like(ep("e2", None)));
        assert!(!liked.like(ep("e1", None)));
        let order: Vec<&str> = liked.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, vec!["e2", "e1"]);
    }

    #[test]
    fn like_uses_id_only() {
        let mut liked = LikedEpisodes::new();
        let mut a = ep("same", None);
        a.tone = Some(Tone::Warm);
        let b = ep("same", Some("Different"));
        liked.like(a);
        assert!(liked.contains(&b.id));
        assert!(!liked.like(b));
    }

    #[test]
    fn liked_summary_pluralises() {
        let mut liked = LikedEpisodes::new();
        assert_eq!(liked.summary(), None);
        liked.like(ep("a", None));
        assert_eq!(
            liked.summary().as_deref(),
            Some("You liked 1 episode — saved for later listening.")
        );
        liked.like(ep("b", None));
        assert_eq!(
            liked.summary().as_deref(),
            Some("You liked 2 episodes — saved for later listening.")
        );
    }
}
