//! Topic catalog and selector.
//!
//! The set of topics is fixed at compile time.  Searching never mutates it; it
//! only narrows which labels are offered for selection.

/// Canonical topic labels, in display order.
pub const TOPICS: [&str; 8] = [
    "Everyday Heroes",
    "Life Transitions",
    "Overcoming Odds",
    "Community & Belonging",
    "Love & Relationships",
    "Work & Purpose",
    "Culture & Identity",
    "Wellbeing & Resilience",
];

/// Topic selected when nothing else has been chosen.
pub const DEFAULT_TOPIC: &str = "Everyday Heroes";

/// Topics whose label contains `query` (case-insensitive), in canonical order.
/// An empty query matches every topic.
pub fn filter_topics(query: &str) -> Vec<&'static str> {
    let needle = query.to_lowercase();
    TOPICS
        .iter()
        .copied()
        .filter(|t| t.to_lowercase().contains(&needle))
        .collect()
}

/// True if `label` is one of the canonical topics (exact match).
pub fn is_canonical(label: &str) -> bool {
    TOPICS.contains(&label)
}

/// Selection + search state for the topic picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSelector {
    selected: Option<String>,
    query: String,
}

impl TopicSelector {
    pub fn new(selected: Option<String>) -> Self {
        Self {
            selected,
            query: String::new(),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Replace the current selection.  Free-form labels are accepted; the
    /// picker itself only ever offers canonical ones.
    pub fn select(&mut self, topic: impl Into<String>) {
        self.selected = Some(topic.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Topics matching the current query.
    pub fn visible(&self) -> Vec<&'static str> {
        filter_topics(&self.query)
    }
}

impl Default for TopicSelector {
    fn default() -> Self {
        Self::new(Some(DEFAULT_TOPIC.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_matches_all_in_order() {
        assert_eq!(filter_topics(""), TOPICS.to_vec());
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        assert_eq!(
            filter_topics("LIFE"),
            vec!["Life Transitions"]
        );
        assert_eq!(
            filter_topics("&"),
            vec![
                "Community & Belonging",
                "Love & Relationships",
                "Work & Purpose",
                "Culture & Identity",
                "Wellbeing & Resilience",
            ]
        );
        assert!(filter_topics("podcast").is_empty());
    }

    #[test]
    fn every_query_yields_exact_matching_subset() {
        for q in ["e", "o", "re", " ", "ing", "Heroes", "x"] {
            let expected: Vec<&str> = TOPICS
                .iter()
                .copied()
                .filter(|t| t.to_lowercase().contains(&q.to_lowercase()))
                .collect();
            assert_eq!(filter_topics(q), expected, "query {q:?}");
        }
    }

    #[test]
    fn selector_defaults_and_selection() {
        let mut sel = TopicSelector::default();
        assert_eq!(sel.selected(), Some(DEFAULT_TOPIC));

        sel.set_query("work");
        assert_eq!(sel.visible(), vec!["Work & Purpose"]);
        // Searching never changes the selection.
        assert_eq!(sel.selected(), Some(DEFAULT_TOPIC));

        sel.select("Work & Purpose");
        assert_eq!(sel.selected(), Some("Work & Purpose"));

        sel.clear_selection();
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn canonical_check() {
        assert!(is_canonical("Overcoming Odds"));
        assert!(!is_canonical("overcoming odds"));
    }
}
