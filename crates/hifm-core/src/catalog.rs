//! Static episode catalog.
//!
//! The built-in catalog ships with the binary.  A TOML file with
//! `[[episode]]` tables can replace it (see `CatalogConfig::path`).

use std::path::Path;

use serde::Deserialize;

use crate::episode::{Episode, EpisodeId};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate episode id {0:?} in catalog")]
    DuplicateId(String),
}

/// The four seed episodes.
pub fn builtin() -> Vec<Episode> {
    vec![
        seed(
            "e1",
            "The Bus Driver's Piano",
            "Everyday Heroes",
            "A public bus driver turns late-night routes into a moving piano bar, \
             stitching a neighborhood together one song at a time.",
            9,
        ),
        seed(
            "e2",
            "When the Bakery Lights Stayed On",
            "Community & Belonging",
            "During a winter blackout, a small bakery becomes a beacon of warmth \
             where strangers become neighbors.",
            7,
        ),
        seed(
            "e3",
            "Letters to My Future Self",
            "Life Transitions",
            "A class assignment asks teenagers to write to their future selves—ten \
             years later, the letters arrive.",
            12,
        ),
        seed(
            "e4",
            "The Bridge Between Accents",
            "Culture & Identity",
            "An interpreter navigates the spaces between languages and discovers \
             the words they were searching for.",
            11,
        ),
    ]
}

fn seed(id: &str, title: &str, topic: &str, description: &str, length: u32) -> Episode {
    Episode {
        id: EpisodeId::new(id),
        title: title.to_string(),
        topic: Some(topic.to_string()),
        tone: None,
        length,
        description: description.to_string(),
        created_at: None,
    }
}

#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    episode: Vec<TomlEpisode>,
}

#[derive(Debug, Deserialize)]
struct TomlEpisode {
    id: String,
    title: String,
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    description: String,
    length: u32,
}

pub fn load_catalog_from_toml(path: &Path) -> Result<Vec<Episode>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_catalog_from_toml_str(&content)
}

/// Ids must be unique: the feed and the liked set key on them.
pub fn parse_catalog_from_toml_str(content: &str) -> Result<Vec<Episode>, CatalogError> {
    let file: TomlCatalogFile = toml::from_str(content)?;
    let mut episodes: Vec<Episode> = Vec::with_capacity(file.episode.len());
    for e in file.episode {
        if episodes.iter().any(|x| x.id.as_str() == e.id) {
            return Err(CatalogError::DuplicateId(e.id));
        }
        episodes.push(Episode {
            id: EpisodeId::new(e.id),
            title: e.title,
            topic: e.topic.filter(|t| !t.is_empty()),
            tone: None,
            length: e.length,
            description: e.description,
            created_at: None,
        });
    }
    Ok(episodes)
}
