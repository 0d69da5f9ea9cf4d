use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::platform;
use crate::catalog;
use crate::episode::Episode;
use crate::generator::DEFAULT_LENGTH;
use crate::tone::Tone;
use crate::topic::DEFAULT_TOPIC;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Starting values for the topic picker and the generator form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_topic")]
    pub default_topic: String,
    /// Kept as a string so an unknown tone doesn't make the whole file
    /// unreadable; see [`SessionConfig::tone`].
    #[serde(default = "default_tone")]
    pub default_tone: String,
    #[serde(default = "default_length")]
    pub default_length: u32,
}

/// Text-to-speech settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_enabled")]
    pub enabled: bool,
    /// Explicit speech program; searched on PATH when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<PathBuf>,
    /// Relative speaking rate (1.0 = program default).
    #[serde(default = "default_rate")]
    pub rate: f32,
    /// Relative pitch (1.0 = program default).
    #[serde(default = "default_pitch")]
    pub pitch: f32,
    /// 0.0–1.0
    #[serde(default = "default_volume")]
    pub volume: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// TOML catalog replacing the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_topic: default_topic(),
            default_tone: default_tone(),
            default_length: default_length(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_speech_enabled(),
            program: None,
            rate: default_rate(),
            pitch: default_pitch(),
            volume: default_volume(),
        }
    }
}

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

fn default_tone() -> String {
    Tone::Warm.label().to_string()
}

fn default_length() -> u32 {
    DEFAULT_LENGTH
}

fn default_speech_enabled() -> bool {
    true
}

fn default_rate() -> f32 {
    1.03
}

fn default_pitch() -> f32 {
    1.02
}

fn default_volume() -> f32 {
    1.0
}

impl SessionConfig {
    /// Configured tone, or Warm if the label is not one of the four tones.
    pub fn tone(&self) -> Tone {
        match self.default_tone.parse::<Tone>() {
            Ok(t) => t,
            Err(e) => {
                warn!("config: {}; falling back to {}", e, Tone::Warm);
                Tone::Warm
            }
        }
    }
}

impl CatalogConfig {
    /// Configured catalog, or the built-in one when unset or unreadable.
    pub fn load(&self) -> Vec<Episode> {
        let Some(path) = &self.path else {
            return catalog::builtin();
        };
        match catalog::load_catalog_from_toml(path) {
            Ok(episodes) => episodes,
            Err(e) => {
                warn!("config: {}; using built-in catalog", e);
                catalog::builtin()
            }
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Read `path`, writing defaults there first if it doesn't exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.session.default_topic, "Everyday Heroes");
        assert_eq!(config.session.tone(), Tone::Warm);
        assert_eq!(config.session.default_length, 5);
        assert!(config.speech.enabled);
        assert!((config.speech.rate - 1.03).abs() < f32::EPSILON);
        assert!((config.speech.pitch - 1.02).abs() < f32::EPSILON);
        assert!(config.catalog.path.is_none());
        assert!(Config::config_path().ends_with("hifm/config.toml"));
    }

    #[test]
    fn load_creates_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.session.default_topic, "Everyday Heroes");

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.session.default_tone, "Warm");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[session]\ndefault_tone = \"reflective\"\n\n[speech]\nenabled = false\n",
        )
        .unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.session.tone(), Tone::Reflective);
        assert_eq!(config.session.default_length, 5);
        assert!(!config.speech.enabled);
        assert!((config.speech.volume - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn unknown_tone_falls_back_to_warm() {
        let session = SessionConfig {
            default_tone: "Sarcastic".into(),
            ..Default::default()
        };
        assert_eq!(session.tone(), Tone::Warm);
    }

    #[test]
    fn bad_catalog_path_falls_back_to_builtin() {
        let catalog = CatalogConfig {
            path: Some(PathBuf::from("/nonexistent/hifm/catalog.toml")),
        };
        assert_eq!(catalog.load().len(), 4);
        assert_eq!(CatalogConfig::default().load()[0].id.as_str(), "e1");
    }
}
