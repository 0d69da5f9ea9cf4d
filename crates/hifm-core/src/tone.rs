use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Narrative tone of a generated episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Warm,
    Reflective,
    Uplifting,
    Investigative,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tone: {0:?} (expected Warm, Reflective, Uplifting or Investigative)")]
pub struct ToneError(pub String);

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Warm,
        Tone::Reflective,
        Tone::Uplifting,
        Tone::Investigative,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Warm => "Warm",
            Self::Reflective => "Reflective",
            Self::Uplifting => "Uplifting",
            Self::Investigative => "Investigative",
        }
    }

    /// Fixed opening sentence for this tone.
    pub fn opener(self) -> &'static str {
        match self {
            Self::Warm => "Let me tell you a small story that quietly changed a life.",
            Self::Reflective => "Sometimes the smallest choices echo the loudest.",
            Self::Uplifting => "Against the odds, hope found a way to speak up.",
            Self::Investigative => {
                "Beneath the surface of a familiar street lies a hidden thread."
            }
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Warm => Self::Reflective,
            Self::Reflective => Self::Uplifting,
            Self::Uplifting => Self::Investigative,
            Self::Investigative => Self::Warm,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Warm => Self::Investigative,
            Self::Reflective => Self::Warm,
            Self::Uplifting => Self::Reflective,
            Self::Investigative => Self::Uplifting,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = ToneError;

    /// Accepts the four labels, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Tone::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ToneError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_labels() {
        assert_eq!("Warm".parse::<Tone>(), Ok(Tone::Warm));
        assert_eq!(" investigative ".parse::<Tone>(), Ok(Tone::Investigative));
        assert_eq!("UPLIFTING".parse::<Tone>(), Ok(Tone::Uplifting));
    }

    #[test]
    fn parse_unknown_is_rejected() {
        let err = "Sarcastic".parse::<Tone>().unwrap_err();
        assert_eq!(err, ToneError("Sarcastic".to_string()));
        assert!(err.to_string().contains("Sarcastic"));
    }

    #[test]
    fn cycling_visits_every_tone() {
        let mut t = Tone::Warm;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(t);
            t = t.next();
        }
        assert_eq!(seen, Tone::ALL.to_vec());
        assert_eq!(t, Tone::Warm);
        assert_eq!(Tone::Warm.prev().next(), Tone::Warm);
    }
}
