//! Template-based micro-episode generator.
//!
//! The description is a pure function of `(topic, tone, length)`.  Only the
//! id and `created_at` depend on the clock and the RNG.

use chrono::{DateTime, Local};
use rand::Rng;

use crate::episode::{Episode, EpisodeId};
use crate::tone::Tone;
use crate::topic::DEFAULT_TOPIC;

/// Source of "now" for timestamps and id salting.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Suggested bounds for `length`, in minutes.  Inputs outside are passed
/// through by the generator; only the UI form keeps values inside.
pub const MIN_LENGTH: u32 = 2;
pub const MAX_LENGTH: u32 = 20;
pub const DEFAULT_LENGTH: u32 = 5;

const ID_SUFFIX_LEN: usize = 6;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Narrative text for an episode.
pub fn describe(topic: &str, tone: Tone, length: u32) -> String {
    format!(
        "{} In {}, we meet someone ordinary doing something extraordinary. \
         Over the next {} minutes, follow their footsteps, hear the doubts, \
         and feel the shift when courage takes the mic.",
        tone.opener(),
        topic.to_lowercase(),
        length
    )
}

/// `"{topic}: {tone} short ({length} min)"`
pub fn title(topic: &str, tone: Tone, length: u32) -> String {
    format!("{}: {} short ({} min)", topic, tone.label(), length)
}

/// Fresh id: `g-<millis>-<random base36>`.  The random suffix keeps ids
/// distinct when two episodes are generated within the same millisecond.
pub fn mint_id(now: DateTime<Local>) -> EpisodeId {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    EpisodeId::new(format!("g-{}-{}", now.timestamp_millis(), suffix))
}

pub struct EpisodeGenerator {
    clock: Box<dyn Clock>,
}

impl EpisodeGenerator {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn generate(&self, topic: &str, tone: Tone, length: u32) -> Episode {
        let now = self.clock.now();
        Episode {
            id: mint_id(now),
            title: title(topic, tone, length),
            topic: Some(topic.to_string()),
            tone: Some(tone),
            length,
            description: describe(topic, tone, length),
            created_at: Some(now),
        }
    }
}

impl Default for EpisodeGenerator {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

/// The generator form's current values.  The preview shown next to the form
/// is always `describe` of these values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub topic: String,
    pub tone: Tone,
    pub length: u32,
}

impl Draft {
    pub fn new(default_topic: Option<&str>) -> Self {
        let topic = match default_topic {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => DEFAULT_TOPIC.to_string(),
        };
        Self {
            topic,
            tone: Tone::default(),
            length: DEFAULT_LENGTH,
        }
    }

    pub fn preview(&self) -> String {
        describe(&self.topic, self.tone, self.length)
    }

    /// Step the length within the suggested bounds.
    pub fn bump_length(&mut self, delta: i32) {
        let next = (self.length as i64 + delta as i64).clamp(MIN_LENGTH as i64, MAX_LENGTH as i64);
        self.length = next as u32;
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self::new(None)
    }
}
