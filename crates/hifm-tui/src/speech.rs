//! Speech process driver — narrates text by spawning a TTS program.
//!
//! One child process per utterance.  A watcher task waits on the child and
//! reports `Finished`/`Failed` on the narrator's channel; cancelling drops the
//! watcher's cancel handle, which kills the child.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use hifm_core::config::SpeechConfig;
use hifm_core::narration::{NarrationEvent, SpeechBackend, UtteranceId};
use hifm_core::platform;

/// espeak's defaults; `rate`/`pitch` scale around these.
const BASE_WPM: f32 = 175.0;
const BASE_PITCH: f32 = 50.0;
const BASE_AMPLITUDE: f32 = 100.0;

/// Command-line dialect of the detected program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechProgram {
    /// espeak / espeak-ng
    Espeak,
    /// speech-dispatcher client
    SpdSay,
    /// macOS `say`
    Say,
}

impl SpeechProgram {
    /// Guess the dialect from the executable name.
    pub fn detect(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if stem == "say" {
            Self::Say
        } else if stem.starts_with("spd-say") {
            Self::SpdSay
        } else {
            Self::Espeak
        }
    }

    pub fn args(self, voice: &Voice, text: &str) -> Vec<String> {
        match self {
            Self::Espeak => vec![
                "-s".into(),
                ((BASE_WPM * voice.rate).round() as i64).max(80).to_string(),
                "-p".into(),
                ((BASE_PITCH * voice.pitch).round() as i64).clamp(0, 99).to_string(),
                "-a".into(),
                ((BASE_AMPLITUDE * voice.volume).round() as i64).clamp(0, 200).to_string(),
                text.to_string(),
            ],
            Self::SpdSay => vec![
                "-w".into(),
                "-r".into(),
                relative_percent(voice.rate).to_string(),
                "-p".into(),
                relative_percent(voice.pitch).to_string(),
                "-i".into(),
                (((voice.volume * 2.0 - 1.0) * 100.0).round() as i64)
                    .clamp(-100, 100)
                    .to_string(),
                text.to_string(),
            ],
            Self::Say => vec![
                "-r".into(),
                ((BASE_WPM * voice.rate).round() as i64).max(80).to_string(),
                text.to_string(),
            ],
        }
    }
}

/// 1.0 → 0, 1.5 → 50, clamped to spd-say's -100..=100.
fn relative_percent(factor: f32) -> i64 {
    (((factor - 1.0) * 100.0).round() as i64).clamp(-100, 100)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl From<&SpeechConfig> for Voice {
    fn from(c: &SpeechConfig) -> Self {
        Self {
            rate: c.rate,
            pitch: c.pitch,
            volume: c.volume.clamp(0.0, 1.0),
        }
    }
}

/// [`SpeechBackend`] backed by an external TTS program.
pub struct ProcessSpeech {
    binary: PathBuf,
    program: SpeechProgram,
    voice: Voice,
    /// Dropping this kills the in-flight child.
    in_flight: Option<oneshot::Sender<()>>,
}

impl ProcessSpeech {
    pub fn new(binary: PathBuf, voice: Voice) -> Self {
        let program = SpeechProgram::detect(&binary);
        Self {
            binary,
            program,
            voice,
            in_flight: None,
        }
    }

    /// Build a backend from config, or `None` when speech is disabled or no
    /// program can be found.
    pub fn from_config(config: &SpeechConfig) -> Option<Self> {
        if !config.enabled {
            info!("speech: disabled in config");
            return None;
        }
        let binary = match &config.program {
            Some(p) if p.exists() => Some(p.clone()),
            Some(p) => {
                warn!("speech: configured program {:?} not found", p);
                None
            }
            None => platform::find_speech_binary(),
        };
        match binary {
            Some(b) => {
                info!("speech: using {:?}", b);
                Some(Self::new(b, Voice::from(config)))
            }
            None => {
                info!("speech: no speech program found, narration unavailable");
                None
            }
        }
    }

    fn stderr_sink() -> Stdio {
        let path = platform::data_dir().join("speech-stderr.log");
        match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
            Ok(f) => Stdio::from(f),
            Err(_) => Stdio::null(),
        }
    }

    /// speech-dispatcher keeps talking after its client dies; tell it to stop.
    /// Waits for the stop request so it cannot race a following utterance.
    fn silence_dispatcher(&self) {
        if self.program != SpeechProgram::SpdSay {
            return;
        }
        if let Err(e) = std::process::Command::new(&self.binary)
            .arg("-C")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            warn!("speech: spd-say -C failed: {}", e);
        }
    }
}

impl SpeechBackend for ProcessSpeech {
    fn speak(
        &mut self,
        utterance: UtteranceId,
        text: &str,
        done: mpsc::Sender<NarrationEvent>,
    ) -> anyhow::Result<()> {
        self.cancel();

        let mut child = tokio::process::Command::new(&self.binary)
            .args(self.program.args(&self.voice, text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Self::stderr_sink())
            .kill_on_drop(true)
            .spawn()?;
        debug!("speech: utterance {} pid {:?}", utterance, child.id());

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        self.in_flight = Some(cancel_tx);

        tokio::spawn(async move {
            let exited = tokio::select! {
                status = child.wait() => Some(status),
                _ = cancel_rx => None,
            };
            let event = match exited {
                Some(Ok(s)) if s.success() => NarrationEvent::Finished(utterance),
                Some(Ok(s)) => NarrationEvent::Failed {
                    utterance,
                    reason: format!("speech program exited with {}", s),
                },
                Some(Err(e)) => NarrationEvent::Failed {
                    utterance,
                    reason: e.to_string(),
                },
                None => {
                    let _ = child.kill().await;
                    debug!("speech: utterance {} killed", utterance);
                    return;
                }
            };
            let _ = done.send(event).await;
        });
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(tx) = self.in_flight.take() {
            // Err means the watcher already saw the child exit.
            if tx.send(()).is_ok() {
                self.silence_dispatcher();
            }
        }
    }
}

impl Drop for ProcessSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}
