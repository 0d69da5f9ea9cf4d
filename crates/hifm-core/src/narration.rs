//! Narration session — at most one utterance at a time.
//!
//! ```text
//!   Idle ──play(k)──▶ Speaking(k)
//!   Speaking(k) ──play(k)──▶ Idle                      (toggle: cancel, no restart)
//!   Speaking(a) ──play(b)──▶ Speaking(b)               (cancel a, then start b)
//!   Speaking(k) ──stop / Finished(k's utterance)──▶ Idle
//! ```
//!
//! Completion arrives as a [`NarrationEvent`] on the channel returned by
//! [`Narrator::new`].  Every utterance carries its own [`UtteranceId`], so a
//! late `Finished` from a cancelled utterance is ignored instead of clearing
//! the state of the one that replaced it.
//!
//! When no backend is present every operation is a silent no-op.

use tokio::sync::mpsc;
use tracing::{debug, warn};

pub type UtteranceId = u64;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NarrationState {
    #[default]
    Idle,
    /// `key` identifies what is being narrated (an episode id, or the
    /// generator preview).
    Speaking { key: String, utterance: UtteranceId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationEvent {
    /// The backend finished speaking this utterance on its own.
    Finished(UtteranceId),
    /// The backend gave up on this utterance.
    Failed { utterance: UtteranceId, reason: String },
}

impl NarrationEvent {
    pub fn utterance(&self) -> UtteranceId {
        match self {
            Self::Finished(id) => *id,
            Self::Failed { utterance, .. } => *utterance,
        }
    }
}

/// Result of a [`Narrator::play`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    /// The same key was already speaking; it was cancelled.
    Stopped,
    /// No speech capability (absent, or the backend refused to start).
    Unavailable,
}

/// The host speech capability.
///
/// `speak` must return promptly; completion is reported later by sending
/// `NarrationEvent::Finished(utterance)` on `done`.  `cancel` stops whatever
/// is in flight and must be safe to call when nothing is.
pub trait SpeechBackend: Send {
    fn speak(
        &mut self,
        utterance: UtteranceId,
        text: &str,
        done: mpsc::Sender<NarrationEvent>,
    ) -> anyhow::Result<()>;

    fn cancel(&mut self);
}

pub struct Narrator {
    backend: Option<Box<dyn SpeechBackend>>,
    state: NarrationState,
    next_utterance: UtteranceId,
    events_tx: mpsc::Sender<NarrationEvent>,
}

impl Narrator {
    pub fn new(
        backend: Option<Box<dyn SpeechBackend>>,
    ) -> (Self, mpsc::Receiver<NarrationEvent>) {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let narrator = Self {
            backend,
            state: NarrationState::Idle,
            next_utterance: 1,
            events_tx,
        };
        (narrator, events_rx)
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn state(&self) -> &NarrationState {
        &self.state
    }

    pub fn speaking_key(&self) -> Option<&str> {
        match &self.state {
            NarrationState::Speaking { key, .. } => Some(key.as_str()),
            NarrationState::Idle => None,
        }
    }

    pub fn is_speaking(&self, key: &str) -> bool {
        self.speaking_key() == Some(key)
    }

    /// Toggle narration of `text` under `key`.
    pub fn play(&mut self, key: &str, text: &str) -> PlayOutcome {
        let Some(backend) = self.backend.as_mut() else {
            return PlayOutcome::Unavailable;
        };

        if let NarrationState::Speaking { key: current, .. } = &self.state {
            backend.cancel();
            if current == key {
                debug!("narration: toggled off {:?}", key);
                self.state = NarrationState::Idle;
                return PlayOutcome::Stopped;
            }
        }

        let utterance = self.next_utterance;
        self.next_utterance += 1;
        match backend.speak(utterance, text, self.events_tx.clone()) {
            Ok(()) => {
                debug!("narration: utterance {} started for {:?}", utterance, key);
                self.state = NarrationState::Speaking {
                    key: key.to_string(),
                    utterance,
                };
                PlayOutcome::Started
            }
            Err(e) => {
                warn!("narration: could not start speech: {}", e);
                self.state = NarrationState::Idle;
                PlayOutcome::Unavailable
            }
        }
    }

    /// Cancel any in-flight utterance.  Returns whether something was speaking.
    pub fn stop(&mut self) -> bool {
        let was_speaking = matches!(self.state, NarrationState::Speaking { .. });
        if let Some(backend) = self.backend.as_mut() {
            if was_speaking {
                backend.cancel();
            }
        }
        self.state = NarrationState::Idle;
        was_speaking
    }

    /// Apply a completion event.  Returns `true` if the state changed.
    pub fn handle_event(&mut self, event: NarrationEvent) -> bool {
        match &self.state {
            NarrationState::Speaking { utterance, .. } if *utterance == event.utterance() => {
                if let NarrationEvent::Failed { reason, .. } = &event {
                    warn!("narration: utterance {} failed: {}", utterance, reason);
                }
                self.state = NarrationState::Idle;
                true
            }
            _ => {
                debug!("narration: ignoring stale {:?}", event);
                false
            }
        }
    }
}

impl Drop for Narrator {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Speak(UtteranceId, String),
        Cancel,
    }

    #[derive(Clone, Default)]
    struct FakeBackend {
        calls: Arc<Mutex<Vec<Call>>>,
        done: Arc<Mutex<Option<mpsc::Sender<NarrationEvent>>>>,
        refuse: bool,
    }

    impl FakeBackend {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn finish(&self, utterance: UtteranceId) {
            let tx = self.done.lock().unwrap().clone().unwrap();
            tx.try_send(NarrationEvent::Finished(utterance)).unwrap();
        }
    }

    impl SpeechBackend for FakeBackend {
        fn speak(
            &mut self,
            utterance: UtteranceId,
            text: &str,
            done: mpsc::Sender<NarrationEvent>,
        ) -> anyhow::Result<()> {
            if self.refuse {
                anyhow::bail!("no audio device");
            }
            self.calls
                .lock()
                .unwrap()
                .push(Call::Speak(utterance, text.to_string()));
            *self.done.lock().unwrap() = Some(done);
            Ok(())
        }

        fn cancel(&mut self) {
            self.calls.lock().unwrap().push(Call::Cancel);
        }
    }

    fn narrator() -> (Narrator, mpsc::Receiver<NarrationEvent>, FakeBackend) {
        let fake = FakeBackend::default();
        let (n, rx) = Narrator::new(Some(Box::new(fake.clone())));
        (n, rx, fake)
    }

    #[test]
    fn absent_backend_is_silent_noop() {
        let (mut n, _rx) = Narrator::new(None);
        assert!(!n.is_available());
        assert_eq!(n.play("e1", "hello"), PlayOutcome::Unavailable);
        assert_eq!(n.state(), &NarrationState::Idle);
        assert!(!n.stop());
        assert!(!n.handle_event(NarrationEvent::Finished(1)));
    }

    #[test]
    fn play_then_toggle_same_key_cancels() {
        let (mut n, _rx, fake) = narrator();
        assert_eq!(n.play("e1", "one"), PlayOutcome::Started);
        assert!(n.is_speaking("e1"));
        assert_eq!(n.play("e1", "one"), PlayOutcome::Stopped);
        assert_eq!(n.state(), &NarrationState::Idle);
        assert_eq!(
            fake.calls(),
            vec![Call::Speak(1, "one".into()), Call::Cancel]
        );
    }

    #[test]
    fn switching_key_cancels_before_starting() {
        let (mut n, _rx, fake) = narrator();
        n.play("e1", "one");
        assert_eq!(n.play("e2", "two"), PlayOutcome::Started);
        assert!(n.is_speaking("e2"));
        assert_eq!(
            fake.calls(),
            vec![
                Call::Speak(1, "one".into()),
                Call::Cancel,
                Call::Speak(2, "two".into()),
            ]
        );
    }

    #[tokio::test]
    async fn finished_event_returns_to_idle() {
        let (mut n, mut rx, fake) = narrator();
        n.play("preview", "text");
        fake.finish(1);
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev, NarrationEvent::Finished(1));
        assert!(n.handle_event(ev));
        assert_eq!(n.speaking_key(), None);
    }

    #[test]
    fn stale_finish_does_not_clear_newer_utterance() {
        let (mut n, mut rx, fake) = narrator();
        n.play("e1", "one");
        n.play("e2", "two");
        fake.finish(1);
        let ev = rx.try_recv().unwrap();
        assert!(!n.handle_event(ev));
        assert!(n.is_speaking("e2"));

        assert!(n.handle_event(NarrationEvent::Failed {
            utterance: 2,
            reason: "exit status 1".into()
        }));
        assert_eq!(n.state(), &NarrationState::Idle);
    }

    #[test]
    fn stop_cancels_only_when_speaking() {
        let (mut n, _rx, fake) = narrator();
        assert!(!n.stop());
        assert!(fake.calls().is_empty());
        n.play("e1", "one");
        assert!(n.stop());
        assert_eq!(fake.calls().last(), Some(&Call::Cancel));
    }

    #[test]
    fn refused_start_stays_idle() {
        let fake = FakeBackend {
            refuse: true,
            ..Default::default()
        };
        let (mut n, _rx) = Narrator::new(Some(Box::new(fake)));
        assert_eq!(n.play("e1", "one"), PlayOutcome::Unavailable);
        assert_eq!(n.state(), &NarrationState::Idle);
    }

    #[test]
    fn drop_cancels_in_flight_utterance() {
        let (mut n, _rx, fake) = narrator();
        n.play("e1", "one");
        drop(n);
        assert_eq!(fake.calls().last(), Some(&Call::Cancel));
    }
}
