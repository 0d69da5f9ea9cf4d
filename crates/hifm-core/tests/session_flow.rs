use hifm_core::catalog::{self, parse_catalog_from_toml_str};
use hifm_core::generator::Draft;
use hifm_core::narration::{NarrationEvent, Narrator, PlayOutcome, SpeechBackend, UtteranceId};
use hifm_core::{Session, Tone};
use tokio::sync::mpsc;

/// Reports completion immediately after `speak`.
struct InstantBackend;

impl SpeechBackend for InstantBackend {
    fn speak(
        &mut self,
        utterance: UtteranceId,
        _text: &str,
        done: mpsc::Sender<NarrationEvent>,
    ) -> anyhow::Result<()> {
        done.try_send(NarrationEvent::Finished(utterance))?;
        Ok(())
    }

    fn cancel(&mut self) {}
}

#[test]
fn browse_generate_like_share() {
    let mut session = Session::default();

    session.set_search_query("tran");
    assert_eq!(session.filtered_topics(), vec!["Life Transitions"]);
    session.set_selected_topic("Life Transitions");

    let mut draft = Draft::new(session.selected_topic());
    draft.tone = Tone::Uplifting;
    draft.bump_length(3);
    let preview = draft.preview();

    let ep = session.generate(&draft.topic, draft.tone, draft.length);
    assert_eq!(ep.description, preview);
    assert_eq!(ep.title, "Life Transitions: Uplifting short (8 min)");

    let feed = session.compose_feed();
    let ids: Vec<&str> = feed.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec![ep.id.as_str(), "e3", "e1", "e2"]);

    assert!(session.like(&feed[1]));
    assert!(!session.like(&feed[1]));
    assert_eq!(
        session.liked().summary().as_deref(),
        Some("You liked 1 episode — saved for later listening.")
    );

    assert_eq!(
        feed[1].share_text(),
        "Letters to My Future Self — A class assignment asks teenagers to write \
         to their future selves—ten years later, the letters arrive."
    );
}

#[test]
fn external_catalog_drives_feed() {
    let toml = r#"
[[episode]]
id = "x1"
title = "Night Shift"
topic = "Work & Purpose"
description = "A nurse on the overnight ward."
length = 6

[[episode]]
id = "x2"
title = "Borrowed Words"
description = "Learning a grandmother's language."
length = 8
"#;
    let cat = parse_catalog_from_toml_str(toml).unwrap();
    let mut session = Session::new(cat, None);
    assert_eq!(session.compose_feed().len(), 2);

    session.set_selected_topic("Work & Purpose");
    let titles: Vec<String> = session
        .compose_feed()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Night Shift", "Borrowed Words"]);
    assert_ne!(catalog::builtin()[0].title, titles[0]);
}

#[tokio::test]
async fn narration_returns_to_idle_on_completion() {
    let session = Session::default();
    let ep = session.catalog()[0].clone();
    let (mut narrator, mut events) = Narrator::new(Some(Box::new(InstantBackend)));

    assert_eq!(narrator.play(ep.id.as_str(), &ep.description), PlayOutcome::Started);
    assert!(narrator.is_speaking(ep.id.as_str()));

    let ev = events.recv().await.unwrap();
    assert!(narrator.handle_event(ev));
    assert_eq!(narrator.speaking_key(), None);
}
