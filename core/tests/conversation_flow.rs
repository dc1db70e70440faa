//! End-to-end chat flows through the Conductor
//!
//! These tests drive the conductor exactly the way a surface does: send
//! [`SurfaceEvent`]s, advance the virtual clock, poll timers, and read the
//! screen back. Nothing here sleeps.

use std::sync::Arc;
use std::time::Duration;

use parlor_core::{
    ChatState, ComposerKey, Conductor, ConductorConfig, Conversation, FixedSelector, Persona,
    PersonaRegistry, RandomSelector, ReplySelector, Route, Scheduler, Screen, Sender,
    SurfaceEvent, VirtualScheduler,
};

const REPLY_DELAY: Duration = Duration::from_millis(1500);
const SELECTION_DELAY: Duration = Duration::from_millis(200);

const LUNA_REPLIES: [&str; 4] = [
    "That's a fascinating perspective! Let me think about this creatively...",
    "I love how you're approaching this! Here's what I'm thinking...",
    "What an interesting question! From a creative standpoint...",
    "That resonates with me deeply. Let me share some thoughts...",
];

fn builtin_conductor() -> Conductor<VirtualScheduler, RandomSelector> {
    Conductor::new(
        Arc::new(PersonaRegistry::builtin()),
        ConductorConfig::default(),
        VirtualScheduler::new(),
        RandomSelector::seeded(7),
    )
}

fn chat<S, R>(conductor: &Conductor<S, R>) -> &Conversation
where
    S: Scheduler,
    R: ReplySelector,
{
    match conductor.screen() {
        Screen::Chat(conversation) => conversation,
        Screen::Selection(_) => panic!("expected chat screen, got {}", conductor.route()),
    }
}

fn submit<S, R>(conductor: &mut Conductor<S, R>, text: &str)
where
    S: Scheduler,
    R: ReplySelector,
{
    for c in text.chars() {
        conductor.handle_event(SurfaceEvent::Composer(ComposerKey::Char(c)));
    }
    conductor.handle_event(SurfaceEvent::Composer(ComposerKey::Enter { newline: false }));
}

// =============================================================================
// Opening a chat
// =============================================================================

#[test]
fn test_every_persona_opens_with_its_greeting() {
    let registry = PersonaRegistry::builtin();
    let mut conductor = builtin_conductor();

    for persona in registry.iter() {
        conductor.navigate(Route::Chat(persona.id.clone()));
        let messages = chat(&conductor).messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Persona);
        assert_eq!(messages[0].text, persona.greeting);
    }
}

#[test]
fn test_unknown_persona_never_opens_chat() {
    let mut conductor = builtin_conductor();
    for path in ["/chat/ghost", "/chat/Luna", "/chat/", "/nowhere"] {
        conductor.navigate_to_path(path);
        assert_eq!(conductor.route(), Route::Selection, "path {path}");
        assert!(matches!(conductor.screen(), Screen::Selection(_)));
    }
}

// =============================================================================
// Sending and replying
// =============================================================================

#[test]
fn test_luna_scenario() {
    let mut conductor = builtin_conductor();

    // Pick Luna from the first card
    conductor.handle_event(SurfaceEvent::SelectHighlighted);
    conductor.scheduler_mut().advance(SELECTION_DELAY);
    conductor.poll_timers();
    assert_eq!(conductor.route(), Route::Chat("luna".into()));
    assert!(chat(&conductor).messages()[0]
        .text
        .starts_with("Hi there! I'm Luna"));

    submit(&mut conductor, "Hello");
    {
        let conversation = chat(&conductor);
        let texts: Vec<&str> = conversation.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[1], "Hello");
        assert_eq!(conversation.messages()[1].sender, Sender::User);
        assert!(conversation.composer().is_disabled());
        assert_eq!(conversation.state(), ChatState::AwaitingReply);
    }

    conductor.scheduler_mut().advance(REPLY_DELAY);
    assert!(conductor.poll_timers());

    let conversation = chat(&conductor);
    let messages = conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].sender, Sender::Persona);
    assert!(LUNA_REPLIES.contains(&messages[2].text.as_str()));
    assert!(!conversation.composer().is_disabled());
}

#[test]
fn test_replies_always_come_from_the_pool() {
    let mut conductor = builtin_conductor();
    conductor.navigate(Route::Chat("luna".into()));

    for turn in 0..25 {
        submit(&mut conductor, &format!("message {turn}"));
        conductor.scheduler_mut().advance(REPLY_DELAY);
        conductor.poll_timers();
    }

    let messages = chat(&conductor).messages();
    assert_eq!(messages.len(), 1 + 25 * 2);
    for reply in messages.iter().skip(1).filter(|m| m.sender == Sender::Persona) {
        assert!(LUNA_REPLIES.contains(&reply.text.as_str()), "{}", reply.text);
    }
}

#[test]
fn test_whitespace_submission_changes_nothing() {
    let mut conductor = builtin_conductor();
    conductor.navigate(Route::Chat("alex".into()));
    let revision = chat(&conductor).revision();

    submit(&mut conductor, "   ");

    let conversation = chat(&conductor);
    assert_eq!(conversation.messages().len(), 1);
    assert_eq!(conversation.revision(), revision);
    assert!(!conversation.composer().is_disabled());
    assert_eq!(conductor.scheduler_mut().pending(), 0);
}

#[test]
fn test_one_reply_per_message() {
    let mut conductor = builtin_conductor();
    conductor.navigate(Route::Chat("alex".into()));

    submit(&mut conductor, "first");
    // Typing while awaiting is refused, and another Enter sends nothing
    submit(&mut conductor, "second");
    conductor.scheduler_mut().advance(REPLY_DELAY / 2);
    conductor.poll_timers();
    submit(&mut conductor, "third");

    let senders: Vec<Sender> = chat(&conductor).messages().iter().map(|m| m.sender).collect();
    assert_eq!(senders, vec![Sender::Persona, Sender::User]);

    conductor.scheduler_mut().advance(REPLY_DELAY);
    conductor.poll_timers();
    submit(&mut conductor, "fourth");

    let texts: Vec<String> = chat(&conductor)
        .messages()
        .iter()
        .map(|m| m.text.clone())
        .collect();
    assert_eq!(texts.len(), 4);
    assert_eq!(texts[1], "first");
    assert_eq!(texts[3], "fourth");
}

#[test]
fn test_multiline_message_is_kept_intact() {
    let mut conductor = builtin_conductor();
    conductor.navigate(Route::Chat("alex".into()));

    for c in "line one".chars() {
        conductor.handle_event(SurfaceEvent::Composer(ComposerKey::Char(c)));
    }
    conductor.handle_event(SurfaceEvent::Composer(ComposerKey::Enter { newline: true }));
    for c in "line two".chars() {
        conductor.handle_event(SurfaceEvent::Composer(ComposerKey::Char(c)));
    }
    conductor.handle_event(SurfaceEvent::Composer(ComposerKey::Enter { newline: false }));

    assert_eq!(chat(&conductor).messages()[1].text, "line one\nline two");
}

// =============================================================================
// Leaving a chat
// =============================================================================

#[test]
fn test_back_discards_session() {
    let mut conductor = builtin_conductor();
    conductor.navigate(Route::Chat("luna".into()));
    submit(&mut conductor, "Hello");
    conductor.scheduler_mut().advance(REPLY_DELAY);
    conductor.poll_timers();
    assert_eq!(chat(&conductor).messages().len(), 3);

    conductor.handle_event(SurfaceEvent::Back);
    assert_eq!(conductor.route(), Route::Selection);

    conductor.navigate(Route::Chat("luna".into()));
    let messages = chat(&conductor).messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].text.starts_with("Hi there! I'm Luna"));
}

#[test]
fn test_back_while_awaiting_drops_the_reply() {
    let mut conductor = builtin_conductor();
    conductor.navigate(Route::Chat("luna".into()));
    submit(&mut conductor, "Hello");

    conductor.handle_event(SurfaceEvent::Back);
    conductor.navigate(Route::Chat("luna".into()));

    // The old reply timer must not land in the new session
    conductor.scheduler_mut().advance(REPLY_DELAY * 2);
    assert!(!conductor.poll_timers());
    let conversation = chat(&conductor);
    assert_eq!(conversation.messages().len(), 1);
    assert!(!conversation.is_typing());
}

#[test]
fn test_deterministic_with_fixture_personas() {
    let registry = PersonaRegistry::new(
        vec![Persona::new("bot", "Bot")
            .with_greeting("beep")
            .with_replies(["zero", "one", "two"])],
        None,
    )
    .unwrap();
    let mut conductor = Conductor::new(
        Arc::new(registry),
        ConductorConfig {
            reply_delay: Duration::from_millis(10),
            selection_delay: Duration::ZERO,
        },
        VirtualScheduler::new(),
        FixedSelector(2),
    );

    conductor.handle_event(SurfaceEvent::SelectPersona {
        persona_id: "bot".into(),
    });
    conductor.poll_timers();
    assert_eq!(conductor.route(), Route::Chat("bot".into()));

    submit(&mut conductor, "ping");
    conductor.scheduler_mut().advance(Duration::from_millis(10));
    conductor.poll_timers();
    assert_eq!(chat(&conductor).messages()[2].text, "two");
}
