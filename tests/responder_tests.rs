mod common;

use attune::config::ResponderConfig;
use attune::emotion::{EmotionClassifier, EmotionLabel};
use attune::memory::{HistoryStore, InMemoryHistoryStore, SessionId};
use attune::pipeline::{canned_reply, word_count, INFERENCE_FAILURE_REPLY, UNAVAILABLE_REPLY};
use attune::services::llm::ResponseGenerator;
use attune::{DegradedReason, ModelHandles, ReplyOutcome, Responder};
use common::{FailingClassifier, FailingGenerator, FixedClassifier, ScriptedGenerator};
use std::sync::Arc;

fn responder_with(
    classifier: Arc<dyn EmotionClassifier>,
    generator: Arc<dyn ResponseGenerator>,
) -> (Responder, Arc<InMemoryHistoryStore>) {
    let store = Arc::new(InMemoryHistoryStore::new());
    let responder = Responder::new(
        ModelHandles::new(classifier, generator),
        store.clone(),
        &ResponderConfig::default(),
    );
    (responder, store)
}

#[tokio::test]
async fn test_joy_reply_contradicting_mood_is_guarded() {
    let (responder, _) = responder_with(
        Arc::new(FixedClassifier(EmotionLabel::Joy)),
        Arc::new(ScriptedGenerator::new("Honestly I'm sad about it")),
    );

    let reply = responder
        .respond("I feel really happy today", &SessionId::new("s1"))
        .await;

    assert_eq!(reply.emotion, EmotionLabel::Joy);
    assert_eq!(reply.reply, canned_reply(EmotionLabel::Joy));
    assert_eq!(reply.outcome, ReplyOutcome::Guarded);
    assert!(!reply.reply.contains("I'm sad"));
}

#[tokio::test]
async fn test_clean_reply_passes_through_and_is_remembered() {
    let generator = Arc::new(ScriptedGenerator::new("That sounds like a really interesting plan!!"));
    let (responder, store) = responder_with(Arc::new(FixedClassifier(EmotionLabel::Neutral)), generator);
    let session = SessionId::new("s1");

    let reply = responder.respond("I might go hiking on Sunday", &session).await;

    assert_eq!(reply.outcome, ReplyOutcome::Generated);
    assert_eq!(reply.reply, "That sounds like a really interesting plan.");
    assert!(!reply.emotion_degraded);

    let history = store.get_history(&session);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].user, "I might go hiking on Sunday");
    assert_eq!(history[0].bot, reply.reply);
}

#[tokio::test]
async fn test_empty_generation_falls_back() {
    let (responder, _) = responder_with(
        Arc::new(FixedClassifier(EmotionLabel::Anger)),
        Arc::new(ScriptedGenerator::new("")),
    );

    let reply = responder.respond("This is infuriating", &SessionId::new("s1")).await;
    assert_eq!(reply.reply, canned_reply(EmotionLabel::Anger));
    assert_eq!(reply.outcome, ReplyOutcome::Fallback);
}

#[tokio::test]
async fn test_prompt_replays_last_two_turns_only() {
    let generator = Arc::new(ScriptedGenerator::new("Tell me more about that, please."));
    let (responder, _) = responder_with(Arc::new(FixedClassifier(EmotionLabel::Neutral)), generator.clone());
    let session = SessionId::new("s1");

    for utterance in ["first message here", "second message here", "third message here", "fourth message"] {
        responder.respond(utterance, &session).await;
    }

    let prompt = generator.last_prompt().unwrap();
    assert!(!prompt.contains("first message here"));
    assert!(prompt.contains("User: second message here"));
    assert!(prompt.contains("User: third message here"));
    assert!(prompt.trim_end().ends_with("Bot:"));
}

#[tokio::test]
async fn test_sessions_do_not_share_history() {
    let generator = Arc::new(ScriptedGenerator::new("Tell me more about that, please."));
    let (responder, store) = responder_with(Arc::new(FixedClassifier(EmotionLabel::Neutral)), generator.clone());

    responder.respond("secret from alice", &SessionId::new("alice")).await;
    responder.respond("hello from bob", &SessionId::new("bob")).await;

    assert!(!generator.last_prompt().unwrap().contains("secret from alice"));
    assert_eq!(store.get_history(&SessionId::new("bob")).len(), 1);
}

#[tokio::test]
async fn test_reply_word_count_is_bounded_for_any_generation() {
    let raw_outputs = [
        "",
        "ok",
        "I'm sad",
        "Great great news!!!",
        "What a lovely day it is today",
        "That is so wonderful, I am happy for you and your family and friends and everyone else around",
        "I feel happy too",
        "Oh... really?!?",
    ];

    for emotion in EmotionLabel::ALL {
        for raw in raw_outputs {
            let (responder, _) = responder_with(
                Arc::new(FixedClassifier(emotion)),
                Arc::new(ScriptedGenerator::new(raw)),
            );
            let reply = responder.respond("some message", &SessionId::new("s")).await;

            assert_eq!(reply.emotion, emotion);
            let words = word_count(&reply.reply);
            assert!(
                (3..=15).contains(&words),
                "{} / {:?} produced {} words: {:?}",
                emotion,
                raw,
                words,
                reply.reply
            );
        }
    }
}

#[tokio::test]
async fn test_unavailable_model_always_returns_degraded_reply() {
    let store = Arc::new(InMemoryHistoryStore::new());
    let responder = Responder::new(ModelHandles::unavailable(), store.clone(), &ResponderConfig::default());
    let session = SessionId::new("s1");

    for utterance in ["hello", "I feel really happy today", "are you there?"] {
        let reply = responder.respond(utterance, &session).await;
        assert_eq!(reply.reply, UNAVAILABLE_REPLY);
        assert_eq!(reply.emotion, EmotionLabel::Neutral);
        assert!(reply.emotion_degraded);
        assert_eq!(reply.outcome, ReplyOutcome::Degraded(DegradedReason::ModelUnavailable));
    }

    // Degraded replies never enter the prompt window
    assert!(store.get_history(&session).is_empty());
}

#[tokio::test]
async fn test_inference_failure_is_single_shot_and_degraded() {
    let (responder, store) = responder_with(Arc::new(FixedClassifier(EmotionLabel::Fear)), Arc::new(FailingGenerator));
    let session = SessionId::new("s1");

    let reply = responder.respond("I'm scared", &session).await;

    assert_eq!(reply.emotion, EmotionLabel::Fear);
    assert_eq!(reply.reply, INFERENCE_FAILURE_REPLY);
    assert!(matches!(reply.outcome, ReplyOutcome::Degraded(DegradedReason::InferenceFailed(_))));
    assert!(store.get_history(&session).is_empty());

    let stats = responder.stats();
    assert_eq!(stats.failures.inference, 1);
    assert_eq!(stats.replies.degraded, 1);
}

#[tokio::test]
async fn test_classifier_failure_uses_neutral() {
    let (responder, _) = responder_with(
        Arc::new(FailingClassifier),
        Arc::new(ScriptedGenerator::new("Tell me more about that, please.")),
    );

    let reply = responder.respond("I feel really happy today", &SessionId::new("s1")).await;

    assert_eq!(reply.emotion, EmotionLabel::Neutral);
    assert!(reply.emotion_degraded);
    assert_eq!(reply.outcome, ReplyOutcome::Generated);
}

#[tokio::test]
async fn test_stats_track_outcomes() {
    let (responder, _) = responder_with(
        Arc::new(FixedClassifier(EmotionLabel::Sadness)),
        Arc::new(ScriptedGenerator::new("That is great!")),
    );
    let session = SessionId::new("s1");

    responder.respond("I lost my keys", &session).await;
    responder.respond("and my wallet", &session).await;

    let stats = responder.stats();
    assert_eq!(stats.replies.total, 2);
    assert_eq!(stats.replies.guarded, 2);
    assert_eq!(stats.emotions.get(&EmotionLabel::Sadness), Some(&2));
    assert_eq!(stats.guard_rejections.values().sum::<u64>(), 2);
}
