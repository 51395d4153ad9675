use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::canned::{INFERENCE_FAILURE_REPLY, UNAVAILABLE_REPLY};
use super::fallback::FallbackSelector;
use super::guard::{ConsistencyGuard, Verdict};
use super::sanitizer::sanitize;
use crate::config::ResponderConfig;
use crate::emotion::{classify_or_neutral, Classification, EmotionClassifier, EmotionLabel, KeywordClassifier};
use crate::error::ModelError;
use crate::memory::{ConversationTurn, HistoryStore, SessionId};
use crate::prompt::build_prompt;
use crate::services::emotion::HttpEmotionClassifier;
use crate::services::llm::{LLMService, ResponseGenerator};
use crate::telemetry::{FailureKind, OutcomeKind, ResponderStats, TelemetryEvent, TelemetryRecorder};

/// Process-wide model handles. Built once at startup and shared read-only.
/// `None` means the model failed to initialize.
#[derive(Clone, Default)]
pub struct ModelHandles {
    pub classifier: Option<Arc<dyn EmotionClassifier>>,
    pub generator: Option<Arc<dyn ResponseGenerator>>,
}

impl ModelHandles {
    pub fn new(classifier: Arc<dyn EmotionClassifier>, generator: Arc<dyn ResponseGenerator>) -> Self {
        Self {
            classifier: Some(classifier),
            generator: Some(generator),
        }
    }

    /// Both models missing; every reply degrades.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Builds the configured clients and checks the generation server once.
    /// A failed check leaves the generator unloaded for the life of the process.
    pub async fn load(config: &ResponderConfig) -> Self {
        let classifier: Arc<dyn EmotionClassifier> = match &config.classifier.url {
            Some(url) => {
                info!("Using remote emotion classifier at {}", url);
                Arc::new(HttpEmotionClassifier::new(url.clone(), config.classifier.timeout_secs))
            }
            None => {
                info!("No classifier URL configured, using keyword classifier");
                Arc::new(KeywordClassifier::new())
            }
        };

        let service = LLMService::new(&config.generator, config.generation.clone());
        let generator: Option<Arc<dyn ResponseGenerator>> = match service.health().await {
            Ok(()) => {
                info!("Generation model ready at {}", config.generator.base_url);
                Some(Arc::new(service) as Arc<dyn ResponseGenerator>)
            }
            Err(e) => {
                warn!("Generation model unavailable: {}", e);
                None
            }
        };

        Self {
            classifier: Some(classifier),
            generator,
        }
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegradedReason {
    ModelUnavailable,
    InferenceFailed(String),
}

/// How the final reply was arrived at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyOutcome {
    /// Model output passed every check.
    Generated,
    /// Consistency guard substituted the canned reply.
    Guarded,
    /// Length policy substituted the canned reply.
    Fallback,
    /// No model output; fixed degraded message.
    Degraded(DegradedReason),
}

impl ReplyOutcome {
    fn kind(&self) -> OutcomeKind {
        match self {
            ReplyOutcome::Generated => OutcomeKind::Generated,
            ReplyOutcome::Guarded => OutcomeKind::Guarded,
            ReplyOutcome::Fallback => OutcomeKind::Fallback,
            ReplyOutcome::Degraded(_) => OutcomeKind::Degraded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub emotion: EmotionLabel,
    pub reply: String,
    pub outcome: ReplyOutcome,
    /// True when `emotion` is the neutral stand-in for a failed classification.
    pub emotion_degraded: bool,
}

/// Wire shape returned to chat clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub emotion: EmotionLabel,
    pub response: String,
}

impl From<&ChatReply> for ChatResponse {
    fn from(reply: &ChatReply) -> Self {
        Self {
            emotion: reply.emotion,
            response: reply.reply.clone(),
        }
    }
}

/// Emotion-aware reply pipeline.
///
/// utterance -> classify -> prompt (last turns) -> generate -> sanitize -> guard -> fallback -> history
pub struct Responder {
    models: ModelHandles,
    history: Arc<dyn HistoryStore>,
    fallback: FallbackSelector,
    telemetry: Mutex<TelemetryRecorder>,
}

impl Responder {
    pub fn new(models: ModelHandles, history: Arc<dyn HistoryStore>, config: &ResponderConfig) -> Self {
        Self {
            models,
            history,
            fallback: FallbackSelector::new(&config.fallback),
            telemetry: Mutex::new(TelemetryRecorder::new()),
        }
    }

    /// Never fails. Precondition: `utterance` passed `validate_utterance`.
    pub async fn respond(&self, utterance: &str, session: &SessionId) -> ChatReply {
        let started = Instant::now();

        let classification = self.classify_emotion(utterance).await;
        let emotion = classification.label;
        let emotion_degraded = classification.degraded.is_some();

        let window = self.history.get_history(session);
        let (reply, outcome) = match self.generate_reply(emotion, utterance, &window).await {
            Ok(candidate) => self.finalize(emotion, &candidate),
            Err(reason) => {
                let text = match reason {
                    DegradedReason::ModelUnavailable => UNAVAILABLE_REPLY,
                    DegradedReason::InferenceFailed(_) => INFERENCE_FAILURE_REPLY,
                };
                (text.to_string(), ReplyOutcome::Degraded(reason))
            }
        };

        // Degraded messages are not conversation and stay out of the prompt window
        if !matches!(outcome, ReplyOutcome::Degraded(_)) {
            self.history
                .append_turn(session, ConversationTurn::new(utterance, reply.clone()));
        }

        let latency_ms = started.elapsed().as_millis() as u64;
        self.record(TelemetryEvent::ReplyEmitted {
            outcome: outcome.kind(),
            latency_ms,
        });
        info!("Reply ready: emotion={} outcome={:?} latency={}ms", emotion, outcome.kind(), latency_ms);

        ChatReply {
            emotion,
            reply,
            outcome,
            emotion_degraded,
        }
    }

    /// Classifier entry point with neutral degradation.
    pub async fn classify_emotion(&self, utterance: &str) -> Classification {
        let classification = classify_or_neutral(self.models.classifier.as_deref(), utterance).await;
        self.record(TelemetryEvent::Classified {
            emotion: classification.label,
            degraded: classification.degraded.is_some(),
        });
        classification
    }

    /// Generator entry point: prompt construction plus one model call. No retries.
    pub async fn generate_reply(
        &self,
        emotion: EmotionLabel,
        utterance: &str,
        history: &[ConversationTurn],
    ) -> Result<String, DegradedReason> {
        let Some(generator) = self.models.generator.as_deref() else {
            self.record(TelemetryEvent::GenerationFailed {
                kind: FailureKind::ModelUnavailable,
            });
            return Err(DegradedReason::ModelUnavailable);
        };

        let prompt = build_prompt(emotion, utterance, history);
        debug!("Prompt built: {} chars, {} history turns", prompt.len(), history.len().min(2));

        match generator.generate(&prompt).await {
            Ok(raw) => Ok(raw),
            Err(ModelError::Unavailable) => {
                self.record(TelemetryEvent::GenerationFailed {
                    kind: FailureKind::ModelUnavailable,
                });
                Err(DegradedReason::ModelUnavailable)
            }
            Err(e) => {
                warn!("Generation failed: {}", e);
                self.record(TelemetryEvent::GenerationFailed {
                    kind: FailureKind::Inference,
                });
                Err(DegradedReason::InferenceFailed(e.to_string()))
            }
        }
    }

    /// sanitize -> guard -> fallback
    fn finalize(&self, emotion: EmotionLabel, candidate: &str) -> (String, ReplyOutcome) {
        let cleaned = sanitize(candidate);

        if let Verdict::Reject(reason) = ConsistencyGuard::review(emotion, &cleaned) {
            debug!("Guard rejected candidate for {}: {:?}", emotion, reason);
            self.record(TelemetryEvent::GuardRejected { emotion, reason });
            return (ConsistencyGuard::guard(emotion, &cleaned), ReplyOutcome::Guarded);
        }

        if let Some(trigger) = self.fallback.check(&cleaned) {
            debug!("Fallback for {}: {:?}", emotion, trigger);
            self.record(TelemetryEvent::FallbackApplied { emotion, trigger });
            return (self.fallback.fallback_if_needed(emotion, &cleaned), ReplyOutcome::Fallback);
        }

        (cleaned, ReplyOutcome::Generated)
    }

    pub fn stats(&self) -> ResponderStats {
        self.telemetry
            .lock()
            .map(|t| t.snapshot())
            .unwrap_or_else(|p| p.into_inner().snapshot())
    }

    fn record(&self, event: TelemetryEvent) {
        let mut recorder = self.telemetry.lock().unwrap_or_else(|p| p.into_inner());
        recorder.record(event);
    }
}
