use serde::{Deserialize, Serialize};

use crate::emotion::EmotionLabel;
use crate::pipeline::{FallbackTrigger, RejectReason};

// Allowed: labels, reasons, counts, durations
// Forbidden: utterance text, reply text, history

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    Classified {
        emotion: EmotionLabel,
        degraded: bool,
    },

    GenerationFailed {
        kind: FailureKind,
    },

    GuardRejected {
        emotion: EmotionLabel,
        reason: RejectReason,
    },

    FallbackApplied {
        emotion: EmotionLabel,
        trigger: FallbackTrigger,
    },

    ReplyEmitted {
        outcome: OutcomeKind,
        latency_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    ModelUnavailable,
    Inference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    Generated,
    Guarded,
    Fallback,
    Degraded,
}
