//! Error types for the signaling client

use crate::rtc::SignalingState;
use thiserror::Error;

/// Malformed input, rejected before any state is touched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Room identifier missing or blank
    #[error("room id must not be empty")]
    EmptyRoomId,

    /// Offer/answer event without a description
    #[error("missing session description")]
    MissingDescription,

    /// Description without a `type`
    #[error("session description has no type")]
    MissingDescriptionType,

    /// Description `type` that is neither offer nor answer
    #[error("unknown session description type '{0}'")]
    UnknownDescriptionType(String),

    /// An `offer` event carrying an answer, or the reverse
    #[error("expected {expected} description, got {actual}")]
    UnexpectedDescriptionType {
        expected: &'static str,
        actual: &'static str,
    },

    /// `ice-candidate` event with a null candidate
    #[error("missing ICE candidate")]
    MissingCandidate,
}

/// Errors that can occur while negotiating a call
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Signaling channel could not be opened or written to
    #[error("signaling transport error: {0}")]
    Transport(String),

    /// The real-time runtime refused a negotiation step
    #[error("{step} failed: {reason}")]
    Negotiation { step: &'static str, reason: String },

    /// A step was requested in a signaling state that does not allow it
    #[error("expected signaling state {expected}, found {actual}")]
    StateMismatch {
        expected: SignalingState,
        actual: SignalingState,
    },

    /// No connection object exists for a step that needs one
    #[error("no active peer session")]
    NoSession,

    /// Local media could not be captured
    #[error("media capture failed: {0}")]
    Capture(String),

    /// The client event loop is gone
    #[error("client is shut down")]
    Closed,
}

impl ClientError {
    pub fn negotiation(step: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Negotiation {
            step,
            reason: err.to_string(),
        }
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
