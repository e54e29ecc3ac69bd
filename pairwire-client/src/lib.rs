//! Two-party call negotiation over a rendezvous signaling channel.
//!
//! A [`Client`] tracks which room it is in and whether it created or joined
//! it, owns at most one peer connection, exchanges the offer/answer pair and
//! relays ICE candidates, queueing remote ones that arrive before the
//! connection can take them.

mod client;
mod config;
mod engine;
mod error;
pub mod media;
pub mod room;
pub mod rtc;
mod status;
pub mod transport;

pub use client::{Client, ClientParts};
pub use config::ClientConfig;
pub use engine::{CandidateQueue, EngineSnapshot, NegotiationPhase};
pub use error::{ClientError, Result, ValidationError};
pub use status::Status;
