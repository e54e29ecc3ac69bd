//! Seam between the negotiation engine and the real-time connection runtime.

mod connection_wrapper;
mod peer_event;

pub use connection_wrapper::{WebRtcConnection, WebRtcFactory};
pub use peer_event::{PeerEvent, PeerEventKind, PeerEventSink, RemoteStream};

use crate::error::Result;
use crate::media::LocalTrack;
use async_trait::async_trait;
use pairwire_core::{IceCandidate, IceServerConfig, SessionDescription};
use std::fmt;

/// Signaling state reported by the connection object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalingState {
    Stable,
    HaveLocalOffer,
    HaveRemoteOffer,
    HaveLocalPranswer,
    HaveRemotePranswer,
    Closed,
}

impl fmt::Display for SignalingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stable => "stable",
            Self::HaveLocalOffer => "have-local-offer",
            Self::HaveRemoteOffer => "have-remote-offer",
            Self::HaveLocalPranswer => "have-local-pranswer",
            Self::HaveRemotePranswer => "have-remote-pranswer",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IceConnectionState {
    New,
    Checking,
    Connected,
    Completed,
    Disconnected,
    Failed,
    Closed,
}

/// One connection object, exclusively owned by a peer session.
///
/// Implementations report asynchronous happenings (local candidates, remote
/// tracks, state changes) through the [`PeerEventSink`] they were created
/// with, never by calling back into the engine.
#[async_trait]
pub trait PeerConnection: Send + Sync {
    async fn add_track(&self, track: LocalTrack) -> Result<()>;

    async fn create_offer(&self) -> Result<SessionDescription>;

    async fn create_answer(&self) -> Result<SessionDescription>;

    async fn set_local_description(&self, desc: SessionDescription) -> Result<()>;

    async fn set_remote_description(&self, desc: SessionDescription) -> Result<()>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()>;

    fn signaling_state(&self) -> SignalingState;

    async fn has_remote_description(&self) -> bool;

    async fn close(&self) -> Result<()>;
}

/// Creates connection objects. Callbacks must be wired to `events` before
/// the connection is returned so that no early event is lost.
#[async_trait]
pub trait PeerConnectionFactory: Send + Sync + 'static {
    async fn create(
        &self,
        ice_servers: &[IceServerConfig],
        events: PeerEventSink,
    ) -> Result<Box<dyn PeerConnection>>;
}
