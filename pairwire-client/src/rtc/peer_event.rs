use crate::rtc::{IceConnectionState, SignalingState};
use pairwire_core::IceCandidate;
use std::sync::Arc;
use tokio::sync::mpsc;
use webrtc::track::track_remote::TrackRemote;

/// Remote media stream handed to the render target.
#[derive(Clone)]
pub struct RemoteStream {
    pub stream_id: String,
    pub track_id: String,
    /// `None` for runtimes that do not expose webrtc-rs tracks.
    pub track: Option<Arc<TrackRemote>>,
}

impl std::fmt::Debug for RemoteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStream")
            .field("stream_id", &self.stream_id)
            .field("track_id", &self.track_id)
            .finish()
    }
}

/// Something the connection object observed.
#[derive(Debug, Clone)]
pub enum PeerEventKind {
    /// Local candidate discovered. `None` marks the end of gathering.
    IceCandidate(Option<IceCandidate>),

    /// Remote media arrived.
    Track(RemoteStream),

    IceConnectionState(IceConnectionState),

    SignalingState(SignalingState),
}

/// Event tagged with the generation of the session that produced it.
#[derive(Debug, Clone)]
pub struct PeerEvent {
    pub generation: u64,
    pub kind: PeerEventKind,
}

/// Handle the connection callbacks use to report into the engine loop.
///
/// Unbounded so a callback fired from inside `set_*_description` can never
/// block on the loop that is awaiting that very call.
#[derive(Clone)]
pub struct PeerEventSink {
    generation: u64,
    tx: mpsc::UnboundedSender<PeerEvent>,
}

impl PeerEventSink {
    pub fn new(generation: u64, tx: mpsc::UnboundedSender<PeerEvent>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `false` once the engine has stopped listening.
    pub fn emit(&self, kind: PeerEventKind) -> bool {
        self.tx
            .send(PeerEvent {
                generation: self.generation,
                kind,
            })
            .is_ok()
    }
}
