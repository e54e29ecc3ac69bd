use crate::rtc::PeerConnection;
use pairwire_core::RoomId;

/// One call attempt and the connection object it exclusively owns.
pub(super) struct PeerSession {
    /// Tag carried by every event this session's connection emits.
    pub generation: u64,
    pub room: Option<RoomId>,
    pub connection: Box<dyn PeerConnection>,
    /// Set once the render target has been given a remote stream.
    pub remote_attached: bool,
}

impl PeerSession {
    pub fn new(generation: u64, room: Option<RoomId>, connection: Box<dyn PeerConnection>) -> Self {
        Self {
            generation,
            room,
            connection,
            remote_attached: false,
        }
    }
}
