use crate::room::RoomManager;
use axum::extract::ws::Message;
use dashmap::DashMap;
use pairwire_core::{PeerId, RoomId, SignalMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

struct SignalingInner {
    peers: DashMap<PeerId, mpsc::UnboundedSender<Message>>,
}

/// Routes signaling events between the sockets of a room.
///
/// The server never looks inside descriptions or candidates; it only decides
/// who receives what.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    rooms: RoomManager,
}

impl SignalingService {
    pub fn new(rooms: RoomManager) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
            }),
            rooms,
        }
    }

    pub fn rooms(&self) -> &RoomManager {
        &self.rooms
    }

    pub fn peer_count(&self) -> usize {
        self.inner.peers.len()
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(peer_id, tx);
    }

    /// Forgets the socket and takes the peer out of its room.
    pub fn remove_peer(&self, peer_id: &PeerId) {
        self.inner.peers.remove(peer_id);
        if let Some(room_id) = self.rooms.leave(peer_id) {
            info!("{} left room '{}'", peer_id, room_id);
        }
    }

    pub fn send_signal(&self, peer_id: &PeerId, msg: &SignalMessage) {
        if let Some(peer) = self.inner.peers.get(peer_id) {
            match serde_json::to_string(msg) {
                Ok(json) => {
                    if let Err(e) = peer.send(Message::Text(json.into())) {
                        error!("Failed to send WS message to {}: {:?}", peer_id, e);
                    }
                }
                Err(e) => error!("Failed to serialize signal message: {}", e),
            }
        } else {
            warn!("Attempted to send signal to disconnected peer {}", peer_id);
        }
    }

    fn send_error(&self, peer_id: &PeerId, msg: impl Into<String>) {
        self.send_signal(peer_id, &SignalMessage::Error { msg: msg.into() });
    }

    /// Applies one event received from `peer_id`.
    pub fn handle_message(&self, peer_id: PeerId, msg: SignalMessage) {
        match msg {
            SignalMessage::Create { room_id } => self.on_create(peer_id, &room_id),

            SignalMessage::Join { room_id } => self.on_join(peer_id, &room_id),

            SignalMessage::Leave { room_id } => self.on_leave(peer_id, &room_id),

            relayed @ (SignalMessage::Offer { .. }
            | SignalMessage::Answer { .. }
            | SignalMessage::IceCandidate { .. }) => self.relay(peer_id, relayed),

            other => warn!(
                "Peer {} sent server-only event '{}'",
                peer_id,
                other.event_name()
            ),
        }
    }

    fn on_create(&self, peer_id: PeerId, raw_room: &str) {
        let Some(room_id) = RoomId::parse(raw_room) else {
            self.send_error(&peer_id, "Room id must not be empty");
            return;
        };

        match self.rooms.create(&room_id, peer_id) {
            Ok(()) => self.send_signal(
                &peer_id,
                &SignalMessage::RoomCreated {
                    room_id: room_id.to_string(),
                },
            ),
            Err(e) => {
                warn!("Create '{}' from {} rejected: {}", room_id, peer_id, e);
                self.send_error(&peer_id, e.to_string());
            }
        }
    }

    fn on_join(&self, peer_id: PeerId, raw_room: &str) {
        let Some(room_id) = RoomId::parse(raw_room) else {
            self.send_error(&peer_id, "Room id must not be empty");
            return;
        };

        let members = match self.rooms.join(&room_id, peer_id) {
            Ok(members) => members,
            Err(e) => {
                warn!("Join '{}' from {} rejected: {}", room_id, peer_id, e);
                self.send_error(&peer_id, e.to_string());
                return;
            }
        };

        let joined = SignalMessage::RoomJoined {
            room_id: room_id.to_string(),
        };
        for member in &members {
            self.send_signal(member, &joined);
        }

        // The second member places the offer.
        if let Some(joiner) = members.get(1) {
            debug!("Starting call in room '{}' with {}", room_id, joiner);
            self.send_signal(joiner, &SignalMessage::StartCall);
        }
    }

    /// Leaving needs no reply; a stale room id is ignored.
    fn on_leave(&self, peer_id: PeerId, raw_room: &str) {
        let current = self.rooms.room_of(&peer_id);
        match (current, RoomId::parse(raw_room)) {
            (Some(current), Some(room_id)) if current == room_id => {
                self.rooms.leave(&peer_id);
                debug!("{} left room '{}'", peer_id, room_id);
            }
            (current, _) => warn!(
                "Ignoring leave of '{}' from {} (member of {:?})",
                raw_room, peer_id, current
            ),
        }
    }

    fn relay(&self, sender: PeerId, msg: SignalMessage) {
        let Some(room_id) = msg.relay_room().and_then(RoomId::parse) else {
            warn!("Dropping '{}' from {} without room id", msg.event_name(), sender);
            return;
        };

        if !self.rooms.is_member(&room_id, &sender) {
            warn!(
                "Dropping '{}' from {}: not a member of room '{}'",
                msg.event_name(),
                sender,
                room_id
            );
            return;
        }

        for member in self.rooms.members(&room_id) {
            if member != sender {
                debug!("Relaying '{}' {} -> {}", msg.event_name(), sender, member);
                self.send_signal(&member, &msg);
            }
        }
    }
}
