use crate::engine::Engine;
use crate::error::ValidationError;
use crate::room::JoinedOutcome;
use pairwire_core::{IceCandidate, RawDescription, SdpType, SessionDescription, SignalMessage};
use tracing::{debug, info, warn};

impl Engine {
    pub(super) async fn handle_signal(&mut self, msg: SignalMessage) {
        match msg {
            SignalMessage::RoomCreated { room_id } => match self.rooms.on_room_created(&room_id) {
                Ok(room) => {
                    info!("Room created: {}", room);
                    self.deps
                        .status
                        .info(format!("Room {room} created. Waiting for participant..."));
                    // The creator answers on this session, so tracks go on now.
                    if let Err(e) = self.create_session().await {
                        self.deps
                            .status
                            .error(format!("Error preparing connection: {e}"));
                    }
                }
                Err(e) => warn!("Ignoring room_created: {}", e),
            },

            SignalMessage::RoomJoined { room_id } => match self.rooms.on_room_joined(&room_id) {
                Ok(JoinedOutcome::Joined(room)) => {
                    info!("Room joined: {}", room);
                    self.deps.status.info(format!("Joined room {room}."));
                }
                Ok(JoinedOutcome::PeerArrived(room)) => {
                    info!("Participant joined room {}", room);
                    self.deps
                        .status
                        .info(format!("Participant joined room {room}."));
                }
                Err(e) => warn!("Ignoring room_joined: {}", e),
            },

            SignalMessage::StartCall => self.start_call().await,

            SignalMessage::Offer { room_id, offer } => {
                self.handle_remote_offer(room_id, offer).await
            }

            SignalMessage::Answer { room_id, answer } => {
                self.handle_remote_answer(room_id, answer).await
            }

            SignalMessage::IceCandidate { room_id, candidate } => {
                self.handle_remote_candidate(room_id, candidate).await
            }

            SignalMessage::Error { msg } => self.deps.status.error(msg),

            other @ (SignalMessage::Create { .. }
            | SignalMessage::Join { .. }
            | SignalMessage::Leave { .. }) => {
                warn!("Unexpected client-only event from server: {}", other.event_name());
            }
        }
    }

    /// Adds a remote candidate now if the connection can take it, otherwise
    /// queues it until the connection reaches `stable`.
    ///
    /// While the queue is non-empty new arrivals go behind it, which keeps
    /// candidates applied in the order they were received.
    async fn handle_remote_candidate(&mut self, room_id: String, candidate: Option<IceCandidate>) {
        let Some(candidate) = candidate else {
            warn!("Invalid ICE candidate received: {}", ValidationError::MissingCandidate);
            return;
        };

        if !self.is_for_current_room(&room_id) {
            return;
        }

        let Some(session) = self.session.as_ref() else {
            debug!("Queuing ICE candidate (no connection yet)");
            self.queue.enqueue(candidate);
            return;
        };

        if self.queue.is_empty() && session.connection.has_remote_description().await {
            debug!("Adding ICE candidate");
            if let Err(e) = session.connection.add_ice_candidate(candidate).await {
                warn!("Error adding ICE candidate: {}", e);
            }
        } else {
            debug!("Queuing ICE candidate");
            self.queue.enqueue(candidate);
        }
    }
}

/// Checks a received description before it may touch any connection.
pub(crate) fn validate_description(
    raw: Option<RawDescription>,
    expected: SdpType,
) -> Result<SessionDescription, ValidationError> {
    let raw = raw.ok_or(ValidationError::MissingDescription)?;

    let sdp_type = match raw.sdp_type.as_deref() {
        None | Some("") => return Err(ValidationError::MissingDescriptionType),
        Some(kind) => SdpType::parse(kind)
            .ok_or_else(|| ValidationError::UnknownDescriptionType(kind.to_owned()))?,
    };

    if sdp_type != expected {
        return Err(ValidationError::UnexpectedDescriptionType {
            expected: expected.as_str(),
            actual: sdp_type.as_str(),
        });
    }

    Ok(SessionDescription {
        sdp_type,
        payload: raw.payload,
    })
}
