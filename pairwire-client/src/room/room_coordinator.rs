use crate::error::{Result, ValidationError};
use pairwire_core::{RoomId, SignalMessage};
use tracing::{info, warn};

/// Which side of the room this client is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    None,
    Creator,
    Joiner,
}

/// A validated create/join request, ready to go on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomRequest {
    pub message: SignalMessage,
    /// The request targets a different room than the one currently tracked.
    pub switches_room: bool,
}

/// How a `room_joined` notification applies to this client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinedOutcome {
    /// This client is now the joiner of the room.
    Joined(RoomId),
    /// The other participant entered the room this client created.
    PeerArrived(RoomId),
}

/// Role and room bookkeeping. Pure state: the engine does all I/O.
#[derive(Debug, Default)]
pub struct RoomCoordinator {
    role: Role,
    /// Room confirmed by the server, or the last one requested before that.
    room: Option<RoomId>,
}

impl RoomCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room.as_ref()
    }

    pub fn request_create(&mut self, room_id: &str) -> Result<RoomRequest> {
        let room = Self::validate(room_id)?;
        info!("Creating room: {}", room);
        Ok(self.track_request(room, |room_id| SignalMessage::Create { room_id }))
    }

    pub fn request_join(&mut self, room_id: &str) -> Result<RoomRequest> {
        let room = Self::validate(room_id)?;
        info!("Joining room: {}", room);
        Ok(self.track_request(room, |room_id| SignalMessage::Join { room_id }))
    }

    pub fn on_room_created(&mut self, room_id: &str) -> Result<RoomId> {
        let room = Self::validate(room_id)?;
        self.role = Role::Creator;
        self.room = Some(room.clone());
        Ok(room)
    }

    pub fn on_room_joined(&mut self, room_id: &str) -> Result<JoinedOutcome> {
        let room = Self::validate(room_id)?;

        // The server announces `room_joined` to the whole room, creator included.
        if self.role == Role::Creator && self.room.as_ref() == Some(&room) {
            return Ok(JoinedOutcome::PeerArrived(room));
        }

        self.role = Role::Joiner;
        self.room = Some(room.clone());
        Ok(JoinedOutcome::Joined(room))
    }

    /// Whether a `start_call` should make this client place the offer.
    pub fn on_start_call(&self) -> bool {
        match self.role {
            Role::Joiner => true,
            other => {
                warn!("Ignoring start_call while role is {:?}", other);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.role = Role::None;
        self.room = None;
    }

    fn validate(room_id: &str) -> Result<RoomId> {
        Ok(RoomId::parse(room_id).ok_or(ValidationError::EmptyRoomId)?)
    }

    fn track_request(
        &mut self,
        room: RoomId,
        build: impl FnOnce(String) -> SignalMessage,
    ) -> RoomRequest {
        let switches_room = self.room.as_ref().is_some_and(|current| *current != room);
        if switches_room {
            self.role = Role::None;
        }
        let message = build(room.as_str().to_owned());
        self.room = Some(room);
        RoomRequest {
            message,
            switches_room,
        }
    }
}
