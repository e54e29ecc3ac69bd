use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use pairwire_core::{PeerId, RoomId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// A room never holds more than the two call participants.
pub const ROOM_CAPACITY: usize = 2;

/// Rejections sent back to the requesting peer as an `error` event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Room already exists")]
    AlreadyExists,
    #[error("Room does not exist")]
    NotFound,
    #[error("Room is full")]
    Full,
}

/// Registry of live rooms and which room each peer is in.
///
/// A peer is a member of at most one room; entering a new one leaves the
/// previous one. Rooms disappear with their last member.
#[derive(Clone, Default)]
pub struct RoomManager {
    rooms: Arc<DashMap<RoomId, Vec<PeerId>>>,
    memberships: Arc<DashMap<PeerId, RoomId>>,
}

impl RoomManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `room_id` with `peer_id` as its first member.
    pub fn create(&self, room_id: &RoomId, peer_id: PeerId) -> Result<(), RoomError> {
        match self.rooms.entry(room_id.clone()) {
            Entry::Occupied(_) => return Err(RoomError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(vec![peer_id]);
            }
        }

        info!("Room '{}' created by {}", room_id, peer_id);
        self.switch_membership(peer_id, room_id);
        Ok(())
    }

    /// Adds `peer_id` to an existing room and returns the members in
    /// arrival order.
    pub fn join(&self, room_id: &RoomId, peer_id: PeerId) -> Result<Vec<PeerId>, RoomError> {
        let members = {
            let mut members = self.rooms.get_mut(room_id).ok_or(RoomError::NotFound)?;
            if !members.contains(&peer_id) {
                if members.len() >= ROOM_CAPACITY {
                    return Err(RoomError::Full);
                }
                members.push(peer_id);
            }
            members.clone()
        };

        info!("{} joined room '{}' ({} members)", peer_id, room_id, members.len());
        self.switch_membership(peer_id, room_id);
        Ok(members)
    }

    pub fn members(&self, room_id: &RoomId) -> Vec<PeerId> {
        self.rooms
            .get(room_id)
            .map(|members| members.clone())
            .unwrap_or_default()
    }

    pub fn is_member(&self, room_id: &RoomId, peer_id: &PeerId) -> bool {
        self.memberships
            .get(peer_id)
            .is_some_and(|room| room.value() == room_id)
    }

    pub fn room_of(&self, peer_id: &PeerId) -> Option<RoomId> {
        self.memberships.get(peer_id).map(|room| room.clone())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Removes the peer from its room. Returns the room it left.
    pub fn leave(&self, peer_id: &PeerId) -> Option<RoomId> {
        let (_, room_id) = self.memberships.remove(peer_id)?;
        self.remove_from_room(&room_id, peer_id);
        Some(room_id)
    }

    fn switch_membership(&self, peer_id: PeerId, room_id: &RoomId) {
        let previous = self.memberships.insert(peer_id, room_id.clone());
        if let Some(previous) = previous.filter(|prev| prev != room_id) {
            debug!("{} moved from room '{}' to '{}'", peer_id, previous, room_id);
            self.remove_from_room(&previous, &peer_id);
        }
    }

    fn remove_from_room(&self, room_id: &RoomId, peer_id: &PeerId) {
        if let Some(mut members) = self.rooms.get_mut(room_id) {
            members.retain(|member| member != peer_id);
        }

        if self
            .rooms
            .remove_if(room_id, |_, members| members.is_empty())
            .is_some()
        {
            info!("Room '{}' closed", room_id);
        }
    }
}
