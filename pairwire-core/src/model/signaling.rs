use crate::utils::DEFAULT_STUN_ADDR;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

impl Default for IceServerConfig {
    fn default() -> Self {
        Self::stun(DEFAULT_STUN_ADDR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdpType {
    Offer,
    Answer,
}

impl SdpType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "offer" => Some(Self::Offer),
            "answer" => Some(Self::Answer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offer => "offer",
            Self::Answer => "answer",
        }
    }
}

impl fmt::Display for SdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A session description whose type is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescription {
    pub sdp_type: SdpType,
    pub payload: String,
}

impl SessionDescription {
    pub fn offer(payload: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Offer,
            payload: payload.into(),
        }
    }

    pub fn answer(payload: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Answer,
            payload: payload.into(),
        }
    }
}

/// Session description as it travels over the wire.
///
/// `type` is kept as a raw string so a peer that sends garbage can be told
/// apart from one that sent nothing; the client validates it before use.
/// Browsers name the blob `sdp`, which is accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawDescription {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub sdp_type: Option<String>,
    #[serde(alias = "sdp", default)]
    pub payload: String,
}

impl From<SessionDescription> for RawDescription {
    fn from(desc: SessionDescription) -> Self {
        Self {
            sdp_type: Some(desc.sdp_type.as_str().to_owned()),
            payload: desc.payload,
        }
    }
}

/// ICE candidate in the `RTCIceCandidateInit` JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_mid: Option<String>,
    #[serde(rename = "sdpMLineIndex", default, skip_serializing_if = "Option::is_none")]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_fragment: Option<String>,
}

impl IceCandidate {
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            sdp_mid: None,
            sdp_m_line_index: None,
            username_fragment: None,
        }
    }
}

/// Every event exchanged with the rendezvous server.
///
/// Encoded as `{"event": <name>, "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum SignalMessage {
    #[serde(rename = "create")]
    Create { room_id: String },

    #[serde(rename = "join")]
    Join { room_id: String },

    #[serde(rename = "leave")]
    Leave { room_id: String },

    #[serde(rename = "room_created")]
    RoomCreated { room_id: String },

    #[serde(rename = "room_joined")]
    RoomJoined { room_id: String },

    #[serde(rename = "start_call")]
    StartCall,

    #[serde(rename = "offer")]
    Offer {
        #[serde(default)]
        room_id: String,
        #[serde(default)]
        offer: Option<RawDescription>,
    },

    #[serde(rename = "answer")]
    Answer {
        #[serde(default)]
        room_id: String,
        #[serde(default)]
        answer: Option<RawDescription>,
    },

    #[serde(rename = "ice-candidate")]
    IceCandidate {
        #[serde(default)]
        room_id: String,
        #[serde(default)]
        candidate: Option<IceCandidate>,
    },

    #[serde(rename = "error")]
    Error { msg: String },
}

impl SignalMessage {
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Join { .. } => "join",
            Self::Leave { .. } => "leave",
            Self::RoomCreated { .. } => "room_created",
            Self::RoomJoined { .. } => "room_joined",
            Self::StartCall => "start_call",
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::IceCandidate { .. } => "ice-candidate",
            Self::Error { .. } => "error",
        }
    }

    /// Room a peer-to-peer message is addressed to, if it is one.
    pub fn relay_room(&self) -> Option<&str> {
        match self {
            Self::Offer { room_id, .. }
            | Self::Answer { room_id, .. }
            | Self::IceCandidate { room_id, .. } => Some(room_id),
            _ => None,
        }
    }
}
