use crate::error::{ClientError, Result};
use crate::media::LocalTrack;
use crate::rtc::{
    IceConnectionState, PeerConnection, PeerConnectionFactory, PeerEventKind, PeerEventSink,
    RemoteStream, SignalingState,
};
use async_trait::async_trait;
use pairwire_core::{IceCandidate, IceServerConfig, SdpType, SessionDescription};
use std::sync::Arc;
use tracing::{debug, info};
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::api::{API, APIBuilder};
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_connection_state::RTCIceConnectionState;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::peer_connection::signaling_state::RTCSignalingState;
use webrtc::rtp_transceiver::RTCRtpTransceiver;
use webrtc::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use webrtc::track::track_remote::TrackRemote;

/// Builds webrtc-rs peer connections sharing one media engine setup.
pub struct WebRtcFactory {
    api: API,
}

impl WebRtcFactory {
    pub fn new() -> Result<Self> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()
            .map_err(|e| ClientError::negotiation("register codecs", e))?;
        let registry = register_default_interceptors(Registry::new(), &mut m)
            .map_err(|e| ClientError::negotiation("register interceptors", e))?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        Ok(Self { api })
    }
}

#[async_trait]
impl PeerConnectionFactory for WebRtcFactory {
    async fn create(
        &self,
        ice_servers: &[IceServerConfig],
        events: PeerEventSink,
    ) -> Result<Box<dyn PeerConnection>> {
        let rtc_config = RTCConfiguration {
            ice_servers: ice_servers
                .iter()
                .map(|server| RTCIceServer {
                    urls: server.urls.clone(),
                    username: server.username.clone().unwrap_or_default(),
                    credential: server.credential.clone().unwrap_or_default(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(
            self.api
                .new_peer_connection(rtc_config)
                .await
                .map_err(|e| ClientError::negotiation("create connection", e))?,
        );

        WebRtcConnection::wire_callbacks(&peer_connection, events);

        Ok(Box::new(WebRtcConnection { peer_connection }))
    }
}

pub struct WebRtcConnection {
    peer_connection: Arc<RTCPeerConnection>,
}

impl WebRtcConnection {
    fn wire_callbacks(peer_connection: &RTCPeerConnection, events: PeerEventSink) {
        let generation = events.generation();

        let ice_events = events.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            match c {
                Some(candidate) => match candidate.to_json() {
                    Ok(init) => {
                        ice_events.emit(PeerEventKind::IceCandidate(Some(from_rtc_candidate(init))));
                    }
                    Err(e) => debug!("Dropping unserializable local candidate: {}", e),
                },
                None => {
                    ice_events.emit(PeerEventKind::IceCandidate(None));
                }
            }
            Box::pin(async {})
        }));

        let track_events = events.clone();
        peer_connection.on_track(Box::new(
            move |track: Arc<TrackRemote>,
                  _receiver: Arc<RTCRtpReceiver>,
                  _transceiver: Arc<RTCRtpTransceiver>| {
                let stream = RemoteStream {
                    stream_id: track.stream_id(),
                    track_id: track.id(),
                    track: Some(track),
                };
                track_events.emit(PeerEventKind::Track(stream));
                Box::pin(async {})
            },
        ));

        let ice_state_events = events.clone();
        peer_connection.on_ice_connection_state_change(Box::new(
            move |s: RTCIceConnectionState| {
                info!("ICE connection state (session {}): {}", generation, s);
                ice_state_events.emit(PeerEventKind::IceConnectionState(s.into()));
                Box::pin(async {})
            },
        ));

        peer_connection.on_signaling_state_change(Box::new(move |s: RTCSignalingState| {
            debug!("Signaling state (session {}): {}", generation, s);
            events.emit(PeerEventKind::SignalingState(s.into()));
            Box::pin(async {})
        }));
    }
}

#[async_trait]
impl PeerConnection for WebRtcConnection {
    async fn add_track(&self, track: LocalTrack) -> Result<()> {
        self.peer_connection
            .add_track(track)
            .await
            .map_err(|e| ClientError::negotiation("add track", e))?;
        Ok(())
    }

    async fn create_offer(&self) -> Result<SessionDescription> {
        let offer = self
            .peer_connection
            .create_offer(None)
            .await
            .map_err(|e| ClientError::negotiation("create offer", e))?;
        Ok(SessionDescription::offer(offer.sdp))
    }

    async fn create_answer(&self) -> Result<SessionDescription> {
        let answer = self
            .peer_connection
            .create_answer(None)
            .await
            .map_err(|e| ClientError::negotiation("create answer", e))?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    async fn set_local_description(&self, desc: SessionDescription) -> Result<()> {
        let desc = to_rtc_description(desc)
            .map_err(|e| ClientError::negotiation("set local description", e))?;
        self.peer_connection
            .set_local_description(desc)
            .await
            .map_err(|e| ClientError::negotiation("set local description", e))
    }

    async fn set_remote_description(&self, desc: SessionDescription) -> Result<()> {
        let desc = to_rtc_description(desc)
            .map_err(|e| ClientError::negotiation("set remote description", e))?;
        self.peer_connection
            .set_remote_description(desc)
            .await
            .map_err(|e| ClientError::negotiation("set remote description", e))
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()> {
        self.peer_connection
            .add_ice_candidate(to_rtc_candidate(candidate))
            .await
            .map_err(|e| ClientError::negotiation("add ICE candidate", e))
    }

    fn signaling_state(&self) -> SignalingState {
        self.peer_connection.signaling_state().into()
    }

    async fn has_remote_description(&self) -> bool {
        self.peer_connection.remote_description().await.is_some()
    }

    async fn close(&self) -> Result<()> {
        self.peer_connection
            .close()
            .await
            .map_err(|e| ClientError::negotiation("close connection", e))
    }
}

fn to_rtc_description(desc: SessionDescription) -> webrtc::error::Result<RTCSessionDescription> {
    match desc.sdp_type {
        SdpType::Offer => RTCSessionDescription::offer(desc.payload),
        SdpType::Answer => RTCSessionDescription::answer(desc.payload),
    }
}

fn to_rtc_candidate(candidate: IceCandidate) -> RTCIceCandidateInit {
    RTCIceCandidateInit {
        candidate: candidate.candidate,
        sdp_mid: candidate.sdp_mid,
        sdp_mline_index: candidate.sdp_m_line_index,
        username_fragment: candidate.username_fragment,
    }
}

fn from_rtc_candidate(init: RTCIceCandidateInit) -> IceCandidate {
    IceCandidate {
        candidate: init.candidate,
        sdp_mid: init.sdp_mid,
        sdp_m_line_index: init.sdp_mline_index,
        username_fragment: init.username_fragment,
    }
}

impl From<RTCSignalingState> for SignalingState {
    fn from(state: RTCSignalingState) -> Self {
        match state {
            // webrtc-rs starts connections in Stable; Unspecified is only the enum default.
            RTCSignalingState::Unspecified | RTCSignalingState::Stable => Self::Stable,
            RTCSignalingState::HaveLocalOffer => Self::HaveLocalOffer,
            RTCSignalingState::HaveRemoteOffer => Self::HaveRemoteOffer,
            RTCSignalingState::HaveLocalPranswer => Self::HaveLocalPranswer,
            RTCSignalingState::HaveRemotePranswer => Self::HaveRemotePranswer,
            RTCSignalingState::Closed => Self::Closed,
        }
    }
}

impl From<RTCIceConnectionState> for IceConnectionState {
    fn from(state: RTCIceConnectionState) -> Self {
        match state {
            RTCIceConnectionState::Unspecified | RTCIceConnectionState::New => Self::New,
            RTCIceConnectionState::Checking => Self::Checking,
            RTCIceConnectionState::Connected => Self::Connected,
            RTCIceConnectionState::Completed => Self::Completed,
            RTCIceConnectionState::Disconnected => Self::Disconnected,
            RTCIceConnectionState::Failed => Self::Failed,
            RTCIceConnectionState::Closed => Self::Closed,
        }
    }
}
