use crate::engine::{Engine, NegotiationPhase};
use crate::rtc::{IceConnectionState, PeerEvent, PeerEventKind, SignalingState};
use pairwire_core::SignalMessage;
use tracing::{debug, info, warn};

impl Engine {
    pub(super) async fn handle_peer_event(&mut self, event: PeerEvent) {
        let Some(session) = self.session.as_mut() else {
            debug!("Dropping event from closed session {}", event.generation);
            return;
        };
        if session.generation != event.generation {
            debug!(
                "Ignoring stale event from session {} (current {})",
                event.generation, session.generation
            );
            return;
        }

        match event.kind {
            PeerEventKind::IceCandidate(Some(candidate)) => {
                let room_id = session
                    .room
                    .as_ref()
                    .map(|room| room.as_str().to_owned())
                    .unwrap_or_default();
                debug!("Sending ICE candidate: {}", candidate.candidate);
                let msg = SignalMessage::IceCandidate {
                    room_id,
                    candidate: Some(candidate),
                };
                if let Err(e) = self.deps.transport.send(msg).await {
                    warn!("Failed to send ICE candidate: {}", e);
                }
            }

            PeerEventKind::IceCandidate(None) => debug!("ICE gathering complete"),

            PeerEventKind::Track(stream) => {
                if session.remote_attached {
                    debug!(
                        "Remote stream already attached, ignoring track {}",
                        stream.track_id
                    );
                    return;
                }
                info!("Received remote stream {}", stream.stream_id);
                session.remote_attached = true;
                self.deps.render.attach(stream);
            }

            PeerEventKind::IceConnectionState(state) => {
                info!("ICE connection state: {:?}", state);
                match state {
                    IceConnectionState::Connected => {
                        self.phase = NegotiationPhase::Connected;
                        self.deps.status.info("Call connected!");
                    }
                    IceConnectionState::Disconnected => {
                        self.deps.status.warn("Call interrupted.");
                    }
                    IceConnectionState::Failed => {
                        self.deps.status.error("Call failed.");
                    }
                    _ => {}
                }
            }

            PeerEventKind::SignalingState(state) => {
                debug!("Signaling state: {}", state);
                if state == SignalingState::Stable {
                    self.drain_candidates().await;
                }
            }
        }
    }

    /// The only place queued candidates are applied. Each failure is logged
    /// and the rest are still applied.
    async fn drain_candidates(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };

        let ready = session.connection.has_remote_description().await;
        let queued = self.queue.drain_if_ready(ready);
        if queued.is_empty() {
            return;
        }

        info!("Applying {} queued ICE candidates", queued.len());
        for candidate in queued {
            if let Err(e) = session.connection.add_ice_candidate(candidate).await {
                warn!("Error adding queued ICE candidate: {}", e);
            }
        }
    }
}
