use crate::config::ClientConfig;
use crate::error::Result;
use crate::media::{LocalTrack, MediaSource, RenderTarget};
use crate::room::{Role, RoomCoordinator};
use crate::rtc::{PeerConnectionFactory, PeerEvent, SignalingState};
use crate::status::Status;
use crate::transport::{SignalingTransport, TransportEvent};
use pairwire_core::{RoomId, SignalMessage};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

mod candidate_queue;
mod create_pc_impl;
mod handle_peer_event_impl;
mod handle_remote_answer_impl;
mod handle_remote_offer_impl;
mod handle_signal_impl;
mod init_connection_impl;
mod peer_session;

pub use candidate_queue::CandidateQueue;
pub(crate) use handle_signal_impl::validate_description;
use peer_session::PeerSession;

/// Progress of the current call attempt, layered over the signaling state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationPhase {
    Uninitialized,
    AwaitingRemoteDescription,
    Negotiating,
    Connected,
    Closed,
}

/// Point-in-time view of the engine, for callers and tests.
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    pub role: Role,
    pub room_id: Option<RoomId>,
    pub phase: NegotiationPhase,
    pub generation: Option<u64>,
    pub signaling_state: Option<SignalingState>,
    pub queued_candidates: usize,
    pub remote_attached: bool,
}

/// Requests from the [`crate::Client`] handle.
pub(crate) enum EngineCommand {
    Create {
        room_id: String,
        reply: oneshot::Sender<Result<()>>,
    },
    Join {
        room_id: String,
        reply: oneshot::Sender<Result<()>>,
    },
    Leave {
        reply: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<EngineSnapshot>,
    },
}

/// Collaborators the engine drives.
pub(crate) struct EngineDeps {
    pub transport: Arc<dyn SignalingTransport>,
    pub rtc: Arc<dyn PeerConnectionFactory>,
    pub media: Arc<dyn MediaSource>,
    pub render: Arc<dyn RenderTarget>,
    pub status: Status,
}

/// The negotiation state machine.
///
/// Owns room bookkeeping, the candidate queue and at most one peer session.
/// Commands, transport events and connection events are consumed by one
/// task, one at a time, so each handler sees and leaves consistent state.
pub(crate) struct Engine {
    config: ClientConfig,
    rooms: RoomCoordinator,
    queue: CandidateQueue,
    session: Option<PeerSession>,
    next_generation: u64,
    phase: NegotiationPhase,
    local_tracks: Vec<LocalTrack>,
    deps: EngineDeps,
    command_rx: mpsc::Receiver<EngineCommand>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    peer_tx: mpsc::UnboundedSender<PeerEvent>,
    peer_rx: mpsc::UnboundedReceiver<PeerEvent>,
}

impl Engine {
    pub(crate) fn new(
        config: ClientConfig,
        deps: EngineDeps,
        command_rx: mpsc::Receiver<EngineCommand>,
        transport_rx: mpsc::Receiver<TransportEvent>,
    ) -> Self {
        let (peer_tx, peer_rx) = mpsc::unbounded_channel();

        Self {
            config,
            rooms: RoomCoordinator::new(),
            queue: CandidateQueue::new(),
            session: None,
            next_generation: 0,
            phase: NegotiationPhase::Uninitialized,
            local_tracks: Vec::new(),
            deps,
            command_rx,
            transport_rx,
            peer_tx,
            peer_rx,
        }
    }

    pub(crate) async fn run(mut self) {
        info!("Negotiation loop started");

        self.capture_local_media().await;

        let mut transport_open = true;
        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("Command channel closed. Shutting down client.");
                            break;
                        }
                    }
                }

                evt = self.transport_rx.recv(), if transport_open => {
                    match evt {
                        Some(e) => self.handle_transport_event(e).await,
                        None => {
                            warn!("Transport channel closed");
                            transport_open = false;
                        }
                    }
                }

                Some(evt) = self.peer_rx.recv() => {
                    self.handle_peer_event(evt).await;
                }
            }
        }

        self.discard_session("client shutdown").await;
        self.deps.transport.close().await;
        info!("Negotiation loop finished");
    }

    async fn capture_local_media(&mut self) {
        match self.deps.media.capture().await {
            Ok(tracks) => {
                info!("Captured {} local tracks", tracks.len());
                self.local_tracks = tracks;
                self.deps.status.info("Local media started.");
            }
            Err(e) => {
                self.deps
                    .status
                    .error(format!("Failed to access camera/microphone: {e}"));
            }
        }
    }

    async fn handle_command(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::Create { room_id, reply } => {
                let request = self.rooms.request_create(&room_id);
                let result = self.send_room_request(request).await;
                let _ = reply.send(result);
            }

            EngineCommand::Join { room_id, reply } => {
                let request = self.rooms.request_join(&room_id);
                let result = self.send_room_request(request).await;
                let _ = reply.send(result);
            }

            EngineCommand::Leave { reply } => {
                if let Some(room) = self.rooms.room_id().cloned() {
                    let msg = SignalMessage::Leave {
                        room_id: room.as_str().to_owned(),
                    };
                    if let Err(e) = self.deps.transport.send(msg).await {
                        warn!("Failed to tell server about leaving room {}: {}", room, e);
                    }
                    self.deps.status.info(format!("Left room {room}."));
                }
                self.reset_room("left room").await;
                let _ = reply.send(());
            }

            EngineCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
        }
    }

    async fn send_room_request(
        &mut self,
        request: Result<crate::room::RoomRequest>,
    ) -> Result<()> {
        let request = match request {
            Ok(r) => r,
            Err(e) => {
                self.deps.status.warn("Please enter a room ID.");
                return Err(e);
            }
        };

        if request.switches_room {
            self.discard_session("room changed").await;
            self.queue.clear();
        }

        if let Err(e) = self.deps.transport.send(request.message).await {
            self.deps.status.error(format!("Failed to reach server: {e}"));
            return Err(e);
        }
        Ok(())
    }

    async fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected => info!("Connected to signaling server"),

            TransportEvent::Message(msg) => self.handle_signal(msg).await,

            TransportEvent::Disconnected => {
                self.deps.status.error("Disconnected from server.");
                self.reset_room("signaling disconnected").await;
            }
        }
    }

    async fn reset_room(&mut self, reason: &str) {
        self.discard_session(reason).await;
        self.queue.clear();
        self.rooms.reset();
        self.phase = NegotiationPhase::Uninitialized;
    }

    fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            role: self.rooms.role(),
            room_id: self.rooms.room_id().cloned(),
            phase: self.phase,
            generation: self.session.as_ref().map(|s| s.generation),
            signaling_state: self
                .session
                .as_ref()
                .map(|s| s.connection.signaling_state()),
            queued_candidates: self.queue.len(),
            remote_attached: self.session.as_ref().is_some_and(|s| s.remote_attached),
        }
    }

    /// Room tag for outbound peer messages.
    fn outbound_room(&self) -> String {
        self.session
            .as_ref()
            .and_then(|s| s.room.as_ref())
            .or(self.rooms.room_id())
            .map(|room| room.as_str().to_owned())
            .unwrap_or_default()
    }

    /// Peer messages tagged for another room are dropped; untagged ones pass.
    /// Outside any room every peer message is dropped.
    fn is_for_current_room(&self, room_id: &str) -> bool {
        match self.rooms.room_id() {
            Some(current) if !room_id.is_empty() && current.as_str() != room_id => {
                warn!(
                    "Dropping message for room '{}' while in room '{}'",
                    room_id, current
                );
                false
            }
            Some(_) => true,
            None => {
                warn!("Dropping message for room '{}' while not in a room", room_id);
                false
            }
        }
    }
}
