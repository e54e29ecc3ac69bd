use crate::config::ClientConfig;
use crate::engine::{Engine, EngineCommand, EngineDeps, EngineSnapshot};
use crate::error::{ClientError, Result};
use crate::media::{MediaSource, RenderTarget};
use crate::rtc::{PeerConnectionFactory, WebRtcFactory};
use crate::status::Status;
use crate::transport::{SignalingTransport, TransportEvent, WsTransport};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::error;

/// Everything a client needs besides its configuration.
pub struct ClientParts {
    pub transport: Arc<dyn SignalingTransport>,
    pub transport_events: mpsc::Receiver<TransportEvent>,
    pub rtc: Arc<dyn PeerConnectionFactory>,
    pub media: Arc<dyn MediaSource>,
    pub render: Arc<dyn RenderTarget>,
}

/// Handle to a running negotiation engine.
///
/// Dropping every handle (or calling [`Client::shutdown`]) stops the engine
/// and closes any live connection.
pub struct Client {
    cmd_tx: mpsc::Sender<EngineCommand>,
    status: Status,
    task: JoinHandle<()>,
}

impl Client {
    /// Spawns the engine loop on the current tokio runtime.
    pub fn start(config: ClientConfig, parts: ClientParts) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let status = Status::new();

        let deps = EngineDeps {
            transport: parts.transport,
            rtc: parts.rtc,
            media: parts.media,
            render: parts.render,
            status: status.clone(),
        };
        let engine = Engine::new(config, deps, cmd_rx, parts.transport_events);
        let task = tokio::spawn(engine.run());

        Self {
            cmd_tx,
            status,
            task,
        }
    }

    /// Dials the configured signaling server over WebSocket and starts a
    /// client backed by webrtc-rs.
    pub async fn connect(
        config: ClientConfig,
        media: Arc<dyn MediaSource>,
        render: Arc<dyn RenderTarget>,
    ) -> Result<Self> {
        let (transport_tx, transport_rx) = mpsc::channel(256);
        let transport = match WsTransport::connect(&config.signaling_url, transport_tx).await {
            Ok(t) => t,
            Err(e) => {
                error!("Failed to connect to server: {}", e);
                return Err(e);
            }
        };
        let rtc = WebRtcFactory::new()?;

        let parts = ClientParts {
            transport: Arc::new(transport),
            transport_events: transport_rx,
            rtc: Arc::new(rtc),
            media,
            render,
        };
        Ok(Self::start(config, parts))
    }

    pub async fn create_room(&self, room_id: &str) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.request(EngineCommand::Create {
            room_id: room_id.to_owned(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| ClientError::Closed)?
    }

    pub async fn join_room(&self, room_id: &str) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.request(EngineCommand::Join {
            room_id: room_id.to_owned(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| ClientError::Closed)?
    }

    /// Drops the current session and room membership.
    pub async fn leave(&self) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.request(EngineCommand::Leave { reply }).await?;
        rx.await.map_err(|_| ClientError::Closed)
    }

    pub async fn snapshot(&self) -> Result<EngineSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.request(EngineCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| ClientError::Closed)
    }

    pub fn status(&self) -> watch::Receiver<String> {
        self.status.subscribe()
    }

    pub fn status_text(&self) -> String {
        self.status.current()
    }

    /// Stops the engine and waits for it to close its connection.
    pub async fn shutdown(self) {
        let Self { cmd_tx, task, .. } = self;
        drop(cmd_tx);
        let _ = task.await;
    }

    async fn request(&self, cmd: EngineCommand) -> Result<()> {
        self.cmd_tx.send(cmd).await.map_err(|_| ClientError::Closed)
    }
}
