use anyhow::{Context, Result};
use pairwire_client::media::{MediaSource, NoMedia};
use pairwire_client::transport::TransportEvent;
use pairwire_client::{Client, ClientConfig, ClientParts, EngineSnapshot};
use pairwire_core::SignalMessage;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::mock_peer::MockPeerFactory;
use super::mock_render::MockRenderTarget;
use super::mock_transport::MockTransport;

/// Timeout for waiting on engine state (ms).
pub const STATE_TIMEOUT_MS: u64 = 2000;

/// Time given to the engine to (not) react to an input (ms).
pub const SETTLE_MS: u64 = 100;

/// A client wired to mocks on every side.
///
/// `server_tx` plays the signaling server; whatever the client sends lands
/// in `outbound` (until a relay takes it over).
pub struct TestClient {
    pub client: Client,
    pub server_tx: mpsc::Sender<TransportEvent>,
    pub transport: MockTransport,
    pub outbound: Option<mpsc::UnboundedReceiver<SignalMessage>>,
    pub peers: MockPeerFactory,
    pub render: MockRenderTarget,
}

impl TestClient {
    /// Client without local media.
    pub fn start() -> Self {
        Self::start_with_media(Arc::new(NoMedia))
    }

    pub fn start_with_media(media: Arc<dyn MediaSource>) -> Self {
        let (server_tx, transport_events) = mpsc::channel(64);
        let (transport, outbound) = MockTransport::new();
        let peers = MockPeerFactory::new();
        let render = MockRenderTarget::new();

        let config = ClientConfig {
            ice_servers: vec![],
            ..Default::default()
        };
        let client = Client::start(
            config,
            ClientParts {
                transport: Arc::new(transport.clone()),
                transport_events,
                rtc: Arc::new(peers.clone()),
                media,
                render: Arc::new(render.clone()),
            },
        );

        Self {
            client,
            server_tx,
            transport,
            outbound: Some(outbound),
            peers,
            render,
        }
    }

    /// Deliver a message as if the server had sent it.
    pub async fn deliver(&self, msg: SignalMessage) {
        self.server_tx
            .send(TransportEvent::Message(msg))
            .await
            .expect("client stopped listening");
    }

    pub async fn disconnect(&self) {
        self.server_tx
            .send(TransportEvent::Disconnected)
            .await
            .expect("client stopped listening");
    }

    /// Next message the client sent, skipping nothing.
    pub async fn next_sent(&mut self) -> Result<SignalMessage> {
        let rx = self.outbound.as_mut().context("outbound taken by relay")?;
        tokio::time::timeout(Duration::from_millis(STATE_TIMEOUT_MS), rx.recv())
            .await
            .context("Timeout waiting for outbound message")?
            .context("Outbound channel closed")
    }

    /// Next sent message with the given wire event name.
    pub async fn next_sent_event(&mut self, event: &str) -> Result<SignalMessage> {
        loop {
            let msg = self.next_sent().await?;
            if msg.event_name() == event {
                return Ok(msg);
            }
            tracing::debug!("[TestClient] skipping {}", msg.event_name());
        }
    }

    /// Polls snapshots until `cond` holds.
    pub async fn wait_for<F>(&self, cond: F) -> Result<EngineSnapshot>
    where
        F: Fn(&EngineSnapshot) -> bool,
    {
        let start = Instant::now();
        let timeout = Duration::from_millis(STATE_TIMEOUT_MS);

        loop {
            let snapshot = self.client.snapshot().await?;
            if cond(&snapshot) {
                return Ok(snapshot);
            }
            if start.elapsed() > timeout {
                anyhow::bail!("Timeout waiting for engine state (last: {:?})", snapshot);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    pub async fn wait_for_status(&self, text: &str) -> Result<()> {
        let mut rx = self.client.status();
        tokio::time::timeout(
            Duration::from_millis(STATE_TIMEOUT_MS),
            rx.wait_for(|current| current == text),
        )
        .await
        .with_context(|| {
            format!(
                "Timeout waiting for status '{}' (last: '{}')",
                text,
                self.client.status_text()
            )
        })?
        .context("Status channel closed")?;
        Ok(())
    }

    pub async fn settle(&self) {
        tokio::time::sleep(Duration::from_millis(SETTLE_MS)).await;
    }
}
