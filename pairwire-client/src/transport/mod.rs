mod transport_event;
mod ws_transport;

pub use transport_event::TransportEvent;
pub use ws_transport::WsTransport;

use crate::error::Result;
use async_trait::async_trait;
use pairwire_core::SignalMessage;

/// Outbound half of the signaling channel. Inbound traffic arrives as
/// [`TransportEvent`]s on the channel the transport was built with.
#[async_trait]
pub trait SignalingTransport: Send + Sync + 'static {
    async fn send(&self, msg: SignalMessage) -> Result<()>;

    /// Ends the session with the server. Called once, on client shutdown.
    async fn close(&self) {}
}
