use pairwire_core::SignalMessage;

/// What the signaling channel reports to the engine loop.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// Channel is open.
    Connected,

    /// A decoded message from the rendezvous server.
    Message(SignalMessage),

    /// Channel closed by either side.
    Disconnected,
}
