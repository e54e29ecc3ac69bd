/// Public STUN server used when no ICE servers are configured.
pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";

/// Signaling endpoint a client dials when none is configured.
pub const DEFAULT_SIGNALING_URL: &str = "ws://127.0.0.1:5000/ws";

/// Address the rendezvous server binds to by default.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:5000";

/// Path of the WebSocket route on the rendezvous server.
pub const SIGNALING_PATH: &str = "/ws";
