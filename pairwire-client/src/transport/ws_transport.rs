use crate::error::{ClientError, Result};
use crate::transport::{SignalingTransport, TransportEvent};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use pairwire_core::SignalMessage;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

/// How long [`WsTransport::close`] waits for the close frame to go out.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// JSON-over-WebSocket signaling channel.
pub struct WsTransport {
    tx: mpsc::UnboundedSender<Message>,
    send_task: Mutex<Option<JoinHandle<()>>>,
    recv_task: JoinHandle<()>,
}

impl WsTransport {
    /// Dials `url` and starts pumping frames.
    ///
    /// Decoded server messages go to `events`; `Connected` is sent first and
    /// `Disconnected` once the socket is gone.
    pub async fn connect(url: &str, events: mpsc::Sender<TransportEvent>) -> Result<Self> {
        let (socket, _response) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| ClientError::Transport(format!("connect to {url}: {e}")))?;
        info!("Connected to signaling server at {}", url);

        let (mut sender, mut receiver) = socket.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                let closing = matches!(msg, Message::Close(_));
                if let Err(e) = sender.send(msg).await {
                    error!("Failed to write signaling frame: {}", e);
                    break;
                }
                if closing {
                    break;
                }
            }
            let _ = sender.close().await;
        });

        let _ = events.send(TransportEvent::Connected).await;

        let recv_task = tokio::spawn(async move {
            while let Some(frame) = receiver.next().await {
                match frame {
                    Ok(Message::Text(text)) => match serde_json::from_str::<SignalMessage>(&text) {
                        Ok(msg) => {
                            debug!("Signaling IN: {}", msg.event_name());
                            if events.send(TransportEvent::Message(msg)).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid signaling frame: {:?}", e),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Signaling socket error: {}", e);
                        break;
                    }
                }
            }

            info!("Disconnected from signaling server");
            let _ = events.send(TransportEvent::Disconnected).await;
        });

        Ok(Self {
            tx,
            send_task: Mutex::new(Some(send_task)),
            recv_task,
        })
    }
}

#[async_trait]
impl SignalingTransport for WsTransport {
    async fn send(&self, msg: SignalMessage) -> Result<()> {
        let json = serde_json::to_string(&msg)
            .map_err(|e| ClientError::Transport(format!("encode {}: {e}", msg.event_name())))?;
        debug!("Signaling OUT: {}", msg.event_name());
        self.tx
            .send(Message::Text(json.into()))
            .map_err(|_| ClientError::Transport("signaling socket is closed".into()))
    }

    /// Sends a close frame and waits for the writer to flush it.
    async fn close(&self) {
        let Some(send_task) = self.send_task.lock().await.take() else {
            return;
        };
        if self.tx.send(Message::Close(None)).is_err() {
            debug!("Signaling writer already stopped");
        }
        if tokio::time::timeout(CLOSE_TIMEOUT, send_task).await.is_err() {
            warn!("Timed out closing signaling socket");
        }
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        if let Some(send_task) = self.send_task.get_mut().take() {
            send_task.abort();
        }
        self.recv_task.abort();
    }
}
