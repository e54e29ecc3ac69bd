use tokio::sync::watch;
use tracing::{error, info, warn};

/// The one-line, user-facing status text, mirrored into the log.
#[derive(Clone)]
pub struct Status {
    tx: watch::Sender<String>,
}

impl Status {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(String::new());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }

    pub fn info(&self, text: impl Into<String>) {
        let text = text.into();
        info!("[status] {}", text);
        self.tx.send_replace(text);
    }

    pub fn warn(&self, text: impl Into<String>) {
        let text = text.into();
        warn!("[status] {}", text);
        self.tx.send_replace(text);
    }

    pub fn error(&self, text: impl Into<String>) {
        let text = text.into();
        error!("[status] {}", text);
        self.tx.send_replace(text);
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::new()
    }
}
