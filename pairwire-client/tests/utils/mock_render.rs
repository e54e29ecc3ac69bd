use pairwire_client::media::RenderTarget;
use pairwire_client::rtc::RemoteStream;
use std::sync::{Arc, Mutex};

/// Render target that remembers every stream it was given.
#[derive(Clone, Default)]
pub struct MockRenderTarget {
    attached: Arc<Mutex<Vec<RemoteStream>>>,
}

impl MockRenderTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached(&self) -> Vec<RemoteStream> {
        self.attached.lock().unwrap().clone()
    }
}

impl RenderTarget for MockRenderTarget {
    fn attach(&self, stream: RemoteStream) {
        tracing::debug!("[MockRenderTarget] attach {}", stream.stream_id);
        self.attached.lock().unwrap().push(stream);
    }
}
