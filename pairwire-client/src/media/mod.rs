//! Collaborators on either side of the call: local capture and remote rendering.

use crate::error::{ClientError, Result};
use crate::rtc::RemoteStream;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// Local track handle. Owned by the capture side; sessions only attach it.
pub type LocalTrack = Arc<dyn TrackLocal + Send + Sync>;

/// Supplies the local audio/video tracks once, before any session exists.
#[async_trait]
pub trait MediaSource: Send + Sync + 'static {
    async fn capture(&self) -> Result<Vec<LocalTrack>>;
}

/// Display surface for the remote stream.
pub trait RenderTarget: Send + Sync + 'static {
    fn attach(&self, stream: RemoteStream);
}

/// Opus + VP8 sample tracks with nothing written to them yet.
///
/// Stands in for a camera/microphone when the caller only needs the
/// negotiation to happen; the tracks are exposed so samples can be fed in.
pub struct SampleTracks {
    pub audio: Arc<TrackLocalStaticSample>,
    pub video: Arc<TrackLocalStaticSample>,
}

impl SampleTracks {
    pub fn new(stream_id: &str) -> Self {
        let audio = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_OPUS.to_owned(),
                ..Default::default()
            },
            "audio".to_owned(),
            stream_id.to_owned(),
        ));
        let video = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_VP8.to_owned(),
                ..Default::default()
            },
            "video".to_owned(),
            stream_id.to_owned(),
        ));
        Self { audio, video }
    }
}

#[async_trait]
impl MediaSource for SampleTracks {
    async fn capture(&self) -> Result<Vec<LocalTrack>> {
        Ok(vec![
            self.audio.clone() as LocalTrack,
            self.video.clone() as LocalTrack,
        ])
    }
}

/// Capture that always fails, for running a call without local media.
pub struct NoMedia;

#[async_trait]
impl MediaSource for NoMedia {
    async fn capture(&self) -> Result<Vec<LocalTrack>> {
        Err(ClientError::Capture("no capture device configured".into()))
    }
}

/// Render target that only logs what it would have shown.
#[derive(Default)]
pub struct LogRenderTarget;

impl RenderTarget for LogRenderTarget {
    fn attach(&self, stream: RemoteStream) {
        info!(
            "Remote stream {} attached (track {})",
            stream.stream_id, stream.track_id
        );
    }
}
