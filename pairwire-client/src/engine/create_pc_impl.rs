use crate::engine::{Engine, NegotiationPhase, PeerSession};
use crate::error::Result;
use crate::rtc::PeerEventSink;
use tracing::{debug, info, warn};

impl Engine {
    /// Replaces the current session with a fresh connection object.
    ///
    /// Callbacks are wired by the factory before the connection is returned;
    /// local tracks are attached right after. Track failures are reported
    /// and skipped so the call can still proceed receive-only.
    pub(super) async fn create_session(&mut self) -> Result<()> {
        self.discard_session("superseded").await;

        self.next_generation += 1;
        let generation = self.next_generation;
        let events = PeerEventSink::new(generation, self.peer_tx.clone());

        let connection = self
            .deps
            .rtc
            .create(&self.config.ice_servers, events)
            .await?;

        for track in &self.local_tracks {
            if let Err(e) = connection.add_track(track.clone()).await {
                warn!("Failed to attach local track {}: {}", track.id(), e);
            }
        }

        info!(
            "Peer session {} created with {} local tracks",
            generation,
            self.local_tracks.len()
        );

        self.session = Some(PeerSession::new(
            generation,
            self.rooms.room_id().cloned(),
            connection,
        ));
        self.phase = NegotiationPhase::AwaitingRemoteDescription;
        Ok(())
    }

    /// Closes and forgets the current session. Events it still emits carry a
    /// generation that no longer matches and are ignored.
    pub(super) async fn discard_session(&mut self, reason: &str) {
        let Some(session) = self.session.take() else {
            return;
        };

        debug!("Discarding peer session {} ({})", session.generation, reason);
        if let Err(e) = session.connection.close().await {
            warn!("Failed to close peer session {}: {}", session.generation, e);
        }
        self.phase = NegotiationPhase::Closed;
    }
}
