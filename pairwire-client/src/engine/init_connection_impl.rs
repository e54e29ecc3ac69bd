use crate::engine::Engine;
use crate::error::{ClientError, Result};
use crate::rtc::SignalingState;
use pairwire_core::SignalMessage;
use tracing::info;

impl Engine {
    /// Joiner path: the creator is present, so build a connection and offer.
    pub(super) async fn start_call(&mut self) {
        if !self.rooms.on_start_call() {
            return;
        }

        info!("Starting call (joiner)");
        if let Err(e) = self.create_session().await {
            self.deps.status.error(format!("Error starting call: {e}"));
            return;
        }

        if let Err(e) = self.send_offer().await {
            self.deps.status.error(format!("Error creating offer: {e}"));
        }
    }

    /// Creates, applies and transmits an offer on the current session.
    ///
    /// Only a connection still in `stable` may offer, so an offer that is
    /// already in flight is never generated twice.
    async fn send_offer(&mut self) -> Result<()> {
        let room_id = self.outbound_room();
        let session = self.session.as_ref().ok_or(ClientError::NoSession)?;

        match session.connection.signaling_state() {
            SignalingState::Stable => {}
            actual => {
                return Err(ClientError::StateMismatch {
                    expected: SignalingState::Stable,
                    actual,
                });
            }
        }

        let offer = session.connection.create_offer().await?;
        session
            .connection
            .set_local_description(offer.clone())
            .await?;

        info!("Sending offer for room '{}'", room_id);
        self.deps
            .transport
            .send(SignalMessage::Offer {
                room_id,
                offer: Some(offer.into()),
            })
            .await
    }
}
