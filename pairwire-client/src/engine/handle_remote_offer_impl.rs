use crate::engine::{Engine, NegotiationPhase, validate_description};
use crate::error::{ClientError, Result};
use crate::rtc::SignalingState;
use pairwire_core::{RawDescription, SdpType, SessionDescription, SignalMessage};
use tracing::{debug, error, info};

impl Engine {
    pub(super) async fn handle_remote_offer(
        &mut self,
        room_id: String,
        offer: Option<RawDescription>,
    ) {
        if !self.is_for_current_room(&room_id) {
            return;
        }

        let offer = match validate_description(offer, SdpType::Offer) {
            Ok(desc) => desc,
            Err(e) => {
                error!("Invalid offer received: {}", e);
                self.deps.status.error("Received invalid offer.");
                return;
            }
        };

        info!("Received offer");
        if let Err(e) = self.answer_offer(offer).await {
            self.deps.status.error(format!("Error handling offer: {e}"));
        }
    }

    async fn answer_offer(&mut self, offer: SessionDescription) -> Result<()> {
        // Covers a joiner that got an offer without a start_call of its own.
        if self.session.is_none() {
            self.create_session().await?;
        }

        let room_id = self.outbound_room();
        let session = self.session.as_ref().ok_or(ClientError::NoSession)?;

        session.connection.set_remote_description(offer).await?;
        self.phase = NegotiationPhase::Negotiating;

        match session.connection.signaling_state() {
            SignalingState::HaveRemoteOffer => {}
            other => {
                debug!("No answer needed in signaling state {}", other);
                return Ok(());
            }
        }

        let answer = session.connection.create_answer().await?;
        session
            .connection
            .set_local_description(answer.clone())
            .await?;

        info!("Sending answer for room '{}'", room_id);
        self.deps
            .transport
            .send(SignalMessage::Answer {
                room_id,
                answer: Some(answer.into()),
            })
            .await
    }
}
