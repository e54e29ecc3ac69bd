use crate::engine::{Engine, NegotiationPhase, validate_description};
use crate::error::ClientError;
use crate::rtc::SignalingState;
use pairwire_core::{RawDescription, SdpType};
use tracing::{error, info};

impl Engine {
    /// Applies an answer, but only on top of our own outstanding offer.
    /// Duplicate or late answers are logged and leave the connection as is.
    pub(super) async fn handle_remote_answer(
        &mut self,
        room_id: String,
        answer: Option<RawDescription>,
    ) {
        if !self.is_for_current_room(&room_id) {
            return;
        }

        let answer = match validate_description(answer, SdpType::Answer) {
            Ok(desc) => desc,
            Err(e) => {
                error!("Invalid answer received: {}", e);
                self.deps.status.error("Received invalid answer.");
                return;
            }
        };

        let Some(session) = self.session.as_ref() else {
            error!("Invalid state for answer: {}", ClientError::NoSession);
            return;
        };

        let actual = session.connection.signaling_state();
        if actual != SignalingState::HaveLocalOffer {
            let err = ClientError::StateMismatch {
                expected: SignalingState::HaveLocalOffer,
                actual,
            };
            error!("Invalid state for answer: {}", err);
            return;
        }

        info!("Received answer");
        match session.connection.set_remote_description(answer).await {
            Ok(()) => {
                self.phase = NegotiationPhase::Negotiating;
                info!("Remote description set (answer)");
            }
            Err(e) => {
                self.deps
                    .status
                    .error(format!("Error setting remote answer: {e}"));
            }
        }
    }
}
