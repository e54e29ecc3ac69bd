pub use pairwire_core::model::{PeerId, RoomId, SignalMessage};

pub mod model {
    pub use pairwire_core::model::*;
    pub use pairwire_core::utils::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use pairwire_client::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use pairwire_server::*;
}
