use pairwire_core::IceServerConfig;
use pairwire_core::utils::DEFAULT_SIGNALING_URL;

/// Where to signal and which ICE servers to hand every connection object.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub signaling_url: String,
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            signaling_url: DEFAULT_SIGNALING_URL.to_owned(),
            ice_servers: vec![IceServerConfig::default()],
        }
    }
}
