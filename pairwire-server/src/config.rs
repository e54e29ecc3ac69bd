use pairwire_core::utils::DEFAULT_SERVER_ADDR;

/// Where the rendezvous server listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_SERVER_ADDR.to_owned(),
        }
    }
}
