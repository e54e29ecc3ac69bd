pub mod harness;
pub mod mock_render;

pub use harness::*;
pub use mock_peer::*;
pub use mock_render::*;
pub use mock_transport::*;
pub use relay::*;
