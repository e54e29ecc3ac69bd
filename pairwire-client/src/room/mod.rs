mod room_coordinator;

pub use room_coordinator::*;
