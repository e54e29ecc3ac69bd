use pairwire_core::IceCandidate;

/// Remote ICE candidates that arrived before the connection could take them.
///
/// Arrival order is preserved. Unbounded: a call produces a few dozen
/// candidates at most.
#[derive(Debug, Default)]
pub struct CandidateQueue {
    pending: Vec<IceCandidate>,
}

impl CandidateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, candidate: IceCandidate) {
        self.pending.push(candidate);
    }

    /// Hands back every queued candidate, oldest first, and leaves the queue
    /// empty. Returns nothing when `ready` is false.
    pub fn drain_if_ready(&mut self, ready: bool) -> Vec<IceCandidate> {
        if !ready {
            return Vec::new();
        }
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
