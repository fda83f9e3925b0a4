//! Fixed-capacity accumulator for pending record updates.

use logofill_records::RecordUpdate;

/// Collects updates in source order and hands back a full batch each time
/// the capacity is reached, so the pending list never exceeds it.
#[derive(Debug)]
pub struct UpdateBatcher {
    capacity: usize,
    pending: Vec<RecordUpdate>,
}

impl UpdateBatcher {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            pending: Vec::with_capacity(capacity),
        }
    }

    /// Queue one update. Returns the drained batch when capacity is hit.
    pub fn push(&mut self, update: RecordUpdate) -> Option<Vec<RecordUpdate>> {
        self.pending.push(update);
        if self.pending.len() >= self.capacity {
            Some(std::mem::take(&mut self.pending))
        } else {
            None
        }
    }

    /// Drain whatever is left; empty when every update went out in a full
    /// batch already.
    pub fn take_remaining(&mut self) -> Vec<RecordUpdate> {
        std::mem::take(&mut self.pending)
    }

    /// Number of updates waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
