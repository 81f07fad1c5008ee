use crate::StreamError;

/// A growable FIFO of `f32` samples.
///
/// Both the input and output queues of a [`Stream`](crate::Stream) are one of
/// these. Growth follows a geometric-plus-additive rule (new capacity = old
/// capacity + old capacity / 2 + the requested increment) so that repeated
/// small appends are amortized O(1); capacity never shrinks.
#[derive(Debug, Clone, Default)]
pub struct SampleQueue {
    samples: Vec<f32>,
    /// If set, `append` fails once `len() + incoming` would exceed this.
    /// Exists only so tests can force an allocation-failure path
    /// deterministically; production streams never set it.
    capacity_limit: Option<usize>,
}

impl SampleQueue {
    pub fn new() -> SampleQueue {
        SampleQueue { samples: Vec::new(), capacity_limit: None }
    }

    pub fn with_capacity(capacity: usize) -> SampleQueue {
        SampleQueue { samples: Vec::with_capacity(capacity), capacity_limit: None }
    }

    /// Build a queue that reports [`StreamError::AllocationFailed`] instead
    /// of growing past `limit` samples. Used to exercise the allocation-
    /// failure path in tests; real streams should use [`SampleQueue::new`].
    pub fn with_capacity_limit(limit: usize) -> SampleQueue {
        SampleQueue { samples: Vec::new(), capacity_limit: Some(limit) }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Append `incoming` to the end of the queue, growing capacity if
    /// necessary. Fails only if growth fails (or the test-only capacity
    /// limit would be exceeded).
    pub fn append(&mut self, incoming: &[f32]) -> Result<(), StreamError> {
        if let Some(limit) = self.capacity_limit {
            if self.samples.len() + incoming.len() > limit {
                return Err(StreamError::AllocationFailed);
            }
        }
        let needed = self.samples.len() + incoming.len();
        if needed > self.samples.capacity() {
            let grown = self.samples.capacity() + self.samples.capacity() / 2
                + incoming.len();
            let additional = grown.saturating_sub(self.samples.len());
            self.samples
                .try_reserve(additional)
                .map_err(|_| StreamError::AllocationFailed)?;
        }
        self.samples.extend_from_slice(incoming);
        Ok(())
    }

    /// Append `count` zero samples.
    pub fn append_zeros(&mut self, count: usize) -> Result<(), StreamError> {
        // Chunk through a small stack buffer rather than allocating one
        // `count`-sized scratch `Vec`.
        const CHUNK: usize = 256;
        let zeros = [0.0f32; CHUNK];
        let mut remaining = count;
        while remaining > 0 {
            let this_chunk = remaining.min(CHUNK);
            self.append(&zeros[..this_chunk])?;
            remaining -= this_chunk;
        }
        Ok(())
    }

    /// Drop the first `count` samples, shifting the remainder down.
    pub fn drop_prefix(&mut self, count: usize) {
        self.samples.drain(..count.min(self.samples.len()));
    }

    /// Copy up to `buf.len()` samples from the front of the queue into `buf`,
    /// and drop them. Returns the number of samples copied.
    pub fn drain_into(&mut self, buf: &mut [f32]) -> usize {
        let count = self.samples.len().min(buf.len());
        buf[..count].copy_from_slice(&self.samples[..count]);
        self.drop_prefix(count);
        count
    }
}
