use crate::{Sample, AUDIO_BLOCK_SAMPLES};

/// One block of audio owned by whichever node produced it.
pub type AudioBlock = Box<[Sample; AUDIO_BLOCK_SAMPLES]>;

/// Fixed pool of audio blocks, preallocated up front.
///
/// Mirrors the host's block memory: once the pool is empty, `allocate`
/// returns `None` and the caller must drop its output for that block. This
/// is a transient underrun, never a fault.
pub struct BlockPool {
    free: Vec<AudioBlock>,
    capacity: usize,
    underruns: u64,
}

impl BlockPool {
    pub fn new(capacity: usize) -> Self {
        let free = (0..capacity)
            .map(|_| Box::new([0; AUDIO_BLOCK_SAMPLES]))
            .collect();
        Self {
            free,
            capacity,
            underruns: 0,
        }
    }

    /// Take a block. Contents are whatever the last owner left behind.
    pub fn allocate(&mut self) -> Option<AudioBlock> {
        let block = self.free.pop();
        if block.is_none() {
            self.underruns += 1;
            tracing::trace!(underruns = self.underruns, "block pool exhausted");
        }
        block
    }

    pub fn release(&mut self, block: AudioBlock) {
        if self.free.len() < self.capacity {
            self.free.push(block);
        }
    }

    pub fn available(&self) -> usize {
        self.free.len()
    }

    pub fn in_use(&self) -> usize {
        self.capacity - self.free.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of failed allocations since construction.
    pub fn underruns(&self) -> u64 {
        self.underruns
    }
}
