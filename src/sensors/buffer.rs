use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};

/// Bounded FIFO shared between sensor tasks and their consumers.
///
/// `push` never waits: once the buffer is full new samples are handed back
/// to the caller and counted as dropped. Samples already queued are kept.
pub struct SampleBuffer<T, const N: usize> {
    channel: Channel<CriticalSectionRawMutex, T, N>,
    dropped: critical_section::Mutex<Cell<u32>>,
}

impl<T, const N: usize> SampleBuffer<T, N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: critical_section::Mutex::new(Cell::new(0)),
        }
    }

    /// Queue a sample, returning it back if the buffer is full.
    pub fn push(&self, sample: T) -> Result<(), T> {
        match self.channel.try_send(sample) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(sample)) => {
                critical_section::with(|cs| {
                    let dropped = self.dropped.borrow(cs);
                    dropped.set(dropped.get().wrapping_add(1));
                });
                Err(sample)
            }
        }
    }

    /// Take the oldest sample without waiting.
    pub fn pop(&self) -> Option<T> {
        self.channel.try_receive().ok()
    }

    /// Wait for the next sample.
    pub async fn receive(&self) -> T {
        self.channel.receive().await
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.channel.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Samples rejected because the buffer was full.
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.dropped.borrow(cs).get())
    }
}

impl<T, const N: usize> Default for SampleBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
