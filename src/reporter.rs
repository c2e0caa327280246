//! Consumer side of the accelerometer buffer.
//!
//! The reporter drains buffered samples in small batches and logs one
//! summary line per batch along with the buffer's dropped-sample count.

use heapless::Vec;

use crate::sensors::{Acceleration, AccelerometerSample, SampleBuffer};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatchSummary {
    pub count: usize,
    pub first_ms: u32,
    pub last_ms: u32,
    pub latest: Acceleration,
}

/// Move queued samples into `batch` until it is full or the buffer is empty.
/// Returns how many samples were moved.
pub fn fill_batch<T, const N: usize, const B: usize>(
    buffer: &SampleBuffer<T, N>,
    batch: &mut Vec<T, B>,
) -> usize {
    let mut moved = 0;
    while !batch.is_full() {
        let Some(sample) = buffer.pop() else {
            break;
        };
        if batch.push(sample).is_err() {
            break;
        }
        moved += 1;
    }
    moved
}

pub fn summarize(batch: &[AccelerometerSample]) -> Option<BatchSummary> {
    let first = batch.first()?;
    let last = batch.last()?;
    Some(BatchSummary {
        count: batch.len(),
        first_ms: first.timestamp_ms,
        last_ms: last.timestamp_ms,
        latest: last.reading,
    })
}

#[cfg(feature = "firmware")]
#[embassy_executor::task]
pub async fn reporter_task(buffer: &'static crate::sensors::AccelerometerBuffer) -> ! {
    use crate::config::{CONFIG, REPORT_BATCH_CAPACITY};

    let mut batch: Vec<AccelerometerSample, REPORT_BATCH_CAPACITY> = Vec::new();
    loop {
        batch.clear();
        let first = buffer.receive().await;
        if batch.push(first).is_ok() {
            fill_batch(buffer, &mut batch);
        }

        if let Some(summary) = summarize(&batch) {
            defmt::info!(
                "accel: {} samples [{}..{} ms] latest x={} y={} z={} g (dropped: {})",
                summary.count,
                summary.first_ms,
                summary.last_ms,
                summary.latest.x,
                summary.latest.y,
                summary.latest.z,
                buffer.dropped()
            );
        }

        embassy_time::Timer::after(CONFIG.reporter.interval).await;
    }
}
