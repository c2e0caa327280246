//! Generic periodic sensor task.
//!
//! A [`SensorTask`] owns one sensor and runs it through a small state
//! machine: it initializes the sensor once, then repeatedly reads, stamps and
//! buffers a sample and sleeps for a fixed period. A sensor that fails to
//! initialize leaves the task `Halted` for good; the rest of the system keeps
//! running.

use embassy_time::{Duration, Instant};
use embedded_hal_async::delay::DelayNs;

use crate::sensors::buffer::SampleBuffer;
use crate::sensors::sample::Sample;

/// The part of a sensor the task drives.
#[allow(async_fn_in_trait)]
pub trait PeriodicSensor {
    type Reading;
    type Error;

    /// One-time setup, run before the first read.
    async fn init(&mut self) -> Result<(), Self::Error>;

    /// Fetch a new reading, or `Ok(None)` when the device has nothing new.
    async fn read(&mut self) -> Result<Option<Self::Reading>, Self::Error>;
}

/// Monotonic millisecond clock used to stamp samples.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Milliseconds since boot from the embassy time driver, wrapping at `u32::MAX`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskState {
    Uninitialized,
    Running,
    /// Initialization failed. Terminal until the device is reset.
    Halted,
}

/// What a single read cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadOutcome {
    Pushed,
    /// A sample was read but the buffer was full.
    Dropped,
    NoData,
    ReadFailed,
    /// The task is not `Running`; nothing was touched.
    NotRunning,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskStats {
    pub cycles: u32,
    pub pushed: u32,
    pub dropped: u32,
    pub empty: u32,
    pub failed: u32,
}

impl TaskStats {
    fn record(&mut self, outcome: ReadOutcome) {
        let counter = match outcome {
            ReadOutcome::Pushed => &mut self.pushed,
            ReadOutcome::Dropped => &mut self.dropped,
            ReadOutcome::NoData => &mut self.empty,
            ReadOutcome::ReadFailed => &mut self.failed,
            ReadOutcome::NotRunning => return,
        };
        *counter = counter.wrapping_add(1);
        self.cycles = self.cycles.wrapping_add(1);
    }
}

/// Sleep length in whole milliseconds, at least 1 so the read loop always
/// yields, saturating at `u32::MAX`.
fn period_to_ms(period: Duration) -> u32 {
    u32::try_from(period.as_millis()).unwrap_or(u32::MAX).max(1)
}

pub struct SensorTask<'a, S, C, D, const N: usize>
where
    S: PeriodicSensor,
{
    name: &'static str,
    sensor: S,
    clock: C,
    delay: D,
    buffer: &'a SampleBuffer<Sample<S::Reading>, N>,
    period_ms: u32,
    state: TaskState,
    stats: TaskStats,
}

impl<'a, S, C, D, const N: usize> SensorTask<'a, S, C, D, N>
where
    S: PeriodicSensor,
    C: Clock,
    D: DelayNs,
{
    pub fn new(
        name: &'static str,
        sensor: S,
        clock: C,
        delay: D,
        buffer: &'a SampleBuffer<Sample<S::Reading>, N>,
        period: Duration,
    ) -> Self {
        Self {
            name,
            sensor,
            clock,
            delay,
            buffer,
            period_ms: period_to_ms(period),
            state: TaskState::Uninitialized,
            stats: TaskStats::default(),
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn stats(&self) -> TaskStats {
        self.stats
    }

    /// Initialize the sensor. Only the first call does anything; later
    /// calls return the state it left behind.
    pub async fn init(&mut self) -> TaskState {
        if self.state != TaskState::Uninitialized {
            return self.state;
        }

        self.state = match self.sensor.init().await {
            Ok(()) => {
                info!("{}: initialized, reading every {} ms", self.name, self.period_ms);
                TaskState::Running
            }
            Err(_) => {
                error!("{}: initialization failed, task halted", self.name);
                TaskState::Halted
            }
        };
        self.state
    }

    /// Run one read cycle: push a stamped sample if the sensor has one, then
    /// sleep for the read period. Does nothing unless the task is `Running`.
    pub async fn read(&mut self) -> ReadOutcome {
        if self.state != TaskState::Running {
            return ReadOutcome::NotRunning;
        }

        let outcome = match self.sensor.read().await {
            Ok(Some(reading)) => {
                let sample = Sample::new(reading, self.clock.now_ms());
                match self.buffer.push(sample) {
                    Ok(()) => ReadOutcome::Pushed,
                    Err(_) => ReadOutcome::Dropped,
                }
            }
            Ok(None) => ReadOutcome::NoData,
            Err(_) => {
                warn!("{}: read failed", self.name);
                ReadOutcome::ReadFailed
            }
        };
        self.stats.record(outcome);

        self.delay.delay_ms(self.period_ms).await;
        outcome
    }

    /// Initialize, then read for as long as the task is running. A halted
    /// task parks here forever.
    pub async fn run(&mut self) -> ! {
        self.init().await;
        while self.state == TaskState::Running {
            self.read().await;
        }

        debug!("{}: parked", self.name);
        loop {
            core::future::pending::<()>().await;
        }
    }
}
