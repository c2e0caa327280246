//! Configuration constants for the sampler firmware.
//!
//! This module centralizes all configuration values that are set via
//! environment variables at compile time or hardcoded constants.

use embassy_time::Duration;

/// Default wait between two accelerometer reads. The LSM9DS1 produces a new
/// acceleration sample roughly every 8.4 ms at 119 Hz.
pub const ACCELEROMETER_READ_PERIOD_MS: u64 = 8;

/// Number of samples the accelerometer buffer holds. Pushes beyond this are
/// dropped until the reporter catches up.
pub const ACCELEROMETER_BUFFER_CAPACITY: usize = 32;

/// Maximum number of samples the reporter drains into one batch.
pub const REPORT_BATCH_CAPACITY: usize = 16;

/// Accelerometer task settings.
#[derive(Debug, Clone, Copy)]
pub struct AccelerometerConfig {
    /// Sleep at the end of every read cycle.
    pub read_period: Duration,
}

/// I2C bus settings.
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Bus clock in kHz.
    pub frequency_khz: u32,
}

/// Reporter (buffer consumer) settings.
#[derive(Debug, Clone, Copy)]
pub struct ReporterConfig {
    /// Pause between two drained batches.
    pub interval: Duration,
}

/// Global application configuration.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Accelerometer configuration.
    pub accelerometer: AccelerometerConfig,
    /// I2C configuration.
    pub i2c: I2cConfig,
    /// Reporter configuration.
    pub reporter: ReporterConfig,
    /// Whether to print buffer status in the main loop.
    pub print_status_loop: bool,
}

impl Config {
    /// Creates a new configuration from compile-time environment variables.
    const fn new() -> Self {
        Self {
            accelerometer: AccelerometerConfig {
                read_period: Duration::from_millis(match option_env!("ACCEL_READ_PERIOD_MS") {
                    Some(value) => parse_period_ms(value),
                    None => ACCELEROMETER_READ_PERIOD_MS,
                }),
            },
            i2c: I2cConfig { frequency_khz: 400 },
            reporter: ReporterConfig {
                interval: Duration::from_millis(100),
            },
            print_status_loop: match option_env!("PRINT_STATUS_LOOP") {
                Some(value) => matches!(value.as_bytes(), [b't', b'r', b'u', b'e']),
                None => false,
            },
        }
    }
}

/// Parses a decimal millisecond period. A zero period would turn the read
/// loop into a busy loop, so it is rejected along with non-digits and values
/// that do not fit the task's `u32` millisecond sleep.
const fn parse_period_ms(value: &str) -> u64 {
    let bytes = value.as_bytes();
    if bytes.is_empty() {
        panic!("Empty read period");
    }

    let mut ms: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            panic!("Invalid read period, expected decimal milliseconds");
        }
        ms = ms * 10 + (b - b'0') as u64;
        if ms > u32::MAX as u64 {
            panic!("Read period too long, must fit in u32 milliseconds");
        }
        i += 1;
    }

    if ms == 0 {
        panic!("Read period must be non-zero");
    }
    ms
}

/// Global configuration instance.
pub static CONFIG: Config = Config::new();
