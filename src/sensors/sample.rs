/// One acceleration reading in g.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Acceleration {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A reading stamped with the millisecond clock at the time it was taken.
///
/// The timestamp wraps after `u32::MAX` milliseconds, like Arduino's `millis()`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample<T> {
    pub reading: T,
    pub timestamp_ms: u32,
}

impl<T> Sample<T> {
    pub const fn new(reading: T, timestamp_ms: u32) -> Self {
        Self {
            reading,
            timestamp_ms,
        }
    }
}

pub type AccelerometerSample = Sample<Acceleration>;
