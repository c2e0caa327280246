pub mod accelerometer;
pub mod buffer;
pub mod lsm9ds1;
pub mod sample;
pub mod sensor_task;
#[cfg(feature = "firmware")]
pub mod task;
#[cfg(test)]
pub(crate) mod testing;

pub use accelerometer::Accelerometer;
pub use buffer::SampleBuffer;
pub use sample::{Acceleration, AccelerometerSample, Sample};
pub use sensor_task::{
    Clock, PeriodicSensor, ReadOutcome, SensorTask, SystemClock, TaskState, TaskStats,
};
#[cfg(feature = "firmware")]
pub use task::accelerometer_task;

use crate::config::ACCELEROMETER_BUFFER_CAPACITY;

pub type AccelerometerBuffer = SampleBuffer<AccelerometerSample, ACCELEROMETER_BUFFER_CAPACITY>;
