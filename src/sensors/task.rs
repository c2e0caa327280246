use crate::config::CONFIG;
use crate::sensors::lsm9ds1::Lsm9ds1;
use crate::sensors::{Accelerometer, AccelerometerBuffer, SensorTask, SystemClock};
use embassy_time::Delay;

#[embassy_executor::task]
pub async fn accelerometer_task(
    imu: Lsm9ds1<esp_hal::i2c::master::I2c<'static, esp_hal::Async>>,
    buffer: &'static AccelerometerBuffer,
) -> ! {
    // Reset and configure the LSM9DS1, then poll it for the lifetime of the device
    defmt::info!("Initializing accelerometer...");
    let mut task = SensorTask::new(
        "accelerometer",
        Accelerometer::new(imu, Delay),
        SystemClock,
        Delay,
        buffer,
        CONFIG.accelerometer.read_period,
    );
    task.run().await
}
