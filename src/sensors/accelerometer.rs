use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::sensors::lsm9ds1::{Lsm9ds1, Lsm9ds1Error};
use crate::sensors::sample::Acceleration;
use crate::sensors::sensor_task::PeriodicSensor;

/// The LSM9DS1 accelerometer as a periodically polled sensor.
pub struct Accelerometer<I2C, D> {
    imu: Lsm9ds1<I2C>,
    delay: D,
}

impl<I2C, D> Accelerometer<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(imu: Lsm9ds1<I2C>, delay: D) -> Self {
        Self { imu, delay }
    }
}

impl<I2C, D> PeriodicSensor for Accelerometer<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Reading = Acceleration;
    type Error = Lsm9ds1Error;

    async fn init(&mut self) -> Result<(), Lsm9ds1Error> {
        self.imu.begin(&mut self.delay).await
    }

    async fn read(&mut self) -> Result<Option<Acceleration>, Lsm9ds1Error> {
        if !self.imu.acceleration_available().await? {
            return Ok(None);
        }
        self.imu.read_acceleration().await.map(Some)
    }
}
