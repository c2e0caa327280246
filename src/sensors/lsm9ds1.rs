use embedded_hal::i2c::SevenBitAddress;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::sensors::sample::Acceleration;

/// Accelerometer/gyroscope die. The magnetometer sits at 0x1E and is unused.
pub const LSM9DS1_ADDRESS: SevenBitAddress = 0x6B;

// Registers
const REG_WHO_AM_I: u8 = 0x0F;
const REG_CTRL_REG1_G: u8 = 0x10;
const REG_STATUS: u8 = 0x17;
const REG_CTRL_REG6_XL: u8 = 0x20;
const REG_CTRL_REG8: u8 = 0x22;
const REG_OUT_X_XL: u8 = 0x28;

const WHO_AM_I_VALUE: u8 = 0x68;

// Register values
const CTRL_REG8_SW_RESET: u8 = 0x05; // SW_RESET | IF_ADD_INC
const CTRL_REG1_G_119HZ_2000DPS: u8 = 0x78;
const CTRL_REG6_XL_119HZ_4G: u8 = 0x70;
const STATUS_XLDA: u8 = 0x01;

const RESET_DELAY_MS: u32 = 10;
const ACCEL_FULL_SCALE_G: f32 = 4.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lsm9ds1Error {
    I2cError,
    UnexpectedId(u8), // Contains the WHO_AM_I value that was read
    NotInitialized,
}

pub struct Lsm9ds1<I2C> {
    i2c: I2C,
    address: SevenBitAddress,
    initialized: bool,
}

impl<I2C> Lsm9ds1<I2C>
where
    I2C: I2c,
{
    /// Create a driver for the LSM9DS1 at its default address.
    ///
    /// Note: You must call `begin()` before reading.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, LSM9DS1_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: SevenBitAddress) -> Self {
        Self {
            i2c,
            address,
            initialized: false,
        }
    }

    /// Reset the device and enable the accelerometer.
    ///
    /// This performs:
    /// 1. Software reset, then waits for the device to reload its registers
    /// 2. WHO_AM_I check
    /// 3. Gyroscope at 119 Hz / 2000 dps, which also clocks the accelerometer
    /// 4. Accelerometer at 119 Hz / +-4 g
    pub async fn begin(&mut self, delay: &mut impl DelayNs) -> Result<(), Lsm9ds1Error> {
        self.initialized = false;

        self.write_reg(REG_CTRL_REG8, CTRL_REG8_SW_RESET).await?;
        delay.delay_ms(RESET_DELAY_MS).await;

        let id = self.read_reg(REG_WHO_AM_I).await?;
        if id != WHO_AM_I_VALUE {
            return Err(Lsm9ds1Error::UnexpectedId(id));
        }

        self.write_reg(REG_CTRL_REG1_G, CTRL_REG1_G_119HZ_2000DPS)
            .await?;
        self.write_reg(REG_CTRL_REG6_XL, CTRL_REG6_XL_119HZ_4G)
            .await?;

        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a new acceleration sample is waiting in the output registers.
    pub async fn acceleration_available(&mut self) -> Result<bool, Lsm9ds1Error> {
        self.ensure_initialized()?;
        let status = self.read_reg(REG_STATUS).await?;
        Ok(status & STATUS_XLDA != 0)
    }

    /// Read the latest acceleration sample in g.
    pub async fn read_acceleration(&mut self) -> Result<Acceleration, Lsm9ds1Error> {
        self.ensure_initialized()?;

        let mut buf = [0u8; 6];
        self.i2c
            .write_read(self.address, &[REG_OUT_X_XL], &mut buf)
            .await
            .map_err(|_| Lsm9ds1Error::I2cError)?;

        Ok(Acceleration {
            x: raw_to_g(i16::from_le_bytes([buf[0], buf[1]])),
            y: raw_to_g(i16::from_le_bytes([buf[2], buf[3]])),
            z: raw_to_g(i16::from_le_bytes([buf[4], buf[5]])),
        })
    }

    #[cfg(test)]
    pub(crate) fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    fn ensure_initialized(&self) -> Result<(), Lsm9ds1Error> {
        if self.initialized {
            Ok(())
        } else {
            Err(Lsm9ds1Error::NotInitialized)
        }
    }

    async fn read_reg(&mut self, reg: u8) -> Result<u8, Lsm9ds1Error> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .await
            .map_err(|_| Lsm9ds1Error::I2cError)?;
        Ok(buf[0])
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Lsm9ds1Error> {
        self.i2c
            .write(self.address, &[reg, value])
            .await
            .map_err(|_| Lsm9ds1Error::I2cError)
    }
}

/// Convert a raw accelerometer count to g at the +-4 g full scale.
fn raw_to_g(raw: i16) -> f32 {
    raw as f32 * ACCEL_FULL_SCALE_G / 32768.0
}
