#![no_std]
#![no_main]
#![feature(type_alias_impl_trait)]
#![feature(impl_trait_in_assoc_type)]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_backtrace as _; // Register the panic handler.
use esp_hal::clock::CpuClock;
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _; // Register the defmt UART global logger.
// use defmt_rtt as _; // Register the defmt RTT global logger.
use static_cell::StaticCell;

use accel_sampler as lib;
use lib::config::CONFIG;

// This creates a default app-descriptor required by the esp-idf bootloader.
esp_bootloader_esp_idf::esp_app_desc!();

static ACCELEROMETER_BUFFER: StaticCell<lib::sensors::AccelerometerBuffer> = StaticCell::new();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    defmt::info!("Init...");

    let reset_reason = esp_hal::system::reset_reason();
    defmt::info!("Reset Reason: {:?}", defmt::Debug2Format(&reset_reason));

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timg0 = TimerGroup::new(peripherals.TIMG0);

    let sw_int =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);

    esp_rtos::start(timg0.timer0, sw_int.software_interrupt0);

    defmt::info!("RTOS scheduler initialized");

    // LSM9DS1 on I2C0: SDA GPIO7, SCL GPIO6.
    let i2c_config = esp_hal::i2c::master::Config::default()
        .with_frequency(Rate::from_khz(CONFIG.i2c.frequency_khz));
    let i2c0 = esp_hal::i2c::master::I2c::new(peripherals.I2C0, i2c_config)
        .expect("Failed to configure I2C0")
        .with_sda(peripherals.GPIO7)
        .with_scl(peripherals.GPIO6)
        .into_async();

    let imu = lib::sensors::lsm9ds1::Lsm9ds1::new(i2c0);
    let buffer: &'static lib::sensors::AccelerometerBuffer =
        ACCELEROMETER_BUFFER.init(lib::sensors::AccelerometerBuffer::new());

    spawner.must_spawn(lib::sensors::accelerometer_task(imu, buffer));
    spawner.must_spawn(lib::reporter::reporter_task(buffer));

    loop {
        if CONFIG.print_status_loop {
            let uptime = embassy_time::Instant::now().as_secs();

            defmt::info!(
                "[{}s] Buffered: {}/{} | Dropped: {}",
                uptime,
                buffer.len(),
                buffer.capacity(),
                buffer.dropped()
            );
        }

        Timer::after(Duration::from_secs(1)).await;
    }
}
