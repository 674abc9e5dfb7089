use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::{
    clock::Clock,
    error::Aht21Error,
    sample::{RawSample, Reading, Status},
};

/// I2C address of the AHT21.
pub const SENSOR_ADDRESS: u8 = 0x38;

/// Initialization (calibration) command with its two parameter bytes.
pub const INIT_COMMAND: [u8; 3] = [0xE1, 0x08, 0x00];

/// Measurement trigger command with its two parameter bytes.
pub const TRIGGER_COMMAND: [u8; 3] = [0xAC, 0x33, 0x00];

/// Settling time (in milliseconds) before and after the init command.
pub const INIT_DELAY_MS: u32 = 10;

/// Maximum time to wait (in milliseconds) for the busy flag to clear.
pub const TIMEOUT_MS: u32 = 100;

/// Pause (in microseconds) between two status polls.
pub const POLL_INTERVAL_US: u32 = 500;

/// Driver for the AHT21 temperature and humidity sensor.
pub struct Aht21<I2C, D, C> {
    i2c: I2C,
    delay: D,
    clock: C,
}

impl<I2C, D, C, E> Aht21<I2C, D, C>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
    C: Clock,
{
    /// Creates a new instance of the AHT21 driver. No bus traffic happens here.
    ///
    /// # Arguments
    ///
    /// * `i2c` - The I2C bus the sensor is on. Pass `&mut bus` to keep ownership.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    /// * `clock` - A millisecond time source used for the measurement timeout.
    pub fn new(i2c: I2C, delay: D, clock: C) -> Self {
        Aht21 { i2c, delay, clock }
    }

    /// Initializes the sensor.
    ///
    /// Waits for the supply to settle, sends the init command and gives the
    /// sensor time to load its calibration. Safe to call more than once.
    pub fn init(&mut self) -> Result<(), Aht21Error<E>> {
        self.delay.delay_ms(INIT_DELAY_MS);
        self.send_command(INIT_COMMAND)?;
        self.delay.delay_ms(INIT_DELAY_MS);
        Ok(())
    }

    /// Reads a temperature and humidity measurement from the AHT21 sensor.
    ///
    /// This method performs the complete measurement sequence:
    /// triggering a conversion, polling until the sensor is no longer busy,
    /// reading 6 bytes, and decoding the result.
    ///
    /// # Returns
    ///
    /// * `Ok(Reading)` if the measurement completed.
    /// * `Err(Aht21Error)` naming the step that failed.
    pub fn read(&mut self) -> Result<Reading, Aht21Error<E>> {
        self.send_command(TRIGGER_COMMAND)?;
        self.wait_until_ready()?;

        let sample = self.read_sample()?;
        if sample.is_busy() {
            #[cfg(feature = "defmt")]
            defmt::warn!("aht21: response still flagged busy: {}", sample);
            return Err(Aht21Error::Busy);
        }

        let reading = sample.reading();
        #[cfg(feature = "defmt")]
        defmt::debug!("aht21: {}", reading);
        Ok(reading)
    }

    /// Releases the bus, delay and clock.
    pub fn release(self) -> (I2C, D, C) {
        (self.i2c, self.delay, self.clock)
    }

    /// Writes a three-byte command to the sensor.
    fn send_command(&mut self, command: [u8; 3]) -> Result<(), Aht21Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("aht21: command {:#04x}", command);
        self.i2c
            .write(SENSOR_ADDRESS, &command)
            .map_err(Aht21Error::NoAcknowledge)
    }

    /// Polls the status byte until the busy flag clears or [`TIMEOUT_MS`] elapse.
    ///
    /// A failed status read counts as "no answer yet" and polling continues.
    fn wait_until_ready(&mut self) -> Result<(), Aht21Error<E>> {
        let start = self.clock.now_ms();
        while self.clock.now_ms().wrapping_sub(start) < TIMEOUT_MS {
            let mut status = [0];
            if self.i2c.read(SENSOR_ADDRESS, &mut status).is_ok() && !Status(status[0]).is_busy()
            {
                return Ok(());
            }
            self.delay.delay_us(POLL_INTERVAL_US);
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("aht21: no ready status within {=u32} ms", TIMEOUT_MS);
        Err(Aht21Error::Timeout)
    }

    /// Reads the 6-byte measurement response.
    fn read_sample(&mut self) -> Result<RawSample, Aht21Error<E>> {
        let mut data = [0; 6];
        self.i2c
            .read(SENSOR_ADDRESS, &mut data)
            .map_err(Aht21Error::ShortRead)?;
        Ok(RawSample(data))
    }
}

#[cfg(feature = "linux")]
impl Aht21<linux_embedded_hal::I2cdev, linux_embedded_hal::Delay, crate::clock::StdClock> {
    /// Bus used by [`Aht21::with_default_bus`].
    pub const DEFAULT_BUS: &'static str = "/dev/i2c-1";

    /// Creates a driver on the default Linux I2C bus (`/dev/i2c-1`).
    pub fn with_default_bus() -> Result<Self, linux_embedded_hal::i2cdev::linux::LinuxI2CError> {
        let i2c = linux_embedded_hal::I2cdev::new(Self::DEFAULT_BUS)?;
        Ok(Self::new(
            i2c,
            linux_embedded_hal::Delay,
            crate::clock::StdClock::new(),
        ))
    }
}
