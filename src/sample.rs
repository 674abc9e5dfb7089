/// Full scale of the 20-bit humidity and temperature fractions (2^20).
const FULL_SCALE: f32 = 1_048_576.0;

/// Busy flag in the status byte (bit 7).
const BUSY_FLAG: u8 = 0b1000_0000;

/// Status byte reported by the sensor while polling.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Status(pub u8);

impl Status {
    /// Returns `true` while a measurement is still in progress.
    pub fn is_busy(self) -> bool {
        self.0 & BUSY_FLAG != 0
    }
}

/// The six bytes returned by a measurement read.
///
/// Layout, MSB first:
///
/// ```text
/// byte 0      status (bit 7 = busy)
/// byte 1..=2  humidity[19:4]
/// byte 3      humidity[3:0] | temperature[19:16]
/// byte 4..=5  temperature[15:0]
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawSample(pub [u8; 6]);

impl RawSample {
    pub fn status(&self) -> Status {
        Status(self.0[0])
    }

    /// Returns `true` if the sensor flagged the response as not ready.
    pub fn is_busy(&self) -> bool {
        self.status().is_busy()
    }

    /// 20-bit relative humidity fraction.
    pub fn raw_humidity(&self) -> u32 {
        let [_, hum_hi, hum_mid, split, _, _] = self.0;
        (u32::from(hum_hi) << 12) | (u32::from(hum_mid) << 4) | (u32::from(split) >> 4)
    }

    /// 20-bit temperature fraction.
    pub fn raw_temperature(&self) -> u32 {
        let [_, _, _, split, temp_mid, temp_lo] = self.0;
        (u32::from(split & 0x0F) << 16) | (u32::from(temp_mid) << 8) | u32::from(temp_lo)
    }

    /// Decodes the sample into calibrated units.
    ///
    /// The busy flag is not checked here; see [`RawSample::is_busy`].
    pub fn reading(&self) -> Reading {
        Reading::from_raw(self.raw_humidity(), self.raw_temperature())
    }
}

/// Reading returned by the AHT21 sensor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub relative_humidity: f32,
}

impl Reading {
    /// Applies the datasheet scaling to raw 20-bit fractions.
    ///
    /// * humidity = raw * 100 / 2^20
    /// * temperature = raw * 200 / 2^20 - 50
    pub fn from_raw(raw_humidity: u32, raw_temperature: u32) -> Self {
        Reading {
            temperature: raw_temperature as f32 * 200.0 / FULL_SCALE - 50.0,
            relative_humidity: raw_humidity as f32 * 100.0 / FULL_SCALE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverse of the decoding formulas: packs raw fractions into a sample.
    fn encode(raw_humidity: u32, raw_temperature: u32) -> RawSample {
        RawSample([
            0x1C,
            (raw_humidity >> 12) as u8,
            (raw_humidity >> 4) as u8,
            (((raw_humidity & 0x0F) << 4) | ((raw_temperature >> 16) & 0x0F)) as u8,
            (raw_temperature >> 8) as u8,
            raw_temperature as u8,
        ])
    }

    fn raw_for(humidity: f32, temperature: f32) -> (u32, u32) {
        let raw_humidity = (humidity as f64 / 100.0 * 1_048_576.0).round() as u32;
        let raw_temperature = ((temperature as f64 + 50.0) / 200.0 * 1_048_576.0).round() as u32;
        (raw_humidity, raw_temperature)
    }

    #[test]
    fn test_status_busy_flag() {
        assert!(Status(0x80).is_busy());
        assert!(Status(0x98).is_busy());
        assert!(!Status(0x18).is_busy());
        assert!(!Status(0x00).is_busy());
    }

    #[test]
    fn test_bit_layout() {
        // humidity = 0x747AE, temperature = 0x5DC29
        let sample = RawSample([0x1C, 0x74, 0x7A, 0xE5, 0xDC, 0x29]);

        assert!(!sample.is_busy());
        assert_eq!(sample.raw_humidity(), 0x747AE);
        assert_eq!(sample.raw_temperature(), 0x5DC29);
    }

    #[test]
    fn test_split_byte_nibbles() {
        let sample = RawSample([0x00, 0x00, 0x00, 0xF0, 0x00, 0x00]);
        assert_eq!(sample.raw_humidity(), 0x0000F);
        assert_eq!(sample.raw_temperature(), 0);

        let sample = RawSample([0x00, 0x00, 0x00, 0x0F, 0x00, 0x00]);
        assert_eq!(sample.raw_humidity(), 0);
        assert_eq!(sample.raw_temperature(), 0xF0000);
    }

    #[test]
    fn test_max_raw_values() {
        let sample = RawSample([0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(sample.raw_humidity(), 0xFFFFF);
        assert_eq!(sample.raw_temperature(), 0xFFFFF);
    }

    #[test]
    fn test_scaling_boundaries() {
        assert_eq!(
            Reading::from_raw(0, 0),
            Reading {
                temperature: -50.0,
                relative_humidity: 0.0,
            }
        );
        assert_eq!(
            Reading::from_raw(1 << 20, 1 << 20),
            Reading {
                temperature: 150.0,
                relative_humidity: 100.0,
            }
        );
    }

    #[test]
    fn test_known_pairs_decode_back() {
        for (humidity, temperature) in [(45.5, 23.25), (0.5, -40.0), (99.0, 85.0), (62.1, 0.0)] {
            let (raw_humidity, raw_temperature) = raw_for(humidity, temperature);
            let reading = encode(raw_humidity, raw_temperature).reading();

            assert!(
                (reading.relative_humidity - humidity).abs() < 0.001,
                "humidity {} != {}",
                reading.relative_humidity,
                humidity
            );
            assert!(
                (reading.temperature - temperature).abs() < 0.001,
                "temperature {} != {}",
                reading.temperature,
                temperature
            );
        }
    }

    #[test]
    fn test_fixture_bytes() {
        // 45.5 %RH, 23.25 C
        let reading = RawSample([0x1C, 0x74, 0x7A, 0xE5, 0xDC, 0x29]).reading();

        assert!((reading.relative_humidity - 45.5).abs() < 0.001);
        assert!((reading.temperature - 23.25).abs() < 0.001);
    }
}
