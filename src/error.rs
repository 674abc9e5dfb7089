/// Possible errors from the AHT21 driver.
///
/// `E` is the error type of the underlying I2C bus.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aht21Error<E> {
    /// The sensor did not acknowledge a command write.
    NoAcknowledge(E),
    /// The sensor kept reporting busy for the whole polling window.
    Timeout,
    /// The 6-byte measurement response could not be read.
    ShortRead(E),
    /// The measurement response still had the busy flag set.
    Busy,
}

impl<E: core::fmt::Debug> core::fmt::Display for Aht21Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoAcknowledge(e) => write!(f, "command not acknowledged: {e:?}"),
            Self::Timeout => f.write_str("timed out waiting for measurement"),
            Self::ShortRead(e) => write!(f, "measurement read failed: {e:?}"),
            Self::Busy => f.write_str("sensor still busy after reporting ready"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Aht21Error<E> {}
