/// Monotonic millisecond time source.
///
/// Used to bound the status poll in wall-clock time. The counter may wrap;
/// the driver only looks at differences between two readings.
pub trait Clock {
    /// Current timestamp in milliseconds.
    fn now_ms(&mut self) -> u32;
}

impl<F> Clock for F
where
    F: FnMut() -> u32,
{
    fn now_ms(&mut self) -> u32 {
        self()
    }
}

/// [`Clock`] backed by [`std::time::Instant`], counting from its creation.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    pub fn new() -> Self {
        StdClock {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&mut self) -> u32 {
        // Truncation wraps after ~49 days, which the driver tolerates.
        self.origin.elapsed().as_millis() as u32
    }
}
