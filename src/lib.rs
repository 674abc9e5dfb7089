//! AHT21 Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the AHT21 I2C temperature
//! and humidity sensor, built on top of the [`embedded-hal`] traits.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`I2c`] for bus access
//! - [`DelayNs`] for settling and polling delays
//!
//! and on a [`Clock`] that bounds the measurement poll in milliseconds. Any
//! `FnMut() -> u32` closure returning a millisecond tick works.
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` and logs bus activity
//! - `std`: Adds [`StdClock`] and `std::error::Error` for [`Aht21Error`]
//! - `linux`: Adds `Aht21::with_default_bus`, opening `/dev/i2c-1`
//!
//! # Usage
//!
//! ```ignore
//! let mut aht = Aht21::new(i2c, delay, || millis());
//! aht.init()?;
//! let reading = aht.read()?;
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`I2c`]: embedded_hal::i2c::I2c
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod aht21;
pub mod clock;
pub mod error;
pub mod sample;

pub use aht21::{Aht21, SENSOR_ADDRESS};
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::Clock;
pub use error::Aht21Error;
pub use sample::{RawSample, Reading, Status};
