//! Driver for the Texas Instruments DAC80501, DAC70501 and DAC60501
//! single channel 16/14/12 bit I2C DACs
//!
//! The driver tracks the reference voltage, output buffer gain and reference
//! divider of the chip, so the output can be set directly in volts. Codes for
//! the 14 and 12 bit parts are left-aligned in the 16 bit data register, which
//! lets the 16 bit conversion drive every member of the family.
//!
//! ```
//! use dacx0501::{Address, Dacx0501};
//! use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
//!
//! let i2c = Mock::new(&[Transaction::write(0x48, vec![0x08, 0x80, 0x00])]);
//! let mut dac = Dacx0501::new(i2c, Address::Agnd);
//!
//! // 2.5V reference with a buffer gain of 2, midscale
//! dac.set_voltage(2.5).unwrap();
//! dac.destroy().done();
//! ```
//!
//! Neither driver is safe to use from several contexts at once, every method
//! takes `&mut self`. Several chips on one physical bus are shared with the
//! bus wrappers from `embedded-hal-bus`.

#![deny(unsafe_code, missing_docs)]
#![no_std]

#[macro_use]
mod fmt;

pub mod conversion;
mod driver;
pub mod registers;

pub use conversion::{BufferGain, DeviceState, ReferenceDivider};
pub use registers::{Address, Command, Variant};

#[cfg(feature = "sync")]
pub use driver::Dacx0501;
#[cfg(feature = "async")]
pub use driver::Dacx0501Async;

/// Errors for this crate
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// I2C communication error, including NACKs and short reads
    I2c(E),
}
