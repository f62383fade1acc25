//! Decoding of SAP HANA's 16-byte wire DECIMAL into printable amounts.
//!
//! The export tools that dump HANA tables into CSV files receive DECIMAL columns
//! as 16 raw bytes each. [`WireDecimal`] wraps these bytes,
//! [`WireDecimal::decode`] splits them into sign, magnitude and exponent,
//! and [`DecodedDecimal::render`] produces the CSV field with four fractional digits.
//!
//! ```rust
//! use hdbdecimal::{format_wire_decimal, WireDecimal};
//!
//! let raw = [
//!     0x44, 0xd6, 0x12, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x38, 0x30,
//! ];
//! assert_eq!(WireDecimal::new(raw).decode().exponent(), -4);
//! assert_eq!(format_wire_decimal(&raw).unwrap(), "123.4500");
//! ```
//!
//! Besides that, the crate provides what the export tools share:
//! the [`ExportParams`] read from their `config.ini`,
//! and the [`delimiter`] conversion of text files.

#![deny(missing_debug_implementations)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

mod hdb_error;
mod params;
mod types_impl;

pub mod delimiter;
pub mod url;

pub use crate::hdb_error::{HdbError, HdbResult};
pub use crate::params::{ExportParams, ExportParamsBuilder, IniFile, DEFAULT_CONFIG_FILE};
pub use crate::types_impl::{
    decoded_decimal::{DecodedDecimal, Rendering, DISPLAY_SCALE},
    format_wire_decimal, format_wire_decimal_with,
    wire_decimal::{WireDecimal, EXPONENT_BIAS, WIRE_DECIMAL_LENGTH},
};
