#![cfg_attr(not(test), no_std)]
//! Blocking driver for the Sierra Wireless WISMO228 GSM/GPRS module.
//!
//! The module is scripted through its AT command set: every operation sends
//! one or more command lines and then scans the serial stream for the exact
//! replies it expects. On top of the power and registration lifecycle the
//! driver offers SMS, a GPRS bearer, one TCP session for HTTP GET/PUT and
//! SMTP, and clock and signal queries.
//!
//! ```ignore
//! use wismo_cellular::{prelude::*, config::Apn, Device};
//!
//! let mut modem = Device::new(uart, config);
//! modem.init()?;
//! modem.power_up()?;
//! modem.send_sms("+60123456789", "Hello")?;
//! modem.open_gprs(&Apn::new("internet"))?;
//! let len = modem.get_http("example.com", "/", 80, &mut buf)?;
//! modem.shutdown()?;
//! ```

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod base64;
mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod gprs;
pub mod gsm;
pub mod http;
pub mod module_timing;
pub mod notify;
pub mod prelude;
mod pwr;
pub mod retry;
pub mod scanner;
mod session;
pub mod signal;
pub mod sms;
pub mod smtp;
pub mod state;

#[cfg(test)]
mod test_helpers;

pub use client::Device;
pub use error::Error;
pub use state::ModuleState;
