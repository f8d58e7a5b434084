//! ESP-NOW Example
//!
//! One node broadcasts a fixed text payload on an interval, the other
//! logs whatever arrives.

//% FEATURES: esp-wifi esp-wifi/wifi-default esp-wifi/wifi esp-wifi/utils esp-wifi/esp-now
//% CHIPS: esp32

#![no_std]

pub mod config;
pub mod error;
pub mod link;
pub mod mac;
pub mod payload;
pub mod radio;

pub use error::Error;
pub use mac::MacAddress;
pub use payload::Payload;
