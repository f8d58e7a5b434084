//! Build-time configuration.
//!
//! Every value is read from the environment when the crate is compiled
//! (see `build.rs` for the list of variables) and parsed by `const fn`s,
//! so a malformed value fails the build rather than the boot.

use crate::{mac::MacAddress, payload::MAX_PAYLOAD_LEN};

pub const PMK_LEN: usize = 16;

pub const CHANNEL: u8 = {
    let channel = parse_u32(or_default(option_env!("ESPNOW_CHANNEL"), "1"));
    assert!(channel >= 1 && channel <= 14, "ESPNOW_CHANNEL must be 1..=14");
    channel as u8
};

pub const PEER_MAC: MacAddress = match MacAddress::parse(or_default(
    option_env!("ESPNOW_PEER_MAC"),
    "ff:ff:ff:ff:ff:ff",
)) {
    Some(mac) => mac,
    None => panic!("ESPNOW_PEER_MAC must look like aa:bb:cc:dd:ee:ff"),
};

pub const MESSAGE: &str = or_default(option_env!("ESPNOW_MESSAGE"), "Test");

pub const MESSAGE_LEN: usize = {
    let len = parse_u32(or_default(option_env!("ESPNOW_MESSAGE_LEN"), "16")) as usize;
    assert!(
        len >= 1 && len <= MAX_PAYLOAD_LEN,
        "ESPNOW_MESSAGE_LEN must be 1..=250"
    );
    len
};

pub const SEND_INTERVAL_MS: u64 = {
    let interval = parse_u32(or_default(option_env!("ESPNOW_SEND_INTERVAL_MS"), "500"));
    assert!(interval >= 1, "ESPNOW_SEND_INTERVAL_MS must be at least 1");
    interval as u64
};

pub const POWER_SAVE: bool = parse_bool(or_default(option_env!("ESPNOW_POWER_SAVE"), "false"));

pub const WAKE_WINDOW: u16 = {
    let window = parse_u32(or_default(option_env!("ESPNOW_WAKE_WINDOW"), "50"));
    assert!(window <= u16::MAX as u32, "ESPNOW_WAKE_WINDOW out of range");
    window as u16
};

pub const WAKE_INTERVAL: u16 = {
    let interval = parse_u32(or_default(option_env!("ESPNOW_WAKE_INTERVAL"), "100"));
    assert!(interval <= u16::MAX as u32, "ESPNOW_WAKE_INTERVAL out of range");
    interval as u16
};

pub const LONG_RANGE: bool = parse_bool(or_default(option_env!("ESPNOW_LONG_RANGE"), "false"));

/// Primary master key, generated or copied in by `build.rs`.
pub const PMK: [u8; PMK_LEN] = *include_bytes!(concat!(env!("OUT_DIR"), "/pmk.dat"));

/// All settings the radio bring-up and the node tasks need.
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    pub channel: u8,
    pub peer: MacAddress,
    pub pmk: [u8; PMK_LEN],
    pub power_save: bool,
    pub wake_window: u16,
    pub wake_interval: u16,
    pub long_range: bool,
}

impl RadioConfig {
    pub const fn from_build() -> Self {
        return Self {
            channel: CHANNEL,
            peer: PEER_MAC,
            pmk: PMK,
            power_save: POWER_SAVE,
            wake_window: WAKE_WINDOW,
            wake_interval: WAKE_INTERVAL,
            long_range: LONG_RANGE,
        };
    }
}

const fn or_default(value: Option<&'static str>, default: &'static str) -> &'static str {
    match value {
        Some(value) => value,
        None => default,
    }
}

pub(crate) const fn parse_u32(text: &str) -> u32 {
    let bytes = text.as_bytes();
    assert!(!bytes.is_empty(), "expected a number, got an empty string");

    let mut value: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        assert!(digit >= b'0' && digit <= b'9', "expected a decimal number");
        value = match value.checked_mul(10) {
            Some(value) => value,
            None => panic!("number out of range"),
        };
        value = match value.checked_add((digit - b'0') as u32) {
            Some(value) => value,
            None => panic!("number out of range"),
        };
        i += 1;
    }
    return value;
}

pub(crate) const fn parse_bool(text: &str) -> bool {
    if eq(text, "1") || eq(text, "y") || eq(text, "yes") || eq(text, "true") {
        return true;
    }
    if eq(text, "0") || eq(text, "n") || eq(text, "no") || eq(text, "false") {
        return false;
    }
    panic!("expected a boolean (true/false, y/n, 1/0)");
}

const fn eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    return true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(parse_u32("0"), 0);
        assert_eq!(parse_u32("500"), 500);
        assert_eq!(parse_u32("4294967295"), u32::MAX);
    }

    #[test]
    #[should_panic]
    fn number_overflow() {
        parse_u32("4294967296");
    }

    #[test]
    #[should_panic]
    fn number_garbage() {
        parse_u32("12ms");
    }

    #[test]
    fn booleans() {
        assert!(parse_bool("y"));
        assert!(parse_bool("true"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("no"));
    }

    #[test]
    fn build_values_are_consistent() {
        let config = RadioConfig::from_build();
        assert!((1..=14).contains(&config.channel));
        assert_eq!(config.pmk.len(), PMK_LEN);
        assert!(MESSAGE_LEN <= MAX_PAYLOAD_LEN);
        assert!(SEND_INTERVAL_MS >= 1);
    }
}
