use core::fmt;

pub const MAC_LEN: usize = 6;

/// A 48-bit hardware address as used by the ESP-NOW peer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddress(pub [u8; MAC_LEN]);

impl MacAddress {
    pub const BROADCAST: MacAddress = MacAddress([0xFF; MAC_LEN]);

    /// Parses `aa:bb:cc:dd:ee:ff` (either case).
    ///
    /// Usable in const context so configured addresses are checked
    /// when the firmware is built.
    pub const fn parse(text: &str) -> Option<MacAddress> {
        let bytes = text.as_bytes();
        // Six pairs of hex digits plus five separators
        if bytes.len() != MAC_LEN * 3 - 1 {
            return None;
        }

        let mut octets = [0u8; MAC_LEN];
        let mut i = 0;
        while i < MAC_LEN {
            let at = i * 3;
            if i > 0 && bytes[at - 1] != b':' {
                return None;
            }
            let high = match hex_value(bytes[at]) {
                Some(nibble) => nibble,
                None => return None,
            };
            let low = match hex_value(bytes[at + 1]) {
                Some(nibble) => nibble,
                None => return None,
            };
            octets[i] = (high << 4) | low;
            i += 1;
        }
        return Some(MacAddress(octets));
    }
}

const fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn parses_mixed_case() {
        assert_eq!(
            MacAddress::parse("24:0A:c4:12:fe:01"),
            Some(MacAddress([0x24, 0x0A, 0xC4, 0x12, 0xFE, 0x01]))
        );
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(MacAddress::parse(""), None);
        assert_eq!(MacAddress::parse("24:0a:c4:12:fe"), None);
        assert_eq!(MacAddress::parse("24-0a-c4-12-fe-01"), None);
        assert_eq!(MacAddress::parse("24:0a:c4:12:fe:0g"), None);
        assert_eq!(MacAddress::parse("24:0a:c4:12:fe:011"), None);
    }

    #[test]
    fn formats_lowercase_colon_separated() {
        let mac = MacAddress([0x24, 0x0A, 0xC4, 0x12, 0xFE, 0x01]);
        assert_eq!(mac.to_string(), "24:0a:c4:12:fe:01");
        assert_eq!(MacAddress::parse(&mac.to_string()), Some(mac));
    }

    #[test]
    fn broadcast() {
        assert_ne!(
            MacAddress::parse("ff:ff:ff:ff:ff:fe"),
            Some(MacAddress::BROADCAST)
        );
        assert_eq!(MacAddress::parse("ff:ff:ff:ff:ff:ff"), Some(MacAddress::BROADCAST));
    }
}
