use core::str;

/// Largest frame body ESP-NOW will carry (`ESP_NOW_MAX_DATA_LEN`).
pub const MAX_PAYLOAD_LEN: usize = 250;

/// A frame body. Nothing more than bytes; no length prefix, no framing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Payload {
    bytes: heapless::Vec<u8, MAX_PAYLOAD_LEN>,
}

impl Payload {
    /// Copies `text` into a buffer of exactly `len` bytes.
    ///
    /// Text longer than `len` is cut off and shorter text is padded with
    /// zeroes, so the result is not NUL terminated when `text` fills it.
    /// `len` is clamped to `MAX_PAYLOAD_LEN`.
    pub fn from_text(text: &str, len: usize) -> Self {
        let len = len.min(MAX_PAYLOAD_LEN);
        let mut bytes = heapless::Vec::new();
        // Cannot fail, len is within capacity
        let _ = bytes.resize(len, 0);
        let copied = text.len().min(len);
        bytes[..copied].copy_from_slice(&text.as_bytes()[..copied]);
        return Self { bytes };
    }

    /// Copies a received frame body. Anything past `MAX_PAYLOAD_LEN` is dropped.
    pub fn from_bytes(data: &[u8]) -> Self {
        let data = &data[..data.len().min(MAX_PAYLOAD_LEN)];
        let mut bytes = heapless::Vec::new();
        let _ = bytes.extend_from_slice(data);
        return Self { bytes };
    }

    pub fn as_bytes(&self) -> &[u8] {
        return &self.bytes;
    }

    pub fn len(&self) -> usize {
        return self.bytes.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.bytes.is_empty();
    }

    /// The printable part of the payload: everything before the first NUL,
    /// cut short at the first invalid UTF-8 sequence.
    pub fn text(&self) -> &str {
        let end = self
            .bytes
            .iter()
            .position(|byte| *byte == 0)
            .unwrap_or(self.bytes.len());
        let data = &self.bytes[..end];
        match str::from_utf8(data) {
            Ok(text) => text,
            Err(err) => {
                // Prefix up to valid_up_to is known good
                str::from_utf8(&data[..err.valid_up_to()]).unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_text() {
        let payload = Payload::from_text("Test", 8);
        assert_eq!(payload.as_bytes(), b"Test\0\0\0\0");
        assert_eq!(payload.text(), "Test");
    }

    #[test]
    fn truncates_long_text() {
        let payload = Payload::from_text("Test message", 4);
        assert_eq!(payload.len(), 4);
        assert_eq!(payload.text(), "Test");
    }

    #[test]
    fn length_is_capped() {
        let payload = Payload::from_text("x", 1000);
        assert_eq!(payload.len(), MAX_PAYLOAD_LEN);

        let received = Payload::from_bytes(&[b'a'; 300]);
        assert_eq!(received.len(), MAX_PAYLOAD_LEN);
    }

    #[test]
    fn text_stops_at_nul() {
        let payload = Payload::from_bytes(b"ab\0cd");
        assert_eq!(payload.len(), 5);
        assert_eq!(payload.text(), "ab");
    }

    #[test]
    fn text_keeps_valid_utf8_prefix() {
        let payload = Payload::from_bytes(&[b'o', b'k', 0xFF, b'z']);
        assert_eq!(payload.text(), "ok");
    }

    #[test]
    fn empty() {
        assert!(Payload::from_bytes(&[]).is_empty());
        assert_eq!(Payload::default().text(), "");
    }
}
