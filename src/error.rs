use core::fmt;
use thiserror::Error;

/// The bring-up step an ESP-NOW driver call belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Driver,
    Channel,
    Protocol,
    WakeWindow,
    WakeInterval,
    Pmk,
    Peer,
    Send,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Driver => "esp-now init",
            Self::Channel => "set channel",
            Self::Protocol => "set protocol",
            Self::WakeWindow => "set wake window",
            Self::WakeInterval => "set wake interval",
            Self::Pmk => "set pmk",
            Self::Peer => "add peer",
            Self::Send => "send",
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[cfg(feature = "esp32")]
    #[error("wifi controller init failed: {0:?}")]
    Controller(esp_wifi::InitializationError),

    #[cfg(feature = "esp32")]
    #[error("{step} failed: {cause:?}")]
    EspNow {
        step: Step,
        cause: esp_wifi::esp_now::EspNowError,
    },

    #[error("{step} rejected by driver")]
    Rejected { step: Step },
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn step_names() {
        assert_eq!(Step::Protocol.to_string(), "set protocol");
        assert_eq!(Step::WakeInterval.to_string(), "set wake interval");
        assert_eq!(
            Error::Rejected { step: Step::Send }.to_string(),
            "send rejected by driver"
        );
    }
}
