use crate::{error::Error, mac::MacAddress, payload::Payload};

/// A frame pulled off the receive queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub src: MacAddress,
    pub dst: MacAddress,
    pub payload: Payload,
}

/// What the driver reported once a queued frame went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    Delivered,
    Failed,
}

/// The parts of the ESP-NOW driver the node tasks use.
pub trait Radio {
    fn local_address(&self) -> MacAddress;

    /// Sends `data` and waits for the delivery status.
    ///
    /// `Err` means the driver refused the frame outright.
    fn send(&mut self, dst: &MacAddress, data: &[u8]) -> Result<SendStatus, Error>;

    /// Takes the oldest buffered frame, if any.
    fn receive(&mut self) -> Option<Frame>;
}

#[cfg(feature = "esp32")]
pub use self::esp::{setup, EspNowRadio};

#[cfg(feature = "esp32")]
mod esp {
    use super::{Frame, Radio, SendStatus};
    use crate::{
        config::RadioConfig,
        error::{Error, Step},
        mac::MacAddress,
        payload::Payload,
    };
    use esp_hal::{efuse::Efuse, peripherals::WIFI};
    use esp_wifi::{
        esp_now::{self, EspNow, EspNowError, PeerInfo},
        wifi::Protocol,
        EspWifiInitialization,
    };
    use esp_wifi_sys::include::{esp_wifi_connectionless_module_set_wake_interval, ESP_OK};

    pub struct EspNowRadio<'d> {
        esp_now: EspNow<'d>,
        local: MacAddress,
    }

    fn failed(step: Step) -> impl Fn(EspNowError) -> Error {
        move |cause| Error::EspNow { step, cause }
    }

    /// esp-wifi only wraps the wake window, the interval goes straight to the blob.
    fn set_wake_interval(interval: u16) -> Result<(), Error> {
        let res = unsafe { esp_wifi_connectionless_module_set_wake_interval(interval) };
        if res as u32 == ESP_OK {
            return Ok(());
        }
        return Err(Error::EspNow {
            step: Step::WakeInterval,
            cause: EspNowError::Error(esp_now::Error::from_code(res as u32)),
        });
    }

    /// Brings up ESP-NOW on an initialized WiFi controller and registers
    /// the configured peer. Any failing step aborts the bring-up.
    pub fn setup<'d>(
        init: &EspWifiInitialization,
        wifi: WIFI,
        config: &RadioConfig,
    ) -> Result<EspNowRadio<'d>, Error> {
        let esp_now = EspNow::new(init, wifi).map_err(failed(Step::Driver))?;
        match esp_now.get_version() {
            Ok(version) => log::info!("esp-now version {version}"),
            Err(err) => log::warn!("Unable to read esp-now version: {err:?}"),
        }

        esp_now
            .set_channel(config.channel)
            .map_err(failed(Step::Channel))?;

        // 802.11 b/g/n plus LR, so LR frames are both sent and heard
        if config.long_range {
            esp_now
                .set_protocol(Protocol::P802D11BGNLR.into())
                .map_err(failed(Step::Protocol))?;
        }

        if config.power_save {
            esp_now
                .set_wake_window(config.wake_window)
                .map_err(failed(Step::WakeWindow))?;
            set_wake_interval(config.wake_interval)?;
            log::info!(
                "Power save on: wake window {} ms, wake interval {} ms",
                config.wake_window,
                config.wake_interval
            );
        }

        esp_now.set_pmk(&config.pmk).map_err(failed(Step::Pmk))?;

        let peer = PeerInfo {
            peer_address: config.peer.0,
            lmk: None,
            channel: Some(config.channel),
            encrypt: false,
        };
        // The driver registers the broadcast address on its own
        if esp_now.peer_exists(&config.peer.0) {
            esp_now.modify_peer(peer).map_err(failed(Step::Peer))?;
        } else {
            esp_now.add_peer(peer).map_err(failed(Step::Peer))?;
        }
        log::info!("Peer {} registered on channel {}", config.peer, config.channel);

        return Ok(EspNowRadio {
            esp_now,
            local: MacAddress(Efuse::get_mac_address()),
        });
    }

    impl<'d> Radio for EspNowRadio<'d> {
        fn local_address(&self) -> MacAddress {
            return self.local;
        }

        fn send(&mut self, dst: &MacAddress, data: &[u8]) -> Result<SendStatus, Error> {
            let waiter = self
                .esp_now
                .send(&dst.0, data)
                .map_err(failed(Step::Send))?;
            return Ok(match waiter.wait() {
                Ok(()) => SendStatus::Delivered,
                Err(_) => SendStatus::Failed,
            });
        }

        fn receive(&mut self) -> Option<Frame> {
            let data = self.esp_now.receive()?;
            let len = (data.len as usize).min(data.data.len());
            return Some(Frame {
                src: MacAddress(data.info.src_address),
                dst: MacAddress(data.info.dst_address),
                payload: Payload::from_bytes(&data.data[0..len]),
            });
        }
    }
}
