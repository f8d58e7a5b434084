//! ESP-NOW Example
//!
//! Logs every frame that arrives from the configured peer.

//% FEATURES: esp-wifi esp-wifi/wifi-default esp-wifi/wifi esp-wifi/utils esp-wifi/esp-now
//% CHIPS: esp32

#![no_std]
#![no_main]

use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{prelude::*, rng::Rng, time, timer::timg::TimerGroup};
use esp_wifi::{init, EspWifiInitFor};
use espnow_hello::{
    config::{self, RadioConfig},
    link::{Node, Receiver, Role},
    radio, Error,
};

#[entry]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let peripherals = esp_hal::init({
        let mut config = esp_hal::Config::default();
        config.cpu_clock = CpuClock::max();
        config
    });

    esp_alloc::heap_allocator!(72 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);

    let init = match init(
        EspWifiInitFor::Wifi,
        timg0.timer0,
        Rng::new(peripherals.RNG),
        peripherals.RADIO_CLK,
    ) {
        Ok(init) => init,
        Err(err) => {
            let err = Error::Controller(err);
            log::error!("{err}");
            panic!("{err}");
        }
    };

    let radio = match radio::setup(&init, peripherals.WIFI, &RadioConfig::from_build()) {
        Ok(radio) => radio,
        Err(err) => {
            log::error!("{err}");
            panic!("{err}");
        }
    };

    let mut node = Node::new(radio, Role::Receiver(Receiver::new(config::SEND_INTERVAL_MS)));
    loop {
        node.tick(time::now().duration_since_epoch().to_millis());
    }
}
