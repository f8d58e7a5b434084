use rand::RngCore;
use std::{
    env,
    fs::File,
    io::{ErrorKind, Write},
    path::Path,
};

pub const PMK_SIZE: usize = 16;

fn main() {
    println!("cargo:rustc-link-arg-bins=-Tlinkall.x");
    println!("cargo:rustc-link-arg-bins=-Trom_functions.x");
    println!("cargo::rerun-if-changed=build.rs");

    // Values read by `option_env!` in src/config.rs
    for var in [
        "ESPNOW_CHANNEL",
        "ESPNOW_PEER_MAC",
        "ESPNOW_MESSAGE",
        "ESPNOW_MESSAGE_LEN",
        "ESPNOW_SEND_INTERVAL_MS",
        "ESPNOW_POWER_SAVE",
        "ESPNOW_WAKE_WINDOW",
        "ESPNOW_WAKE_INTERVAL",
        "ESPNOW_LONG_RANGE",
        "ESPNOW_PMK",
    ] {
        println!("cargo::rerun-if-env-changed={var}");
    }

    std::fs::create_dir_all("keys").expect("Unable to create keys directory");

    // Create primary master key. Both nodes must be built from the same
    // tree (or with the same ESPNOW_PMK) to share it.
    println!("cargo::rerun-if-changed=keys/pmk.dat");
    match env::var("ESPNOW_PMK") {
        Ok(pmk) => {
            if pmk.len() != PMK_SIZE {
                panic!("ESPNOW_PMK must be exactly {PMK_SIZE} bytes, got {}", pmk.len());
            }
            File::create("keys/pmk.dat")
                .and_then(|mut file| file.write_all(pmk.as_bytes()))
                .expect("Unable to write primary master key.");
        }
        Err(_) => match File::create_new("keys/pmk.dat") {
            Ok(mut file) => {
                let mut pmk = [0u8; PMK_SIZE];
                let mut rng = rand::thread_rng();
                rng.fill_bytes(&mut pmk);

                file.write_all(&pmk)
                    .expect("Unable to write primary master key.");
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
            Err(err) => panic!("{err:?}"),
        },
    }

    let pmk = std::fs::read("keys/pmk.dat").expect("Unable to read primary master key");
    if pmk.len() != PMK_SIZE {
        panic!("keys/pmk.dat must be exactly {PMK_SIZE} bytes, got {}", pmk.len());
    }

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    std::fs::copy("keys/pmk.dat", Path::new(&out_dir).join("pmk.dat"))
        .expect("Unable to stage primary master key");
}
