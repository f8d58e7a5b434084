//! The node tasks.
//!
//! Each role runs off `Node::tick`, called from the firmware's main loop
//! with the current time in milliseconds. A tick runs the role's periodic
//! work if it is due and then drains the receive queue.

use crate::{
    mac::MacAddress,
    payload::Payload,
    radio::{Frame, Radio, SendStatus},
};

/// Fires once per interval. The first check is always due.
#[derive(Debug, Clone)]
pub struct Interval {
    period_ms: u64,
    next: Option<u64>,
}
impl Interval {
    pub fn new(period_ms: u64) -> Self {
        return Self {
            period_ms,
            next: None,
        };
    }

    pub fn due(&mut self, now_ms: u64) -> bool {
        match self.next {
            Some(next) if now_ms < next => false,
            _ => {
                self.next = Some(now_ms.saturating_add(self.period_ms));
                true
            }
        }
    }
}

/// Sends the same payload to one peer on every interval.
pub struct Transmitter {
    interval: Interval,
    peer: MacAddress,
    payload: Payload,
    sent: u32,
    stopped: bool,
}
impl Transmitter {
    pub fn new(peer: MacAddress, payload: Payload, period_ms: u64) -> Self {
        return Self {
            interval: Interval::new(period_ms),
            peer,
            payload,
            sent: 0,
            stopped: false,
        };
    }

    /// Frames the driver accepted, delivered or not.
    pub fn sent(&self) -> u32 {
        return self.sent;
    }

    /// Set once the driver refuses a frame. Sending never resumes.
    pub fn is_stopped(&self) -> bool {
        return self.stopped;
    }

    pub fn tick<R: Radio>(&mut self, radio: &mut R, now_ms: u64) {
        if self.stopped || !self.interval.due(now_ms) {
            return;
        }

        match radio.send(&self.peer, self.payload.as_bytes()) {
            Ok(status) => {
                self.sent = self.sent.wrapping_add(1);
                if status == SendStatus::Failed {
                    log::warn!("Delivery to {} failed", self.peer);
                }
                log::info!(
                    "Sending message from {} to {}",
                    radio.local_address(),
                    self.peer
                );
                log::info!("Message: {}", self.payload.text());
            }
            Err(err) => {
                log::error!("Send error: {err}");
                self.stopped = true;
            }
        }
    }
}

/// Listens only; reports that it is alive on every interval.
pub struct Receiver {
    interval: Interval,
}
impl Receiver {
    pub fn new(period_ms: u64) -> Self {
        return Self {
            interval: Interval::new(period_ms),
        };
    }

    /// Returns whether a heartbeat line was logged.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.interval.due(now_ms) {
            return false;
        }
        log::info!("Waiting");
        return true;
    }
}

pub enum Role {
    Transmitter(Transmitter),
    Receiver(Receiver),
}

pub struct Node<R: Radio> {
    radio: R,
    role: Role,
}
impl<R: Radio> Node<R> {
    pub fn new(radio: R, role: Role) -> Self {
        return Self { radio, role };
    }

    pub fn role(&self) -> &Role {
        return &self.role;
    }

    pub fn radio(&self) -> &R {
        return &self.radio;
    }

    /// Runs one pass of the main loop and returns how many frames came in.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        match self.role {
            Role::Transmitter(ref mut transmitter) => transmitter.tick(&mut self.radio, now_ms),
            Role::Receiver(ref mut receiver) => {
                receiver.tick(now_ms);
            }
        }
        return drain(&mut self.radio);
    }
}

/// Logs every buffered frame.
pub fn drain<R: Radio>(radio: &mut R) -> usize {
    let mut count = 0;
    while let Some(frame) = radio.receive() {
        log_frame(&frame);
        count += 1;
    }
    return count;
}

/// Returns the text that was logged, `None` for a frame with no body.
pub fn log_frame(frame: &Frame) -> Option<&str> {
    if frame.payload.is_empty() {
        log::error!("Receive cb arg error");
        return None;
    }
    let text = frame.payload.text();
    log::info!("Receiving message from {} to {}", frame.src, frame.dst);
    log::info!("Message: {}", text);
    return Some(text);
}
