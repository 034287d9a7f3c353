//! SIM800C text-mode SMS transmission.
//!
//! A message is four frames written in order, each followed by a fixed
//! pause for the modem to process it:
//!
//! | Frame       | Bytes                      | Pause after |
//! |-------------|----------------------------|-------------|
//! | `TextMode`  | `AT+CMGF=1\r\n`            | command     |
//! | `Compose`   | `AT+CMGS="<number>"\r\n`   | command     |
//! | `Body`      | message text               | command     |
//! | `Terminate` | `0x1A` (CTRL-Z)            | send        |
//!
//! Nothing is read back. The modem's `>` prompt and `+CMGS:` reply are
//! ignored and a failed write only produces a log line.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::app::service::SMS_BODY_CAP;
use crate::config::{PHONE_NUMBER_CAP, SystemConfig};
use crate::transport::SerialTransport;

/// Ends message composition and submits it.
pub const CTRL_Z: u8 = 0x1A;

/// Aborts composition on the SIM800.
const ESC: u8 = 0x1B;

/// Largest encoded frame (a full-length body).
pub const FRAME_CAP: usize = SMS_BODY_CAP;

pub type Frame = heapless::Vec<u8, FRAME_CAP>;

/// One step of the SMS command sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModemCommand<'a> {
    /// Select text mode.
    TextMode,
    /// Start a message to `number`.
    Compose { number: &'a str },
    /// Message text.
    Body(&'a str),
    /// CTRL-Z terminator.
    Terminate,
}

impl ModemCommand<'_> {
    /// Encode the exact bytes written to the modem.
    pub fn encode(&self) -> Frame {
        let mut frame = Frame::new();
        match self {
            Self::TextMode => {
                let _ = frame.extend_from_slice(b"AT+CMGF=1\r\n");
            }
            Self::Compose { number } => {
                let _ = frame.extend_from_slice(b"AT+CMGS=\"");
                let _ = frame.extend_from_slice(number.as_bytes());
                let _ = frame.extend_from_slice(b"\"\r\n");
            }
            Self::Body(text) => {
                // CTRL-Z or ESC inside the text would end or abort the
                // message early. Truncation keeps whole characters only.
                let mut utf8 = [0u8; 4];
                for c in text
                    .chars()
                    .filter(|&c| c != char::from(CTRL_Z) && c != char::from(ESC))
                {
                    if frame.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes()).is_err() {
                        break;
                    }
                }
            }
            Self::Terminate => {
                let _ = frame.push(CTRL_Z);
            }
        }
        frame
    }

    /// Short label for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TextMode => "CMGF",
            Self::Compose { .. } => "CMGS",
            Self::Body(_) => "body",
            Self::Terminate => "CTRL-Z",
        }
    }
}

/// The four frames of one SMS, in transmission order.
pub fn sms_sequence<'a>(number: &'a str, body: &'a str) -> [ModemCommand<'a>; 4] {
    [
        ModemCommand::TextMode,
        ModemCommand::Compose { number },
        ModemCommand::Body(body),
        ModemCommand::Terminate,
    ]
}

/// Fixed modem processing pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModemTiming {
    pub command_pause_ms: u32,
    pub send_pause_ms: u32,
}

impl ModemTiming {
    pub fn pause_after(&self, cmd: &ModemCommand<'_>) -> u32 {
        match cmd {
            ModemCommand::Terminate => self.send_pause_ms,
            _ => self.command_pause_ms,
        }
    }
}

/// Sends SMS alerts to one fixed number. Stateless between sends.
pub struct AlertMessenger {
    number: heapless::String<PHONE_NUMBER_CAP>,
    timing: ModemTiming,
}

impl AlertMessenger {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            number: config.alert_number.clone(),
            timing: ModemTiming {
                command_pause_ms: config.modem_command_pause_ms,
                send_pause_ms: config.modem_send_pause_ms,
            },
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn timing(&self) -> ModemTiming {
        self.timing
    }

    /// Write the full command sequence, pausing after each frame.
    ///
    /// Every pause runs to completion even if a write failed; the caller
    /// is blocked for the same time either way.
    pub fn send<T, D>(&self, modem: &mut T, delay: &mut D, body: &str)
    where
        T: SerialTransport,
        D: DelayNs,
    {
        let mut clean = true;
        for cmd in sms_sequence(&self.number, body) {
            let frame = cmd.encode();
            match modem.write(&frame) {
                Ok(n) if n == frame.len() => {}
                Ok(n) => {
                    warn!("modem: {} short write ({}/{} bytes)", cmd.name(), n, frame.len());
                    clean = false;
                }
                Err(e) => {
                    warn!("modem: {} write failed: {:?}", cmd.name(), e);
                    clean = false;
                }
            }
            if let Err(e) = modem.flush() {
                warn!("modem: {} flush failed: {:?}", cmd.name(), e);
                clean = false;
            }
            delay.delay_ms(self.timing.pause_after(&cmd));
        }

        if clean {
            info!("SMS handed to modem for {} ({} chars)", self.number, body.len());
        } else {
            warn!("SMS to {} may not have been sent", self.number);
        }
    }
}
