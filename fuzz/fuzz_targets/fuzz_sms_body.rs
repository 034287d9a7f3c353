//! Fuzz target: alert body composition + modem body frame
//!
//! Builds an alert from arbitrary GPS bytes and encodes it as the modem
//! body frame. The frame must fit one SMS and must not contain the
//! CTRL-Z terminator or ESC.
//!
//! cargo fuzz run fuzz_sms_body

#![no_main]

use libfuzzer_sys::fuzz_target;
use smarthelmet::alert::location::LocationSnippet;
use smarthelmet::alert::messenger::{CTRL_Z, FRAME_CAP, ModemCommand};
use smarthelmet::app::service::{ALERT_PREFIX, compose_alert_body};

fuzz_target!(|data: &[u8]| {
    let body = compose_alert_body(&LocationSnippet::from_buffer(data));
    assert!(body.starts_with(ALERT_PREFIX));

    let frame = ModemCommand::Body(body.as_str()).encode();
    assert!(frame.len() <= FRAME_CAP);
    assert!(!frame.contains(&CTRL_Z));
    assert!(!frame.contains(&0x1B));

    // Raw text straight off the wire gets the same treatment.
    if let Ok(text) = core::str::from_utf8(data) {
        let frame = ModemCommand::Body(text).encode();
        assert!(frame.len() <= FRAME_CAP);
        assert!(!frame.contains(&CTRL_Z));
    }
});
