//! Fuzz target: `SerialEndpoint::handle_line` and `LineDecoder::push`
//!
//! Frames arbitrary bytes into lines and dispatches each one to the
//! device simulator. Asserts that nothing panics and that every response
//! carries a non-empty message.
//!
//! cargo fuzz run fuzz_serial_endpoint

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartdevice::protocol::endpoint::SerialEndpoint;
use smartdevice::protocol::line::{LineDecoder, MAX_LINE_LEN};
use smartdevice::simulator::DeviceSimulator;

fuzz_target!(|data: &[u8]| {
    let mut decoder = LineDecoder::new();
    let endpoint = SerialEndpoint::new();
    let mut sim = DeviceSimulator::default();

    for &byte in data {
        assert!(decoder.pending() <= MAX_LINE_LEN);
        if let Some(Ok(line)) = decoder.push(byte) {
            let resp = endpoint.handle_line(&line, &mut sim);
            assert!(!resp.msg.is_empty());
        }
    }

    decoder.reset();
    assert_eq!(decoder.pending(), 0);
});
