#![no_main]

use dcp_rs::{Frame, Telegram};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any input must decode or fail with an error, never panic
    if let Ok(frame) = Frame::decode(data) {
        // A decoded frame must encode, and the encoding must decode again
        if let Ok(bytes) = frame.encode() {
            let _ = Frame::decode(&bytes);
        }
    }

    // Same bytes seen as a bare telegram
    let _ = Telegram::decode(data);

    // Force the declared data length to match the buffer
    if data.len() >= 12 {
        let mut mutated = data.to_vec();
        let len = (data.len() - 12).min(u16::MAX as usize) as u16;
        mutated[10..12].copy_from_slice(&len.to_be_bytes());
        let _ = Telegram::decode(&mutated);
    }
});
