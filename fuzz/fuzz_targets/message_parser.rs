//! Fuzz target for IRC line parsing and dispatch
//!
//! Feeds arbitrary lines through the parser, the prefix and NAMES decoders
//! and the dispatcher, checking that none of them panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_client::{dispatch, parse_identity, parse_line, parse_names, DispatchContext};
use std::str;

fuzz_target!(|data: &[u8]| {
    // Only fuzz valid UTF-8 strings to focus on protocol-level issues
    if let Ok(input) = str::from_utf8(data) {
        if input.len() > 512 {
            return;
        }

        let _ = parse_identity(input);
        let _ = parse_names(input);

        if let Ok(msg) = parse_line(input) {
            let reparsed = parse_line(&msg.to_string());
            assert_eq!(reparsed.as_ref(), Ok(&msg));

            let _ = dispatch(&msg, &DispatchContext::new("fuzzer"));
        }

        let _ = slirc_client::IrcCodec::sanitize(input.to_string());
    }
});
