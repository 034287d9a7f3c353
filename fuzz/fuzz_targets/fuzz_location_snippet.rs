//! Fuzz target: `LocationSnippet::from_buffer`
//!
//! Feeds arbitrary GPS-link bytes into the snippet classifier and asserts
//! that it never panics and never yields more than 80 characters.
//!
//! cargo fuzz run fuzz_location_snippet

#![no_main]

use libfuzzer_sys::fuzz_target;
use smarthelmet::alert::location::{FIX_MARKER, GPS_BUFFER_CAP, LocationSnippet, SNIPPET_CHARS};

fuzz_target!(|data: &[u8]| {
    // The extractor never hands over more than its buffer holds.
    let data = &data[..data.len().min(GPS_BUFFER_CAP)];

    let snippet = LocationSnippet::from_buffer(data);
    assert!(snippet.as_str().len() <= SNIPPET_CHARS);

    if let LocationSnippet::Sentence(text) = &snippet {
        assert!(text.as_bytes().starts_with(FIX_MARKER));
        assert!(text.is_ascii(), "snippet must be one byte per char");
    }
});
