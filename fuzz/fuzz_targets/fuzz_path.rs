#![no_main]

use libfuzzer_sys::fuzz_target;

use burrow::Path;

fuzz_target!(|data: &[u8]| {
    // Tokenization must never panic, and a parsed path must survive a
    // display/reparse cycle unchanged.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let parsed = Path::from(text);
    let reparsed = Path::from(parsed.to_string().as_str());
    assert_eq!(parsed, reparsed);
});
