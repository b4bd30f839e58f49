#![no_main]

use libfuzzer_sys::fuzz_target;

use burrow::{dig, DigOptions};

fuzz_target!(|data: &[u8]| {
    // First line is the path, the rest is the document. Every combination
    // must resolve or fail without panicking, in both plain and writing
    // configurations.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (path, doc) = match text.split_once('\n') {
        Some(pair) => pair,
        None => (text, "{}"),
    };
    let mut value = match serde_json::from_str(doc) {
        Ok(value) => value,
        Err(_) => serde_json::json!({"k": [1, {"n": true}], "s": "x"}),
    };
    let _ = dig(&mut value, path, DigOptions::new().stack());
    let _ = dig(&mut value, path, DigOptions::new().make_path().set(0));
});
