#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use pc98bmp::{FontRequest, Limits};

fuzz_target!(|input: (u8, u8, &[u8])| {
    let (glyph_width, glyph_height, data) = input;
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    // Must never panic
    let Ok(font) = FontRequest::new(glyph_width, glyph_height)
        .with_limits(&limits)
        .read(&mut Cursor::new(data))
    else {
        return;
    };
    assert!(font.tiles().len() <= 96);
    for byte in 0..=u8::MAX {
        assert!(font.glyph(byte).is_some());
    }
});
