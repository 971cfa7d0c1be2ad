#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use pc98bmp::{DecodeRequest, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    // Must never panic
    let Ok(image) = DecodeRequest::new()
        .with_limits(&limits)
        .decode(&mut Cursor::new(data))
    else {
        return;
    };

    let (Some(header), Some(pixels)) = (image.header(), image.pixels()) else {
        panic!("full decode left a stage unloaded");
    };
    assert_eq!(pixels.len(), header.pixel_buffer_size as usize);
    assert!(header.row_stride_padded >= header.row_stride_unpadded);
    let _ = pixels.to_indices(header);
});
