#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn indexed_bmp(width: u32, height: u32, bpp: u16, colours: u32) -> Vec<u8> {
    let padded = (width * u32::from(bpp)).div_ceil(32) * 4;
    let data_offset = 54 + 4 * colours;
    let file_size = data_offset + padded * height;
    let mut bmp = vec![0u8; file_size as usize];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&file_size.to_le_bytes());
    bmp[10..14].copy_from_slice(&data_offset.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&(width as i32).to_le_bytes());
    bmp[22..26].copy_from_slice(&(height as i32).to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
    bmp[46..50].copy_from_slice(&colours.to_le_bytes());
    for (i, b) in bmp[data_offset as usize..].iter_mut().enumerate() {
        *b = (i % 7) as u8;
    }
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/bmp_1bpp_9x3.bmp"), indexed_bmp(9, 3, 1, 2)).unwrap();
    fs::write(format!("{dir}/bmp_4bpp_5x2.bmp"), indexed_bmp(5, 2, 4, 16)).unwrap();
    fs::write(format!("{dir}/bmp_8bpp_3x3.bmp"), indexed_bmp(3, 3, 8, 4)).unwrap();
    fs::write(format!("{dir}/bmp_16bpp_2x2.bmp"), indexed_bmp(2, 2, 16, 0)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut truncated = indexed_bmp(16, 16, 8, 2);
    truncated.truncate(100);
    fs::write(format!("{dir}/bmp_truncated.bmp"), truncated).unwrap();

    println!("Generated seed corpus in {dir}/");
}
