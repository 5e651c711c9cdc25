#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_decode", "fuzz/corpus/fuzz_roundtrip"] {
        fs::create_dir_all(dir).unwrap();

        // Minimal BMP 1x1 24-bit
        let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
        bmp[0] = b'B'; bmp[1] = b'M';
        bmp[2..6].copy_from_slice(&58u32.to_le_bytes()); // file size
        bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
        bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
        bmp[18..22].copy_from_slice(&1i32.to_le_bytes()); // width
        bmp[22..26].copy_from_slice(&1i32.to_le_bytes()); // height
        bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
        bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
        bmp[54] = 0xff; bmp[55] = 0x00; bmp[56] = 0x00; // BGR
        fs::write(format!("{dir}/bmp24_1x1.bmp"), &bmp).unwrap();

        // Same image stored top-down
        bmp[22..26].copy_from_slice(&(-1i32).to_le_bytes());
        fs::write(format!("{dir}/bmp24_1x1_topdown.bmp"), &bmp).unwrap();

        // 8-bit 3x3 gray ramp with identity palette
        let mut bmp8 = vec![0u8; 1078];
        bmp8[0] = b'B'; bmp8[1] = b'M';
        bmp8[2..6].copy_from_slice(&1087u32.to_le_bytes());
        bmp8[10..14].copy_from_slice(&1078u32.to_le_bytes());
        bmp8[14..18].copy_from_slice(&40u32.to_le_bytes());
        bmp8[18..22].copy_from_slice(&3u32.to_le_bytes());
        bmp8[22..26].copy_from_slice(&3u32.to_le_bytes());
        bmp8[26..28].copy_from_slice(&1u16.to_le_bytes());
        bmp8[28..30].copy_from_slice(&8u16.to_le_bytes());
        bmp8[34..38].copy_from_slice(&9u32.to_le_bytes());
        for i in 0..256usize {
            bmp8[54 + i * 4..54 + i * 4 + 3].fill(i as u8);
        }
        bmp8.extend_from_slice(&[0, 32, 64, 96, 128, 160, 192, 224, 255]);
        fs::write(format!("{dir}/bmp8_3x3.bmp"), &bmp8).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
        fs::write(format!("{dir}/bmp24_no_pixels.bin"), &bmp[..54]).unwrap();
    }

    println!("Generated seed corpora in fuzz/corpus/");
}
