#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmpfx::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };

    // If it decodes, re-encoding and decoding again must give identical pixels and headers
    if let Ok(decoded) = Bmp24Image::decode(data, Some(&limits), enough::Unstoppable) {
        let reencoded = decoded.encode(enough::Unstoppable).expect("re-encode failed");
        let decoded2 = Bmp24Image::decode(&reencoded, None, enough::Unstoppable)
            .expect("re-encoded data failed to decode");
        assert_eq!(decoded, decoded2, "24-bit roundtrip mismatch");
    }

    if let Ok(decoded) = Bmp8Image::decode(data, Some(&limits), enough::Unstoppable) {
        let reencoded = decoded.encode(enough::Unstoppable).expect("re-encode failed");
        let decoded2 = Bmp8Image::decode(&reencoded, None, enough::Unstoppable)
            .expect("re-encoded data failed to decode");
        assert_eq!(decoded.pixels(), decoded2.pixels(), "8-bit roundtrip mismatch");
    }
});
