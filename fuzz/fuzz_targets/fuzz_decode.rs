#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmpfx::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };

    // Probing and both decoders must never panic
    let _ = ImageInfo::from_bytes(data);

    // Every transform must be total over whatever decodes
    if let Ok(mut img) = Bmp24Image::decode(data, Some(&limits), enough::Unstoppable) {
        img.negative();
        img.grayscale();
        img.brightness(-40);
        let _ = img.apply_filter(&Kernel::preset(KernelKind::Emboss));
        img.equalize();
    }
    if let Ok(mut img) = Bmp8Image::decode(data, Some(&limits), enough::Unstoppable) {
        img.negative();
        img.threshold(128);
        let _ = img.apply_filter(&Kernel::preset(KernelKind::Outline));
        img.equalize();
    }
});
