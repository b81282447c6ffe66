//! Test fixtures: PNG and non-PNG upload bodies.

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// PNG-signed bytes of `len` total length; `seed` makes the content unique.
pub fn create_png_of_len(seed: u8, len: usize) -> Vec<u8> {
    let mut png = create_minimal_png();
    png.resize(len.max(png.len()), seed);
    png
}

/// Plain text that only pretends to be a PNG by its filename.
pub fn create_fake_png() -> Vec<u8> {
    b"this is not an image".to_vec()
}
