#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use image_convert_lib::Runtime;
use lazy_static::lazy_static;

pub const RED: [u8; 3] = [255, 0, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];

// libvips can only be initialized once per process, so every test in a
// binary shares this runtime. It is never dropped.
lazy_static! {
    static ref RUNTIME: Mutex<Runtime> =
        Mutex::new(Runtime::init("image-convert-tests").expect("libvips should initialize"));
}

/// Locks the shared runtime for the duration of a test.
pub fn runtime() -> MutexGuard<'static, Runtime> {
    RUNTIME.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writes a binary PPM whose pixels come from `pixel(x, y)`.
pub fn write_ppm(path: &Path, width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 3]) {
    let mut bytes = format!("P6\n{width} {height}\n255\n").into_bytes();
    for y in 0..height {
        for x in 0..width {
            bytes.extend_from_slice(&pixel(x, y));
        }
    }
    std::fs::write(path, bytes).expect("write PPM fixture");
}

/// Writes a single-colour PPM.
pub fn write_solid_ppm(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    write_ppm(path, width, height, |_, _| rgb);
}

/// Writes `{name}.jpg` into `dir`, encoded by libvips from a generated PPM.
pub fn write_jpeg(
    runtime: &mut Runtime,
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    pixel: impl Fn(u32, u32) -> [u8; 3],
) -> PathBuf {
    let ppm = dir.join(format!("{name}.ppm"));
    write_ppm(&ppm, width, height, pixel);

    let jpeg = dir.join(format!("{name}.jpg"));
    let image = runtime.open(&ppm).expect("open PPM fixture");
    image.write(&jpeg).expect("encode JPEG fixture");
    jpeg
}

/// A busy pattern that does not compress away.
pub fn noise(x: u32, y: u32) -> [u8; 3] {
    let v = (x * 31 + y * 17) ^ (x * y);
    [v as u8, (v >> 2) as u8, (v << 3) as u8]
}

/// Cuts a file down to the first half of its bytes.
pub fn truncate_to_half(path: &Path) {
    let bytes = std::fs::read(path).expect("read fixture");
    std::fs::write(path, &bytes[..bytes.len() / 2]).expect("truncate fixture");
}

/// Asserts that a pixel is within `tolerance` of `expected` on every band.
pub fn assert_close(actual: &[f64], expected: [u8; 3], tolerance: f64) {
    assert!(actual.len() >= 3, "expected at least 3 bands, got {actual:?}");
    for (band, (&got, &want)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (got - f64::from(want)).abs() <= tolerance,
            "band {band}: got {got}, expected {want} ± {tolerance} (pixel {actual:?})"
        );
    }
}

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Width and height from a PNG file's IHDR chunk.
pub fn png_dimensions(path: &Path) -> (u32, u32) {
    let bytes = std::fs::read(path).expect("read PNG");
    assert!(bytes.len() > 24, "PNG too short");
    assert_eq!(&bytes[..8], &PNG_SIGNATURE[..], "not a PNG file");
    assert_eq!(&bytes[12..16], b"IHDR");
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    (width, height)
}
