use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::VizError;
use crate::renderer::CapturedFrame;
use crate::style::Color;

/// Encoder turning a flattened image into file bytes.
pub type EncodeFn = fn(&RgbaImage) -> Result<Vec<u8>, VizError>;

/// Composite `frame` over an opaque `background`; every output pixel is
/// opaque.
#[must_use]
pub fn flatten(frame: &CapturedFrame, background: Color) -> RgbaImage {
    let [br, bg, bb, _] = background.to_rgba8();
    let mut out = RgbaImage::new(frame.width, frame.height);
    for (dst, src) in out.pixels_mut().zip(frame.pixels.chunks_exact(4)) {
        let a = u32::from(src[3]);
        let mix = |s: u8, b: u8| {
            ((u32::from(s) * a + u32::from(b) * (255 - a) + 127) / 255) as u8
        };
        dst.0 = [mix(src[0], br), mix(src[1], bg), mix(src[2], bb), 255];
    }
    out
}

/// Encode as PNG.
///
/// # Errors
///
/// Returns [`VizError::Encode`] if the encoder rejects the image.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, VizError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| VizError::Encode(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(pixels: Vec<u8>) -> CapturedFrame {
        CapturedFrame::new(2, 1, pixels).unwrap()
    }

    #[test]
    fn transparent_pixels_take_the_background() {
        let f = frame(vec![0, 0, 0, 0, 255, 0, 0, 255]);
        let img = flatten(&f, Color::WHITE);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn half_alpha_blends() {
        let f = frame(vec![0, 0, 0, 128, 0, 0, 0, 128]);
        let img = flatten(&f, Color::WHITE);
        assert_eq!(img.get_pixel(0, 0).0, [127, 127, 127, 255]);
    }

    #[test]
    fn png_signature() {
        let img = flatten(&frame(vec![9; 8]), Color::BLACK);
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }
}
