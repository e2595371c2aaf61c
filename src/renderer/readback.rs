//! Texture-to-buffer readback helpers.

/// Bytes per RGBA8 texel.
pub(crate) const BYTES_PER_PIXEL: u32 = 4;

/// Row pitch for a texture copy of `width` RGBA8 pixels; wgpu requires
/// rows aligned to 256 bytes.
#[must_use]
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Copy `height` rows of `width` pixels out of a padded readback buffer.
pub(crate) fn strip_row_padding(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let padded = padded_bytes_per_row(width) as usize;
    let row = (width * BYTES_PER_PIXEL) as usize;
    let mut pixels = Vec::with_capacity(row * height as usize);
    for chunk in data.chunks(padded).take(height as usize) {
        pixels.extend_from_slice(&chunk[..row.min(chunk.len())]);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_256() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(1280), 5120);
    }

    #[test]
    fn padding_is_removed() {
        // 3 pixels wide: 12 bytes of data per 256-byte row.
        let mut data = vec![0xAAu8; 256 * 2];
        for (i, b) in data[..12].iter_mut().enumerate() {
            *b = i as u8;
        }
        data[256..268].fill(7);
        let pixels = strip_row_padding(&data, 3, 2);
        assert_eq!(pixels.len(), 24);
        assert_eq!(&pixels[..12], &(0..12).collect::<Vec<u8>>()[..]);
        assert!(pixels[12..].iter().all(|&b| b == 7));
    }
}
