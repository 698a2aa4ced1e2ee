use std::io::Read;

use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 32 bits per pixel, stored A, R, G, B.
    Argb8888,
    /// 16 bits per pixel, little-endian 5-6-5.
    Rgb565,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Argb8888 => 4,
            PixelFormat::Rgb565 => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub dither: bool,
    pub preferred_config: PixelFormat,
}

impl DecodeOptions {
    /// Options used for every preview decode.
    pub const PREVIEW: DecodeOptions = DecodeOptions {
        dither: false,
        preferred_config: PixelFormat::Argb8888,
    };
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::PREVIEW
    }
}

/// A decoded, owned pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub config: PixelFormat,
    pub pixels: Vec<u8>,
}

pub trait BitmapDecoder {
    type Bitmap;

    /// Decode a whole stream. `None` when the bytes are not a usable image.
    fn decode_stream(&self, stream: &mut dyn Read, options: &DecodeOptions) -> Option<Self::Bitmap>;
}

/// Decoder backed by the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDecoder;

impl BitmapDecoder for ImageDecoder {
    type Bitmap = Bitmap;

    fn decode_stream(&self, stream: &mut dyn Read, options: &DecodeOptions) -> Option<Bitmap> {
        let mut bytes = Vec::new();
        if let Err(e) = stream.read_to_end(&mut bytes) {
            warn!("Failed to read image stream: {}", e);
            return None;
        }
        let decoded = match image::load_from_memory(&bytes) {
            Ok(img) => img,
            Err(e) => {
                warn!("Failed to decode image ({} bytes): {}", bytes.len(), e);
                return None;
            }
        };

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let config = options.preferred_config;
        let mut pixels = Vec::with_capacity(width as usize * height as usize * config.bytes_per_pixel());
        for px in rgba.pixels() {
            let [r, g, b, a] = px.0;
            match config {
                PixelFormat::Argb8888 => pixels.extend_from_slice(&[a, r, g, b]),
                PixelFormat::Rgb565 => {
                    // No dithering: low bits are truncated.
                    let packed = (u16::from(r >> 3) << 11) | (u16::from(g >> 2) << 5) | u16::from(b >> 3);
                    pixels.extend_from_slice(&packed.to_le_bytes());
                }
            }
        }

        Some(Bitmap {
            width,
            height,
            config,
            pixels,
        })
    }
}
