use std::path::Path;

use image::{ColorType, DynamicImage, ImageOutputFormat, imageops::FilterType};

use crate::api::error::AppError;

/// Decode → resize → JPEG re-encode pipeline.
///
/// Output is always JPEG at the configured quality, whatever the input
/// format was; the resize hits the exact requested dimensions, so any
/// aspect-ratio handling is the caller's business.
pub struct ResizeEngine {
    quality: u8,
}

impl ResizeEngine {
    pub fn new(quality: u8) -> Self {
        Self { quality }
    }

    /// Resize the image at `input` and write the JPEG artifact to `output`.
    ///
    /// Returns the encoded bytes so the caller can respond without reading
    /// the artifact back. Runs on the blocking pool: decode and resize are
    /// CPU-bound and can take a while for large images.
    pub async fn resize_to_jpeg(
        &self,
        input: &Path,
        output: &Path,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, AppError> {
        let input = input.to_path_buf();
        let output = output.to_path_buf();
        let quality = self.quality;

        tokio::task::spawn_blocking(move || {
            tracing::info!("Decoding staged image {}", input.display());

            // Staged files carry no extension, so sniff the format from content.
            let img = image::io::Reader::open(&input)
                .map_err(|e| AppError::Decode(format!("Failed to open image: {}", e)))?
                .with_guessed_format()
                .map_err(|e| AppError::Decode(format!("Failed to probe image format: {}", e)))?
                .decode()
                .map_err(|e| AppError::Decode(format!("Failed to decode image: {}", e)))?;

            tracing::info!("Decoded {}x{} image", img.width(), img.height());

            let resized = img.resize_exact(width, height, FilterType::Triangle);
            let jpeg = encode_jpeg(&resized, quality)?;

            std::fs::write(&output, &jpeg)
                .map_err(|e| AppError::Internal(format!("Failed to write artifact: {}", e)))?;

            tracing::info!("Resized image to {}x{}, saved {}", width, height, output.display());
            Ok(jpeg)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Resize task failed: {}", e)))?
    }
}

/// Encode to JPEG bytes. JPEG has no alpha channel and no deep color, so
/// anything beyond 8-bit RGB/luma is converted down first.
fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, AppError> {
    let img_rgb = match img.color() {
        ColorType::Rgba8
        | ColorType::Rgba16
        | ColorType::La8
        | ColorType::La16
        | ColorType::Rgba32F
        | ColorType::Rgb16
        | ColorType::Rgb32F => DynamicImage::ImageRgb8(img.to_rgb8()),
        ColorType::L16 => DynamicImage::ImageLuma8(img.to_luma8()),
        _ => img.clone(),
    };

    let mut out_data = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut out_data);
    img_rgb
        .write_to(&mut cursor, ImageOutputFormat::Jpeg(quality))
        .map_err(|e| AppError::Encode(format!("Failed to encode JPEG: {}", e)))?;
    Ok(out_data)
}
