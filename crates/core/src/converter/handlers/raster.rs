//! Raster image handler.

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;
use tracing::debug;

use super::run_blocking;
use crate::converter::error::ConversionError;
use crate::converter::traits::Handler;
use crate::converter::types::{Category, HandlerJob};

/// Largest edge the ICO container can store.
const ICO_MAX_EDGE: u32 = 256;

/// Decodes with the declared source codec and re-encodes as 8-bit RGB.
#[derive(Debug, Default, Clone)]
pub struct ImageHandler;

impl ImageHandler {
    pub fn new() -> Self {
        Self
    }
}

/// Maps an extension to a codec compiled into this build.
fn codec_for(ext: &str) -> Result<ImageFormat, ConversionError> {
    ImageFormat::from_extension(ext).ok_or_else(|| ConversionError::unsupported(ext))
}

fn convert_image(
    source: &Path,
    output: &Path,
    source_ext: &str,
    target_ext: &str,
) -> Result<(), ConversionError> {
    let input_format = codec_for(source_ext)?;
    let output_format = codec_for(target_ext)?;
    if !input_format.reading_enabled() {
        return Err(ConversionError::unsupported(source_ext));
    }
    if !output_format.writing_enabled() {
        return Err(ConversionError::unsupported(target_ext));
    }

    let mut reader = ImageReader::open(source)?;
    reader.set_format(input_format);
    let decoded = reader
        .decode()
        .map_err(|e| ConversionError::decode(source_ext, e))?;
    debug!(
        "Decoded {}x{} {:?} image",
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    let mut rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
    if output_format == ImageFormat::Ico
        && (rgb.width() > ICO_MAX_EDGE || rgb.height() > ICO_MAX_EDGE)
    {
        rgb = rgb.thumbnail(ICO_MAX_EDGE, ICO_MAX_EDGE);
        debug!("Downscaled to {}x{} for ICO", rgb.width(), rgb.height());
    }
    // ICO entries are stored as RGBA PNGs; alpha stays fully opaque.
    if output_format == ImageFormat::Ico {
        rgb = DynamicImage::ImageRgba8(rgb.to_rgba8());
    }

    rgb.save_with_format(output, output_format).map_err(|e| match e {
        image::ImageError::IoError(io) => ConversionError::Io(io),
        image::ImageError::Unsupported(u) => ConversionError::unsupported(u.to_string()),
        other => ConversionError::conversion_failed(other.to_string(), None),
    })
}

#[async_trait]
impl Handler for ImageHandler {
    fn category(&self) -> Category {
        Category::Image
    }

    async fn handle(&self, job: &HandlerJob) -> Result<(), ConversionError> {
        let job = job.clone();
        run_blocking(move || {
            convert_image(
                &job.source_path,
                &job.output_path,
                &job.source_ext,
                &job.target_ext,
            )
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn job(dir: &TempDir, source: &str, output: &str, from: &str, to: &str) -> HandlerJob {
        HandlerJob {
            source_path: dir.path().join(source),
            output_path: dir.path().join(output),
            source_ext: from.to_string(),
            target_ext: to.to_string(),
        }
    }

    #[tokio::test]
    async fn test_png_with_alpha_to_jpg() {
        let dir = TempDir::new().unwrap();
        let img = RgbaImage::from_pixel(8, 5, Rgba([200, 10, 10, 128]));
        img.save(dir.path().join("x.png")).unwrap();

        let job = job(&dir, "x.png", "x_converted.jpg", "png", "jpg");
        ImageHandler::new().handle(&job).await.unwrap();

        let out = image::open(&job.output_path).unwrap();
        assert_eq!(out.dimensions(), (8, 5));
        assert!(!out.color().has_alpha());
    }

    #[tokio::test]
    async fn test_large_jpg_to_ico_is_downscaled() {
        let dir = TempDir::new().unwrap();
        let img = image::RgbImage::from_pixel(512, 300, image::Rgb([0, 128, 255]));
        img.save(dir.path().join("big.jpg")).unwrap();

        let job = job(&dir, "big.jpg", "big_converted.ico", "jpg", "ico");
        ImageHandler::new().handle(&job).await.unwrap();

        let out = image::open(&job.output_path).unwrap();
        assert_eq!(out.width(), 256);
        assert_eq!(out.height(), 150);
    }

    #[tokio::test]
    async fn test_ico_output_is_opaque() {
        let dir = TempDir::new().unwrap();
        let img = RgbaImage::from_pixel(16, 16, Rgba([10, 20, 30, 0]));
        img.save(dir.path().join("icon.png")).unwrap();

        let job = job(&dir, "icon.png", "icon_converted.ico", "png", "ico");
        ImageHandler::new().handle(&job).await.unwrap();

        let out = image::open(&job.output_path).unwrap().to_rgba8();
        assert_eq!(out.dimensions(), (16, 16));
        assert!(out.pixels().all(|p| p.0[3] == 255));
        assert_eq!(out.get_pixel(0, 0).0[..3], [10, 20, 30]);
    }

    #[tokio::test]
    async fn test_writes_by_target_ext_not_output_name() {
        let dir = TempDir::new().unwrap();
        image::RgbImage::new(3, 3).save(dir.path().join("s.png")).unwrap();

        let job = job(&dir, "s.png", ".s_converted.webp.partial", "png", "webp");
        ImageHandler::new().handle(&job).await.unwrap();

        let bytes = std::fs::read(&job.output_path).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::WebP);
    }

    #[tokio::test]
    async fn test_corrupt_source_is_decode_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.png"), b"definitely not a png").unwrap();

        let job = job(&dir, "bad.png", "bad_converted.jpg", "png", "jpg");
        let err = ImageHandler::new().handle(&job).await.unwrap_err();
        assert!(matches!(err, ConversionError::DecodeError { .. }), "{err:?}");
        assert!(!job.output_path.exists());
    }

    #[tokio::test]
    async fn test_unknown_extension_is_unsupported() {
        let dir = TempDir::new().unwrap();
        image::RgbImage::new(2, 2).save(dir.path().join("a.png")).unwrap();

        let job = job(&dir, "a.png", "a_converted.xyz", "png", "xyz");
        let err = ImageHandler::new().handle(&job).await.unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedFormat { .. }));
    }
}
