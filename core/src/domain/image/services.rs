use std::io::Cursor;

use image::{ImageError, ImageFormat, ImageReader, Limits};
use tracing::{debug, warn};

use crate::domain::{
    common::{ImageConfig, entities::app_errors::CoreError},
    image::value_objects::{UploadedImage, ValidatedImage},
};

/// Worst case bytes per pixel a decoder may allocate (16-bit RGBA).
const MAX_BYTES_PER_PIXEL: u64 = 8;

/// Checks that the upload is a decodable raster image within the configured
/// byte and pixel limits. Dimensions are read from the header before any
/// pixel buffer is allocated.
pub fn validate_image(
    upload: UploadedImage,
    config: &ImageConfig,
) -> Result<ValidatedImage, CoreError> {
    if upload.bytes.is_empty() {
        return Err(CoreError::EmptyImage);
    }

    if upload.bytes.len() > config.max_upload_bytes {
        return Err(CoreError::ImageTooLarge {
            size: upload.bytes.len(),
            max: config.max_upload_bytes,
        });
    }

    let format = image::guess_format(&upload.bytes).map_err(|e| {
        warn!(
            content_type = ?upload.content_type,
            file_name = ?upload.file_name,
            "Unrecognised image container: {}",
            e
        );
        CoreError::InvalidImage("unrecognised image format".to_string())
    })?;

    let (width, height) = ImageReader::with_format(Cursor::new(&upload.bytes[..]), format)
        .into_dimensions()
        .map_err(|e| decode_error(format, e))?;

    if u64::from(width) * u64::from(height) > config.max_pixels {
        warn!(format = ?format, width, height, "Uploaded image exceeds pixel limit");
        return Err(CoreError::ImageDimensionsTooLarge {
            width,
            height,
            max_pixels: config.max_pixels,
        });
    }

    let mut reader = ImageReader::with_format(Cursor::new(&upload.bytes[..]), format);
    reader.limits(decoder_limits(config));
    reader.decode().map_err(|e| match e {
        ImageError::Limits(_) => CoreError::ImageDimensionsTooLarge {
            width,
            height,
            max_pixels: config.max_pixels,
        },
        e => decode_error(format, e),
    })?;

    debug!(format = ?format, width, height, size = upload.bytes.len(), "Image validated");

    Ok(ValidatedImage::new(upload.bytes, format, width, height))
}

fn decoder_limits(config: &ImageConfig) -> Limits {
    let side = u32::try_from(config.max_pixels).unwrap_or(u32::MAX);

    let mut limits = Limits::default();
    limits.max_image_width = Some(side);
    limits.max_image_height = Some(side);
    limits.max_alloc = Some(config.max_pixels.saturating_mul(MAX_BYTES_PER_PIXEL));
    limits
}

fn decode_error(format: ImageFormat, e: ImageError) -> CoreError {
    warn!(format = ?format, "Failed to decode uploaded image: {}", e);
    CoreError::InvalidImage(format!("failed to decode image: {}", e))
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

    use super::*;

    fn limits(max_upload_bytes: usize) -> ImageConfig {
        ImageConfig {
            max_upload_bytes,
            ..Default::default()
        }
    }

    fn encode(format: ImageFormat) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([200, 120, 40])));
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_accepts_png() {
        let image = validate_image(UploadedImage::new(encode(ImageFormat::Png)), &limits(1024 * 1024))
            .expect("png should validate");

        assert_eq!(image.format(), ImageFormat::Png);
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.dimensions(), (4, 3));
    }

    #[test]
    fn test_accepts_jpeg() {
        let image = validate_image(UploadedImage::new(encode(ImageFormat::Jpeg)), &limits(1024 * 1024))
            .expect("jpeg should validate");

        assert_eq!(image.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_rejects_text() {
        let upload = UploadedImage::new(b"definitely not an image".to_vec())
            .with_content_type("image/jpeg");

        let err = validate_image(upload, &limits(1024)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidImage(_)));
    }

    #[test]
    fn test_rejects_truncated_png() {
        let mut bytes = encode(ImageFormat::Png);
        bytes.truncate(bytes.len() / 2);

        let err = validate_image(UploadedImage::new(bytes), &limits(1024 * 1024)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidImage(_)));
    }

    #[test]
    fn test_rejects_empty_upload() {
        let err = validate_image(UploadedImage::new(Vec::new()), &limits(1024)).unwrap_err();
        assert_eq!(err, CoreError::EmptyImage);
    }

    #[test]
    fn test_rejects_oversized_upload() {
        let bytes = encode(ImageFormat::Png);
        let size = bytes.len();

        let err = validate_image(UploadedImage::new(bytes), &limits(size - 1)).unwrap_err();
        assert_eq!(
            err,
            CoreError::ImageTooLarge {
                size,
                max: size - 1
            }
        );
    }

    #[test]
    fn test_data_url_uses_detected_mime() {
        let bytes = encode(ImageFormat::Png);
        let image = validate_image(
            UploadedImage::new(bytes).with_content_type("image/jpeg"),
            &limits(1024 * 1024),
        )
        .unwrap();

        let url = image.to_data_url();
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    fn encode_gray(width: u32, height: u32) -> Vec<u8> {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([0])));
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_rejects_too_many_pixels() {
        let config = ImageConfig {
            max_upload_bytes: 1024 * 1024,
            max_pixels: 10_000,
        };

        let err = validate_image(UploadedImage::new(encode_gray(20_000, 1)), &config).unwrap_err();

        assert_eq!(
            err,
            CoreError::ImageDimensionsTooLarge {
                width: 20_000,
                height: 1,
                max_pixels: 10_000
            }
        );
    }

    #[test]
    fn test_accepts_large_image_within_default_limits() {
        let bytes = encode_gray(4_000, 3_000);

        let image = validate_image(UploadedImage::new(bytes), &ImageConfig::default())
            .expect("12 megapixel image should validate");

        assert_eq!(image.dimensions(), (4_000, 3_000));
    }
}
