use std::fmt::Write as _;
use std::io::Cursor;
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::error::{Result, ToolboxError};

pub const JPEG_QUALITY: u8 = 90;
pub const ICO_MAX_DIMENSION: u32 = 256;
/// Upper bound on either target side; the resize buffer is `w * h * 4` bytes.
pub const MAX_DIMENSION: u32 = 8192;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetFormat {
    Png,
    Jpeg,
    Ico,
    Svg,
}

impl FromStr for TargetFormat {
    type Err = ToolboxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(TargetFormat::Png),
            "jpg" | "jpeg" => Ok(TargetFormat::Jpeg),
            "ico" => Ok(TargetFormat::Ico),
            "svg" => Ok(TargetFormat::Svg),
            other => Err(ToolboxError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Decodes `image_data`, resizes it to exactly `width` x `height` and
/// re-encodes it as `format`.
pub fn convert_image(image_data: &[u8], format: TargetFormat, width: u32, height: u32) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(ToolboxError::invalid_input(format!(
            "target size must be positive, got {}x{}",
            width, height
        )));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(ToolboxError::invalid_input(format!(
            "target size is limited to {0}x{0}, got {1}x{2}",
            MAX_DIMENSION, width, height
        )));
    }
    if format == TargetFormat::Ico && (width > ICO_MAX_DIMENSION || height > ICO_MAX_DIMENSION) {
        return Err(ToolboxError::invalid_input(format!(
            "ico images are limited to {0}x{0}",
            ICO_MAX_DIMENSION
        )));
    }
    if image_data.is_empty() {
        return Err(ToolboxError::invalid_input("no image data"));
    }

    let img = image::load_from_memory(image_data)?;
    let resized = img.resize_exact(width, height, FilterType::Lanczos3);

    match format {
        TargetFormat::Png => encode_with(&resized, ImageFormat::Png),
        TargetFormat::Ico => encode_with(&DynamicImage::ImageRgba8(resized.to_rgba8()), ImageFormat::Ico),
        TargetFormat::Jpeg => encode_jpeg(&resized),
        TargetFormat::Svg => Ok(encode_svg(&resized).into_bytes()),
    }
}

fn encode_with(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)?;
    Ok(buffer)
}

fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>> {
    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;
    Ok(buffer)
}

/// Traces the bitmap into one `<rect>` per horizontal run of identical
/// pixels. Fully transparent pixels are skipped.
fn encode_svg(img: &DynamicImage) -> String {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut svg = String::new();

    let _ = write!(
        svg,
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#,
        w = width,
        h = height
    );

    for y in 0..height {
        let mut x = 0;
        while x < width {
            let pixel = *rgba.get_pixel(x, y);
            let mut run = 1;
            while x + run < width && *rgba.get_pixel(x + run, y) == pixel {
                run += 1;
            }

            let [r, g, b, a] = pixel.0;
            if a != 0 {
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="1" fill="rgb({},{},{})""#,
                    x, y, run, r, g, b
                );
                if a != u8::MAX {
                    let _ = write!(svg, r#" fill-opacity="{:.3}""#, a as f32 / 255.0);
                }
                svg.push_str("/>");
            }
            x += run;
        }
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, _| {
            if x % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 128])
            }
        });
        let mut buffer = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    mod format_tests {
        use super::*;

        #[test]
        fn parses_known_tags() {
            assert_eq!("png".parse::<TargetFormat>().unwrap(), TargetFormat::Png);
            assert_eq!("JPG".parse::<TargetFormat>().unwrap(), TargetFormat::Jpeg);
            assert_eq!("jpeg".parse::<TargetFormat>().unwrap(), TargetFormat::Jpeg);
            assert_eq!("ico".parse::<TargetFormat>().unwrap(), TargetFormat::Ico);
            assert_eq!("svg".parse::<TargetFormat>().unwrap(), TargetFormat::Svg);
        }

        #[test]
        fn rejects_unknown_tag() {
            let err = "tiff".parse::<TargetFormat>().unwrap_err();
            assert!(matches!(err, ToolboxError::UnsupportedFormat(ref f) if f == "tiff"));
        }
    }

    mod convert_tests {
        use super::*;

        #[test]
        fn png_output_has_requested_size() {
            let out = convert_image(&sample_png(8, 4), TargetFormat::Png, 16, 16).unwrap();
            assert_eq!(&out[..8], b"\x89PNG\r\n\x1a\n");
            let decoded = image::load_from_memory(&out).unwrap();
            assert_eq!(decoded.dimensions(), (16, 16));
        }

        #[test]
        fn jpeg_output_starts_with_soi_marker() {
            let out = convert_image(&sample_png(8, 8), TargetFormat::Jpeg, 10, 6).unwrap();
            assert_eq!(&out[..2], &[0xFF, 0xD8]);
            let decoded = image::load_from_memory(&out).unwrap();
            assert_eq!(decoded.dimensions(), (10, 6));
        }

        #[test]
        fn ico_output_has_icon_header() {
            let out = convert_image(&sample_png(8, 8), TargetFormat::Ico, 32, 32).unwrap();
            assert_eq!(&out[..4], &[0, 0, 1, 0]);
        }

        #[test]
        fn ico_rejects_oversized_target() {
            let err = convert_image(&sample_png(8, 8), TargetFormat::Ico, 512, 512).unwrap_err();
            assert!(matches!(err, ToolboxError::InvalidInput(_)));
        }

        #[test]
        fn svg_output_is_markup() {
            let out = convert_image(&sample_png(4, 4), TargetFormat::Svg, 4, 2).unwrap();
            let svg = String::from_utf8(out).unwrap();
            assert!(svg.starts_with(r#"<svg width="4" height="2""#));
            assert!(svg.ends_with("</svg>"));
            assert!(svg.contains("<rect"));
        }

        #[test]
        fn huge_target_is_rejected_before_resizing() {
            let png = sample_png(2, 2);
            let err = convert_image(&png, TargetFormat::Png, u32::MAX, u32::MAX).unwrap_err();
            assert!(matches!(err, ToolboxError::InvalidInput(_)));
            let err = convert_image(&png, TargetFormat::Svg, 4, MAX_DIMENSION + 1).unwrap_err();
            assert!(matches!(err, ToolboxError::InvalidInput(_)));
        }

        #[test]
        fn zero_dimension_is_rejected() {
            let err = convert_image(&sample_png(4, 4), TargetFormat::Png, 0, 4).unwrap_err();
            assert!(matches!(err, ToolboxError::InvalidInput(_)));
        }

        #[test]
        fn garbage_input_is_image_error() {
            let err = convert_image(b"definitely not an image", TargetFormat::Png, 4, 4).unwrap_err();
            assert!(matches!(err, ToolboxError::Image(_)));
        }

        #[test]
        fn empty_input_is_rejected() {
            let err = convert_image(&[], TargetFormat::Png, 4, 4).unwrap_err();
            assert!(matches!(err, ToolboxError::InvalidInput(_)));
        }
    }

    mod svg_tests {
        use super::*;

        #[test]
        fn merges_runs_of_identical_pixels() {
            let img = RgbaImage::from_pixel(5, 1, Rgba([10, 20, 30, 255]));
            let svg = encode_svg(&DynamicImage::ImageRgba8(img));
            assert_eq!(svg.matches("<rect").count(), 1);
            assert!(svg.contains(r#"width="5" height="1" fill="rgb(10,20,30)"/>"#));
        }

        #[test]
        fn skips_transparent_pixels() {
            let mut img = RgbaImage::from_pixel(3, 1, Rgba([0, 0, 0, 0]));
            img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
            let svg = encode_svg(&DynamicImage::ImageRgba8(img));
            assert_eq!(svg.matches("<rect").count(), 1);
            assert!(svg.contains(r#"x="1" y="0""#));
        }

        #[test]
        fn partial_alpha_sets_opacity() {
            let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 51]));
            let svg = encode_svg(&DynamicImage::ImageRgba8(img));
            assert!(svg.contains(r#"fill-opacity="0.200""#));
        }
    }
}
