use std::borrow::Cow;
use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};
use qrcode::render::svg;
use tracing::{debug, warn};

use crate::common::error::{QraftError, QraftResult};
use crate::matrix::encode_or_fallback;
use crate::style::StyleConfig;

// Export
//------------------------------------------------------------------------------

/// Encodes the composed surface as a PNG byte stream. Feeds file download
/// and the clipboard path.
pub fn to_png_bytes(img: &RgbaImage) -> QraftResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| QraftError::ImageEncodeFailed(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Flat vector export: re-invokes the encoder's own SVG serializer with the
/// module and background colors only. Pattern, corner styles, gradients,
/// frame and logo do not carry over to this path.
pub fn to_svg_string(config: &StyleConfig) -> String {
    let code = encode_or_fallback(&config.text, config.ec_level);
    let dark = config.module_fill.primary().to_hex();
    let light = config.background.primary().to_hex();
    code.render::<svg::Color>()
        .min_dimensions(config.size, config.size)
        .dark_color(svg::Color(&dark))
        .light_color(svg::Color(&light))
        .build()
}

/// Best-effort clipboard image copy. A failure is logged and swallowed; the
/// caller-visible outcome stays optimistic.
pub fn copy_to_clipboard(img: &RgbaImage) {
    match try_clipboard(img) {
        Ok(()) => debug!("image copied to clipboard"),
        Err(e) => warn!(error = %e, "clipboard image copy failed"),
    }
}

fn try_clipboard(img: &RgbaImage) -> QraftResult<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| QraftError::ClipboardUnavailable(e.to_string()))?;
    let data = arboard::ImageData {
        width: img.width() as usize,
        height: img.height() as usize,
        bytes: Cow::Borrowed(img.as_raw().as_slice()),
    };
    clipboard.set_image(data).map_err(|e| QraftError::ClipboardUnavailable(e.to_string()))
}

/// Download file name derived from the configuration label: lowercased,
/// non-alphanumerics collapsed to single dashes, with a fixed fallback stem.
pub fn export_file_name(label: &str, ext: &str) -> String {
    let mut stem = String::new();
    for ch in label.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            stem.push(ch.to_ascii_lowercase());
        } else if !stem.is_empty() && !stem.ends_with('-') {
            stem.push('-');
        }
    }
    let stem = stem.trim_end_matches('-');
    if stem.is_empty() {
        format!("qr-code.{ext}")
    } else {
        format!("{stem}.{ext}")
    }
}

#[cfg(test)]
mod export_tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_png_bytes_have_signature() {
        let img = RgbaImage::from_pixel(8, 8, image::Rgba([255, 0, 0, 255]));
        let bytes = to_png_bytes(&img).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }

    #[test]
    fn test_svg_export_uses_flat_colors_only() {
        let config = StyleConfig::default()
            .with_text("https://example.com/court/42")
            .with_module_fill(crate::style::Fill::Solid(crate::style::Color::rgb(0x12, 0x34, 0x56)));
        let svg = to_svg_string(&config);
        assert!(svg.starts_with("<?xml") || svg.starts_with("<svg"));
        assert!(svg.contains("#123456"));
        assert!(svg.contains("#ffffff"));
    }

    #[test]
    fn test_svg_export_survives_empty_text() {
        let config = StyleConfig::default().with_text("");
        let svg = to_svg_string(&config);
        assert!(svg.contains("svg"));
    }

    #[test_case("Court 4 booking", "png", "court-4-booking.png" ; "basic label")]
    #[test_case("  Padel @ Center!  ", "svg", "padel-center.svg" ; "trim and punctuation")]
    #[test_case("***", "png", "qr-code.png" ; "all punctuation fallback")]
    #[test_case("", "png", "qr-code.png" ; "empty label fallback")]
    #[test_case("MiXeD Case", "svg", "mixed-case.svg" ; "mixed case")]
    fn test_export_file_name(label: &str, ext: &str, expected: &str) {
        assert_eq!(export_file_name(label, ext), expected);
    }
}
