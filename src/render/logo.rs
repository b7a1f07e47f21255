use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::common::error::{QraftError, QraftResult};
use crate::common::geometry::Shape;
use crate::render::gradient::{build_background, Paint};
use crate::render::surface::Surface;
use crate::render::Layout;
use crate::style::{LogoData, StyleConfig};

// Logo overlay
//------------------------------------------------------------------------------

/// Upload size ceiling for logo files.
pub const MAX_LOGO_BYTES: usize = 1 << 20;

impl LogoData {
    /// Boundary check for logo uploads. Oversized files are rejected whole;
    /// no partial state is retained.
    pub fn from_file_bytes(name: impl Into<String>, bytes: Vec<u8>) -> QraftResult<Self> {
        if bytes.len() > MAX_LOGO_BYTES {
            return Err(QraftError::LogoTooLarge(bytes.len()));
        }
        Ok(Self { name: name.into(), bytes })
    }
}

/// Decodes the uploaded bytes into a raster image. In the pipeline this is
/// the asynchronous step; its completion is guarded by a generation token.
pub fn decode_logo(data: &LogoData) -> QraftResult<RgbaImage> {
    let img = image::load_from_memory(&data.bytes).map_err(|_| QraftError::LogoDecodeFailed)?;
    Ok(img.to_rgba8())
}

/// Composites the logo at the symbol center: a background-colored separation
/// disc, a thin ring in the module's primary color, then the logo clipped to
/// its circle. Runs strictly after the frame so the logo sits on top.
pub fn composite_logo(
    surface: &mut impl Surface,
    layout: &Layout,
    config: &StyleConfig,
    logo: &RgbaImage,
) {
    let (cx, cy) = layout.symbol.center();
    let r = 0.11 * layout.symbol.w;
    let pad = Shape::Circle { cx, cy, r: r + 6.0 };
    let background = build_background(&config.background, layout.canvas_box());
    surface.erase_shape(&pad, background.as_ref());
    surface.stroke_shape(&pad, 2.0, &Paint::Solid(config.module_fill.primary()));
    let d = ((2.0 * r).round() as u32).max(1);
    let scaled = imageops::resize(logo, d, d, FilterType::Triangle);
    surface.composite_clipped(&scaled, cx, cy, r);
}

#[cfg(test)]
mod logo_tests {
    use super::*;
    use crate::style::Color;

    fn png_bytes(w: u32, h: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, image::Rgba(color));
        crate::export::to_png_bytes(&img).unwrap()
    }

    #[test]
    fn test_oversized_upload_rejected() {
        let bytes = vec![0u8; MAX_LOGO_BYTES + 1];
        let got = LogoData::from_file_bytes("big.png", bytes);
        assert_eq!(got, Err(QraftError::LogoTooLarge(MAX_LOGO_BYTES + 1)));
    }

    #[test]
    fn test_exact_limit_accepted() {
        let bytes = vec![0u8; MAX_LOGO_BYTES];
        assert!(LogoData::from_file_bytes("edge.png", bytes).is_ok());
    }

    #[test]
    fn test_decode_garbage_fails() {
        let data = LogoData { name: "junk.bin".into(), bytes: vec![1, 2, 3, 4] };
        assert_eq!(decode_logo(&data), Err(QraftError::LogoDecodeFailed));
    }

    #[test]
    fn test_overlay_centered_on_symbol() {
        let config = crate::style::StyleConfig::default().with_text("HELLO");
        let mut provider = crate::matrix::MatrixProvider::new();
        let matrix = provider.encode(&config.text, config.ec_level).clone();
        let mut surface = crate::render::render(&matrix, &config);

        let logo_png = png_bytes(64, 64, [10, 200, 60, 255]);
        let data = LogoData::from_file_bytes("logo.png", logo_png).unwrap();
        let logo = decode_logo(&data).unwrap();
        let layout = Layout::compute(&config, matrix.width());
        composite_logo(&mut surface, &layout, &config, &logo);

        let img = surface.into_image();
        let (cx, cy) = layout.symbol.center();
        assert_eq!(img.get_pixel(cx as u32, cy as u32).0[..3], [10, 200, 60]);
        // Separation disc shows background just inside the ring.
        let r = 0.11 * layout.symbol.w;
        assert_eq!(img.get_pixel((cx + r + 2.0) as u32, cy as u32).0[..3], [255, 255, 255]);
    }
}
