use crate::common::geometry::{RectF, Shape};
use crate::render::gradient::Paint;
use crate::render::surface::Surface;
use crate::render::Layout;
use crate::style::{FrameKind, StyleConfig};

// Frame composer
//------------------------------------------------------------------------------

/// Draws the decorative border/banner/badge and the caption. The caption band
/// sits in the extra canvas height the layout reserved; `badge-top` is the
/// one kind whose band sits above the symbol.
pub(super) fn draw(surface: &mut impl Surface, layout: &Layout, config: &StyleConfig) {
    let Some(band) = layout.band else {
        return;
    };
    let frame = Paint::Solid(config.frame_color);
    let canvas = layout.canvas_box();
    match config.frame {
        FrameKind::None => {}
        FrameKind::Simple => {
            surface.stroke_shape(&Shape::Rect(canvas.inset(8.0)), 3.0, &frame);
            surface.fill_shape(&Shape::Rect(band), &frame);
            caption(surface, config, band, 0.45);
        }
        FrameKind::Rounded => {
            surface.stroke_shape(&Shape::rounded(canvas.inset(8.0), 16.0), 3.0, &frame);
            surface.fill_shape(&Shape::rounded(band, 10.0), &frame);
            caption(surface, config, band, 0.45);
        }
        FrameKind::BannerBottom => {
            // Standalone caption bar, detached from any border.
            let bar_w = band.w.min(layout.symbol.w * 0.8);
            let bar_h = band.h * 0.75;
            let (cx, _) = band.center();
            let bar = RectF::new(cx - bar_w / 2.0, band.y + (band.h - bar_h) / 2.0, bar_w, bar_h);
            surface.fill_shape(&Shape::rounded(bar, bar_h / 2.0), &frame);
            caption(surface, config, band, 0.4);
        }
        FrameKind::BadgeTop => {
            let pill_w = layout.symbol.w * 0.5;
            let pill_h = band.h * 0.6;
            let (cx, _) = band.center();
            let pill = RectF::new(cx - pill_w / 2.0, band.y + (band.h - pill_h) / 2.0, pill_w, pill_h);
            surface.fill_shape(&Shape::rounded(pill, pill_h / 2.0), &frame);
            surface.stroke_shape(&Shape::Rect(layout.symbol.inset(-20.0)), 2.0, &frame);
            caption(surface, config, band, 0.4);
        }
        FrameKind::Ticket => {
            surface.stroke_dashed(&Shape::rounded(canvas.inset(8.0), 14.0), 3.0, 10.0, 7.0, &frame);
            caption(surface, config, band, 0.4);
        }
        FrameKind::CircleBadge => {
            let (cx, cy) = layout.symbol.center();
            let r = layout.symbol.w * std::f32::consts::SQRT_2 / 2.0 + 16.0;
            surface.stroke_shape(&Shape::Circle { cx, cy, r }, 4.0, &frame);
            caption(surface, config, band, 0.5);
        }
        FrameKind::BoldBottom => {
            surface.stroke_shape(&Shape::rounded(canvas.inset(6.0), 18.0), 8.0, &frame);
            surface.fill_shape(&Shape::rounded(band, 8.0), &frame);
            caption(surface, config, band, 0.65);
        }
    }
}

/// Caption text, horizontally centered in the band, sized proportionally to
/// the band height and drawn in the frame's dedicated text color.
fn caption(surface: &mut impl Surface, config: &StyleConfig, band: RectF, scale: f32) {
    if config.caption.is_empty() {
        return;
    }
    let (cx, cy) = band.center();
    surface.draw_text(&config.caption, cx, cy, band.h * scale, config.caption_color);
}

#[cfg(test)]
mod frame_tests {
    use super::*;
    use crate::matrix::MatrixProvider;
    use crate::style::{Color, EcLevel};
    use test_case::test_case;

    fn rendered(config: &StyleConfig) -> image::RgbaImage {
        let mut provider = MatrixProvider::new();
        let matrix = provider.encode(&config.text, config.ec_level).clone();
        crate::render::render(&matrix, config).into_image()
    }

    #[test_case(FrameKind::Simple)]
    #[test_case(FrameKind::Rounded)]
    #[test_case(FrameKind::BannerBottom)]
    #[test_case(FrameKind::BadgeTop)]
    #[test_case(FrameKind::Ticket)]
    #[test_case(FrameKind::CircleBadge)]
    #[test_case(FrameKind::BoldBottom)]
    fn test_frames_leave_some_frame_colored_pixels(kind: FrameKind) {
        let fc = Color::rgb(180, 30, 30);
        let config = StyleConfig::default()
            .with_text("HELLO")
            .with_ec_level(EcLevel::H)
            .with_frame(kind, fc)
            .with_caption("SCAN ME", Color::WHITE);
        let img = rendered(&config);
        let hits = img.pixels().filter(|p| p.0[..3] == [180, 30, 30]).count();
        assert!(hits > 50, "{kind:?} drew {hits} frame pixels");
    }

    #[test]
    fn test_no_frame_draws_nothing() {
        let fc = Color::rgb(180, 30, 30);
        let mut config = StyleConfig::default().with_text("HELLO");
        config.frame_color = fc;
        let img = rendered(&config);
        assert_eq!(img.pixels().filter(|p| p.0[..3] == [180, 30, 30]).count(), 0);
    }

    #[test]
    fn test_caption_drawn_only_with_frame() {
        // Caption pixels appear in the band once a frame carries them.
        let config = StyleConfig::default()
            .with_text("HELLO")
            .with_frame(FrameKind::Simple, Color::BLACK)
            .with_caption("SCAN ME", Color::rgb(250, 240, 10));
        let img = rendered(&config);
        let caption_pixels = img.pixels().filter(|p| p.0[..3] == [250, 240, 10]).count();
        assert!(caption_pixels > 10, "caption not drawn");
    }
}
