use crate::common::geometry::{diamond, octagon, star, RectF, Shape};
use crate::matrix::{Matrix, FINDER_SPAN};
use crate::render::gradient::{build_background, Paint};
use crate::render::surface::Surface;
use crate::render::Layout;
use crate::style::{DotShape, RingShape, StyleConfig};

// Finder pattern renderer
//------------------------------------------------------------------------------

/// Repaints the three fixed 7x7 corner zones: background first (generic
/// module fill can bleed into the zones), then the stroked outer ring, then
/// the 3x3 center dot. Zone placement is structural and ignores styling.
pub(super) fn draw(
    surface: &mut impl Surface,
    matrix: &Matrix,
    layout: &Layout,
    config: &StyleConfig,
) {
    let background = build_background(&config.background, layout.canvas_box());
    let last = matrix.width() - FINDER_SPAN;
    for (zx, zy) in [(0, 0), (last, 0), (0, last)] {
        let zone = zone_box(layout, zx, zy);
        surface.erase_shape(&Shape::Rect(zone), background.as_ref());
        draw_ring(surface, zone, config);
        draw_dot(surface, zone, layout.module, config);
    }
}

fn zone_box(layout: &Layout, zx: usize, zy: usize) -> RectF {
    let s = layout.module;
    RectF::square(
        layout.symbol.x + zx as f32 * s,
        layout.symbol.y + zy as f32 * s,
        FINDER_SPAN as f32 * s,
    )
}

fn draw_ring(surface: &mut impl Surface, zone: RectF, config: &StyleConfig) {
    let outer = zone.w;
    let width = outer / FINDER_SPAN as f32;
    // Stroke centered half a module in, so the ring band covers exactly the
    // outermost module of the zone.
    let ring = zone.inset(width / 2.0);
    // "None" switches shape, never presence: dropping the ring would break
    // the 7:5:3 structure a scanner locks onto.
    let shape = match config.ring_shape {
        RingShape::None | RingShape::Square => Shape::Rect(ring),
        RingShape::Rounded => Shape::rounded(ring, outer * 0.25),
        RingShape::Circle => Shape::circle_in(ring),
        RingShape::Outpoint => Shape::rounded(ring, outer * 0.45),
        RingShape::Inpoint => octagon(ring, outer * 0.3),
    };
    surface.stroke_shape(&shape, width, &Paint::Solid(config.ring_color));
}

fn draw_dot(surface: &mut impl Surface, zone: RectF, module: f32, config: &StyleConfig) {
    let dot_box = RectF::square(zone.x + 2.0 * module, zone.y + 2.0 * module, 3.0 * module);
    let shape = match config.dot_shape {
        DotShape::None | DotShape::Square => Shape::Rect(dot_box),
        DotShape::Rounded => Shape::rounded(dot_box, 0.3 * dot_box.w),
        DotShape::Circle => Shape::circle_in(dot_box),
        DotShape::Diamond => diamond(dot_box),
        DotShape::Star => {
            let (cx, cy) = dot_box.center();
            star(cx, cy, dot_box.w / 2.0, 5, 0.45)
        }
    };
    surface.fill_shape(&shape, &Paint::Solid(config.dot_color));
}

#[cfg(test)]
mod finder_tests {
    use super::*;
    use crate::style::{Color, EcLevel, StyleConfig};
    use test_case::test_case;

    fn rendered(config: &StyleConfig) -> image::RgbaImage {
        let mut provider = crate::matrix::MatrixProvider::new();
        let matrix = provider.encode(&config.text, config.ec_level).clone();
        crate::render::render(&matrix, config).into_image()
    }

    #[test_case(RingShape::None)]
    #[test_case(RingShape::Square)]
    #[test_case(RingShape::Rounded)]
    #[test_case(RingShape::Circle)]
    #[test_case(RingShape::Outpoint)]
    #[test_case(RingShape::Inpoint)]
    fn test_ring_edge_midpoints_always_dark(shape: RingShape) {
        // Every ring shape covers the midpoints of the zone's edges, which is
        // what preserves the 1:1:3:1:1 scanline a reader samples.
        let config =
            StyleConfig::default().with_text("HELLO").with_ec_level(EcLevel::H).with_ring(shape, Color::BLACK);
        let img = rendered(&config);
        let mut provider = crate::matrix::MatrixProvider::new();
        let n = provider.encode("HELLO", EcLevel::H).width() as f32;
        let s = config.size as f32 / n;
        let zone_mid = 32.0 + 3.5 * s;
        let top_edge = 32.0 + s / 2.0;
        let px = img.get_pixel(zone_mid as u32, top_edge as u32);
        assert_eq!(px.0[..3], [0, 0, 0], "{shape:?} top ring edge missing");
    }

    #[test]
    fn test_zone_background_repainted() {
        // A dark background fill must be restored under the zone before the
        // ring is stroked; between ring and dot the zone shows background.
        let config = StyleConfig::default()
            .with_text("HELLO")
            .with_ec_level(EcLevel::H)
            .with_background(crate::style::Background::Solid(Color::rgb(200, 220, 240)));
        let img = rendered(&config);
        let mut provider = crate::matrix::MatrixProvider::new();
        let n = provider.encode("HELLO", EcLevel::H).width() as f32;
        let s = config.size as f32 / n;
        // 1.5 modules in: the light band between outer ring and center dot.
        let p = 32.0 + 1.5 * s;
        assert_eq!(img.get_pixel(p as u32, p as u32).0[..3], [200, 220, 240]);
    }
}
