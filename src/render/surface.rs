use std::sync::OnceLock;

use ab_glyph::{FontRef, PxScale};
use image::{Pixel, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use tracing::warn;

use crate::common::error::QraftResult;
use crate::common::geometry::Shape;
use crate::render::gradient::Paint;
use crate::style::Color;

// Drawing surface
//------------------------------------------------------------------------------

/// Capability interface over a 2D raster target. All style resolution happens
/// above this seam; a backend only needs coverage, compositing and text.
pub trait Surface {
    fn dimensions(&self) -> (u32, u32);

    /// Paints every covered pixel, alpha-blending over existing content.
    fn fill_shape(&mut self, shape: &Shape, paint: &Paint);

    /// Overwrites every covered pixel; `None` resets to fully transparent.
    /// Used to undo base-fill leakage before repainting a region.
    fn erase_shape(&mut self, shape: &Shape, paint: Option<&Paint>);

    /// Strokes the shape's outline with the given line width, centered on
    /// the boundary.
    fn stroke_shape(&mut self, shape: &Shape, width: f32, paint: &Paint);

    /// Dashed variant of [`Surface::stroke_shape`] with round caps.
    fn stroke_dashed(&mut self, shape: &Shape, width: f32, dash: f32, gap: f32, paint: &Paint);

    /// Composites `src` centered at (cx, cy), clipped to a circle of radius
    /// `r` around that center.
    fn composite_clipped(&mut self, src: &RgbaImage, cx: f32, cy: f32, r: f32);

    /// Draws a line of text centered at (cx, cy) at `px` pixels.
    fn draw_text(&mut self, text: &str, cx: f32, cy: f32, px: f32, color: Color);

    /// Encodes the current content as a PNG byte stream.
    fn export_raster(&self) -> QraftResult<Vec<u8>>;
}

pub struct RasterSurface {
    img: RgbaImage,
}

impl RasterSurface {
    pub fn new(w: u32, h: u32) -> Self {
        Self { img: RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 0])) }
    }

    pub fn from_image(img: RgbaImage) -> Self {
        Self { img }
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.img.width() as i64 || y >= self.img.height() as i64 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let mut px = *self.img.get_pixel(x, y);
        px.blend(&color.to_rgba());
        self.img.put_pixel(x, y, px);
    }

    fn put_pixel(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x < 0 || y < 0 || x >= self.img.width() as i64 || y >= self.img.height() as i64 {
            return;
        }
        self.img.put_pixel(x as u32, y as u32, color);
    }

    /// Pixel index range covered by [lo, hi) under center sampling.
    fn pixel_span(lo: f32, hi: f32) -> (i64, i64) {
        (((lo - 0.5).ceil()) as i64, ((hi - 0.5).ceil()) as i64)
    }

    fn for_each_covered(&mut self, shape: &Shape, mut f: impl FnMut(&mut Self, i64, i64, f32, f32)) {
        let b = shape.bounds();
        let (x0, x1) = Self::pixel_span(b.x, b.right());
        let (y0, y1) = Self::pixel_span(b.y, b.bottom());
        for py in y0..y1 {
            for px in x0..x1 {
                let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
                if shape.contains(cx, cy) {
                    f(self, px, py, cx, cy);
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.img.dimensions()
    }

    fn fill_shape(&mut self, shape: &Shape, paint: &Paint) {
        // Axis-aligned opaque rectangles take the imageproc fast path with
        // the same center-sampling pixel span as the generic loop.
        if let (Shape::Rect(r), Paint::Solid(c)) = (shape, paint) {
            if c.a == 255 {
                let (x0, x1) = Self::pixel_span(r.x, r.right());
                let (y0, y1) = Self::pixel_span(r.y, r.bottom());
                if x1 > x0 && y1 > y0 {
                    let rect = Rect::at(x0 as i32, y0 as i32)
                        .of_size((x1 - x0) as u32, (y1 - y0) as u32);
                    draw_filled_rect_mut(&mut self.img, rect, c.to_rgba());
                }
                return;
            }
        }
        self.for_each_covered(shape, |s, px, py, cx, cy| {
            s.blend_pixel(px, py, paint.at(cx, cy));
        });
    }

    fn erase_shape(&mut self, shape: &Shape, paint: Option<&Paint>) {
        self.for_each_covered(shape, |s, px, py, cx, cy| {
            let color = match paint {
                Some(p) => p.at(cx, cy).to_rgba(),
                None => Rgba([0, 0, 0, 0]),
            };
            s.put_pixel(px, py, color);
        });
    }

    fn stroke_shape(&mut self, shape: &Shape, width: f32, paint: &Paint) {
        let outer = shape.inset(-width / 2.0);
        let inner = shape.inset(width / 2.0);
        let b = outer.bounds();
        let (x0, x1) = Self::pixel_span(b.x, b.right());
        let (y0, y1) = Self::pixel_span(b.y, b.bottom());
        for py in y0..y1 {
            for px in x0..x1 {
                let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
                if outer.contains(cx, cy) && !inner.contains(cx, cy) {
                    self.blend_pixel(px, py, paint.at(cx, cy));
                }
            }
        }
    }

    fn stroke_dashed(&mut self, shape: &Shape, width: f32, dash: f32, gap: f32, paint: &Paint) {
        let step = (width / 2.0).max(0.75);
        let outline = shape.outline(step);
        let period = dash + gap;
        let mut travelled = 0.0;
        let mut prev: Option<(f32, f32)> = None;
        for (x, y) in outline {
            if let Some((px, py)) = prev {
                travelled += ((x - px).powi(2) + (y - py).powi(2)).sqrt();
            }
            prev = Some((x, y));
            if travelled % period < dash {
                let cap = Shape::Circle { cx: x, cy: y, r: width / 2.0 };
                self.for_each_covered(&cap, |s, px, py, ccx, ccy| {
                    s.put_pixel(px, py, paint.at(ccx, ccy).to_rgba());
                });
            }
        }
    }

    fn composite_clipped(&mut self, src: &RgbaImage, cx: f32, cy: f32, r: f32) {
        let (x0, x1) = Self::pixel_span(cx - r, cx + r);
        let (y0, y1) = Self::pixel_span(cy - r, cy + r);
        for py in y0..y1 {
            for px in x0..x1 {
                let (fx, fy) = (px as f32 + 0.5, py as f32 + 0.5);
                if (fx - cx).powi(2) + (fy - cy).powi(2) > r * r {
                    continue;
                }
                let sx = px - (cx - r).round() as i64;
                let sy = py - (cy - r).round() as i64;
                if sx < 0 || sy < 0 || sx >= src.width() as i64 || sy >= src.height() as i64 {
                    continue;
                }
                if px < 0 || py < 0 || px >= self.img.width() as i64 || py >= self.img.height() as i64
                {
                    continue;
                }
                let sp = *src.get_pixel(sx as u32, sy as u32);
                let mut dp = *self.img.get_pixel(px as u32, py as u32);
                dp.blend(&sp);
                self.img.put_pixel(px as u32, py as u32, dp);
            }
        }
    }

    fn draw_text(&mut self, text: &str, cx: f32, cy: f32, px: f32, color: Color) {
        let Some(font) = caption_font() else {
            warn!("caption font unavailable, skipping text");
            return;
        };
        let scale = PxScale::from(px);
        let (tw, th) = text_size(scale, font, text);
        let x = (cx - tw as f32 / 2.0).round() as i32;
        let y = (cy - th as f32 / 2.0).round() as i32;
        draw_text_mut(&mut self.img, color.to_rgba(), x, y, scale, font, text);
    }

    fn export_raster(&self) -> QraftResult<Vec<u8>> {
        crate::export::to_png_bytes(&self.img)
    }
}

/// Bundled caption face, loaded once. A missing or corrupt asset degrades to
/// caption-less frames rather than failing the render.
fn caption_font() -> Option<&'static FontRef<'static>> {
    static FONT: OnceLock<Option<FontRef<'static>>> = OnceLock::new();
    FONT.get_or_init(|| FontRef::try_from_slice(include_bytes!("../../assets/DejaVuSans.ttf")).ok())
        .as_ref()
}

#[cfg(test)]
mod surface_tests {
    use super::*;
    use crate::common::geometry::RectF;

    #[test]
    fn test_fill_rect_covers_exact_span() {
        let mut s = RasterSurface::new(20, 20);
        let shape = Shape::Rect(RectF::new(5.0, 5.0, 10.0, 10.0));
        s.fill_shape(&shape, &Paint::Solid(Color::BLACK));
        let img = s.into_image();
        assert_eq!(img.get_pixel(5, 5).0[3], 255);
        assert_eq!(img.get_pixel(14, 14).0[3], 255);
        assert_eq!(img.get_pixel(4, 5).0[3], 0);
        assert_eq!(img.get_pixel(15, 14).0[3], 0);
    }

    #[test]
    fn test_adjacent_cells_tile_without_gaps() {
        // Fractional cell sides must neither overlap nor leave seams.
        let mut s = RasterSurface::new(40, 10);
        let side = 9.7;
        for i in 0..4 {
            let shape = Shape::Rect(RectF::new(i as f32 * side, 0.0, side, 10.0));
            s.fill_shape(&shape, &Paint::Solid(Color::BLACK));
        }
        let img = s.into_image();
        for x in 0..38 {
            assert_eq!(img.get_pixel(x, 5).0[3], 255, "gap at column {x}");
        }
    }

    #[test]
    fn test_stroke_leaves_interior_empty() {
        let mut s = RasterSurface::new(30, 30);
        let shape = Shape::Rect(RectF::new(5.0, 5.0, 20.0, 20.0));
        s.stroke_shape(&shape, 2.0, &Paint::Solid(Color::BLACK));
        let img = s.into_image();
        assert_eq!(img.get_pixel(15, 15).0[3], 0);
        assert_eq!(img.get_pixel(15, 5).0[3], 255);
    }

    #[test]
    fn test_erase_resets_to_transparent() {
        let mut s = RasterSurface::new(10, 10);
        let all = Shape::Rect(RectF::new(0.0, 0.0, 10.0, 10.0));
        s.fill_shape(&all, &Paint::Solid(Color::BLACK));
        s.erase_shape(&Shape::Rect(RectF::new(2.0, 2.0, 3.0, 3.0)), None);
        let img = s.into_image();
        assert_eq!(img.get_pixel(3, 3).0[3], 0);
        assert_eq!(img.get_pixel(7, 7).0[3], 255);
    }

    #[test]
    fn test_caption_font_loads() {
        assert!(caption_font().is_some());
    }

    #[test]
    fn test_export_raster_is_png() {
        let mut s = RasterSurface::new(4, 4);
        s.fill_shape(&Shape::Rect(RectF::new(0.0, 0.0, 4.0, 4.0)), &Paint::Solid(Color::WHITE));
        let bytes = s.export_raster().unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }
}
