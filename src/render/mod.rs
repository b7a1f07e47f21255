mod finder;
mod frame;
mod logo;
mod modules;

pub mod gradient;
pub mod surface;

pub use logo::{composite_logo, decode_logo, MAX_LOGO_BYTES};

use image::RgbaImage;
use tracing::debug;

use crate::common::geometry::{RectF, Shape};
use crate::matrix::Matrix;
use crate::render::gradient::build_background;
use crate::render::surface::{RasterSurface, Surface};
use crate::style::{FrameKind, StyleConfig};

// Render pipeline
//------------------------------------------------------------------------------

/// Quiet padding around the symbol, per side.
pub const QUIET_PAD: u32 = 32;
/// Height of the caption band a frame reserves.
pub const CAPTION_BAND: u32 = 54;
/// Outer padding between the caption band and the canvas edge.
pub const FRAME_PAD: u32 = 16;
/// Extra canvas height any frame kind other than `None` adds.
pub const FRAME_EXTRA: u32 = CAPTION_BAND + FRAME_PAD;

/// Pixel-space placement of the symbol, caption band and module grid for one
/// render pass.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Layout {
    pub canvas_w: u32,
    pub canvas_h: u32,
    /// The symbol square, in canvas coordinates.
    pub symbol: RectF,
    /// Side of one module in pixels.
    pub module: f32,
    /// Caption band region; present only when a frame is selected.
    pub band: Option<RectF>,
}

impl Layout {
    pub fn compute(config: &StyleConfig, module_count: usize) -> Layout {
        let size = config.size as f32;
        let canvas_w = config.size + 2 * QUIET_PAD;
        let framed = config.frame != FrameKind::None;
        let canvas_h = canvas_w + if framed { FRAME_EXTRA } else { 0 };
        // badge-top is the one frame whose band sits above the symbol.
        let band_on_top = config.frame == FrameKind::BadgeTop;
        let symbol_y = QUIET_PAD as f32 + if band_on_top { FRAME_EXTRA as f32 } else { 0.0 };
        let symbol = RectF::square(QUIET_PAD as f32, symbol_y, size);
        let band = framed.then(|| {
            let y = if band_on_top {
                FRAME_PAD as f32
            } else {
                (canvas_h - FRAME_PAD - CAPTION_BAND) as f32
            };
            RectF::new(
                FRAME_PAD as f32,
                y,
                (canvas_w - 2 * FRAME_PAD) as f32,
                CAPTION_BAND as f32,
            )
        });
        Layout { canvas_w, canvas_h, symbol, module: size / module_count as f32, band }
    }

    pub fn canvas_box(&self) -> RectF {
        RectF::new(0.0, 0.0, self.canvas_w as f32, self.canvas_h as f32)
    }

    /// Pixel box of module (x, y).
    pub fn cell(&self, x: usize, y: usize) -> RectF {
        RectF::square(
            self.symbol.x + x as f32 * self.module,
            self.symbol.y + y as f32 * self.module,
            self.module,
        )
    }
}

/// Pure render pass: background, data modules, finder patterns, frame. The
/// logo is composited separately by the pipeline once its decode completes
/// (see [`composite_logo`]).
pub fn render(matrix: &Matrix, config: &StyleConfig) -> RasterSurface {
    let layout = Layout::compute(config, matrix.width());
    debug!(
        canvas_w = layout.canvas_w,
        canvas_h = layout.canvas_h,
        modules = matrix.width(),
        "render pass"
    );
    let mut surface = RasterSurface::new(layout.canvas_w, layout.canvas_h);
    if let Some(background) = build_background(&config.background, layout.canvas_box()) {
        surface.fill_shape(&Shape::Rect(layout.canvas_box()), &background);
    }
    modules::draw(&mut surface, matrix, &layout, config);
    finder::draw(&mut surface, matrix, &layout, config);
    frame::draw(&mut surface, &layout, config);
    surface
}

/// Convenience wrapper producing the finished bitmap.
pub fn render_image(matrix: &Matrix, config: &StyleConfig) -> RgbaImage {
    render(matrix, config).into_image()
}
