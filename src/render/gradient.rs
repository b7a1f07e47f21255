use crate::common::geometry::RectF;
use crate::style::{Background, Color, Fill, Gradient, GradientDirection};

// Gradient engine
//------------------------------------------------------------------------------

/// A fill resolved against a bounding box. Solid paints ignore position;
/// gradient paints interpolate between exactly two stops at 0 and 1.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Paint {
    Solid(Color),
    Linear { from: (f32, f32), to: (f32, f32), start: Color, end: Color },
    Radial { center: (f32, f32), radius: f32, start: Color, end: Color },
}

impl Paint {
    pub fn at(&self, x: f32, y: f32) -> Color {
        match *self {
            Paint::Solid(c) => c,
            Paint::Linear { from, to, start, end } => {
                let (dx, dy) = (to.0 - from.0, to.1 - from.1);
                let len2 = dx * dx + dy * dy;
                if len2 <= f32::EPSILON {
                    return start;
                }
                let t = ((x - from.0) * dx + (y - from.1) * dy) / len2;
                start.lerp(end, t)
            }
            Paint::Radial { center, radius, start, end } => {
                if radius <= f32::EPSILON {
                    return start;
                }
                let (dx, dy) = (x - center.0, y - center.1);
                let t = (dx * dx + dy * dy).sqrt() / radius;
                start.lerp(end, t)
            }
        }
    }
}

/// Resolves a module or frame fill once against the region it spans, so a
/// gradient reads continuously across the whole region instead of restarting
/// per cell.
pub fn build_fill(fill: &Fill, bbox: RectF) -> Paint {
    match fill {
        Fill::Solid(c) => Paint::Solid(*c),
        Fill::Gradient(g) => build_gradient(g, bbox),
    }
}

/// Background paint over its bounding box; `None` means fully transparent.
pub fn build_background(background: &Background, bbox: RectF) -> Option<Paint> {
    match background {
        Background::Solid(c) => Some(Paint::Solid(*c)),
        Background::Transparent => None,
        Background::Gradient(g) => Some(build_gradient(g, bbox)),
    }
}

fn build_gradient(g: &Gradient, bbox: RectF) -> Paint {
    let (start, end) = (g.start, g.end);
    match g.direction {
        GradientDirection::Horizontal => Paint::Linear {
            from: (bbox.x, bbox.y),
            to: (bbox.right(), bbox.y),
            start,
            end,
        },
        GradientDirection::Vertical => Paint::Linear {
            from: (bbox.x, bbox.y),
            to: (bbox.x, bbox.bottom()),
            start,
            end,
        },
        GradientDirection::Diagonal => Paint::Linear {
            from: (bbox.x, bbox.y),
            to: (bbox.right(), bbox.bottom()),
            start,
            end,
        },
        GradientDirection::Radial => Paint::Radial {
            center: bbox.center(),
            radius: bbox.w.max(bbox.h) / 2.0,
            start,
            end,
        },
    }
}

#[cfg(test)]
mod gradient_tests {
    use super::*;
    use test_case::test_case;

    const BOX: RectF = RectF { x: 10.0, y: 20.0, w: 100.0, h: 60.0 };

    #[test]
    fn test_horizontal_runs_left_to_right() {
        let g = Gradient {
            start: Color::rgb(0, 0, 0),
            end: Color::rgb(200, 0, 0),
            direction: GradientDirection::Horizontal,
        };
        let paint = build_fill(&Fill::Gradient(g), BOX);
        assert_eq!(paint.at(10.0, 50.0), Color::rgb(0, 0, 0));
        assert_eq!(paint.at(110.0, 50.0), Color::rgb(200, 0, 0));
        assert_eq!(paint.at(60.0, 50.0), Color::rgb(100, 0, 0));
        // Vertical movement does not change a horizontal ramp.
        assert_eq!(paint.at(60.0, 20.0), paint.at(60.0, 80.0));
    }

    #[test]
    fn test_radial_centered_on_box() {
        let g = Gradient {
            start: Color::rgb(10, 10, 10),
            end: Color::rgb(250, 250, 250),
            direction: GradientDirection::Radial,
        };
        let paint = build_fill(&Fill::Gradient(g), BOX);
        assert_eq!(paint.at(60.0, 50.0), Color::rgb(10, 10, 10));
        // Radius is half the larger dimension: 50.
        assert_eq!(paint.at(110.0, 50.0), Color::rgb(250, 250, 250));
    }

    #[test_case(GradientDirection::Horizontal)]
    #[test_case(GradientDirection::Vertical)]
    #[test_case(GradientDirection::Diagonal)]
    #[test_case(GradientDirection::Radial)]
    fn test_equal_stops_match_flat_fill(direction: GradientDirection) {
        let c = Color::rgb(12, 99, 180);
        let g = Gradient { start: c, end: c, direction };
        let paint = build_fill(&Fill::Gradient(g), BOX);
        let flat = build_fill(&Fill::Solid(c), BOX);
        for (x, y) in [(10.0, 20.0), (60.0, 50.0), (109.9, 79.9), (31.4, 27.1)] {
            assert_eq!(paint.at(x, y), flat.at(x, y));
        }
    }

    #[test]
    fn test_linear_clamps_outside_box() {
        let g = Gradient {
            start: Color::rgb(0, 0, 0),
            end: Color::rgb(100, 100, 100),
            direction: GradientDirection::Vertical,
        };
        let paint = build_fill(&Fill::Gradient(g), BOX);
        assert_eq!(paint.at(60.0, -500.0), Color::rgb(0, 0, 0));
        assert_eq!(paint.at(60.0, 500.0), Color::rgb(100, 100, 100));
    }
}
