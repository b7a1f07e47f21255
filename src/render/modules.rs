use crate::common::geometry::{RectF, Shape};
use crate::matrix::Matrix;
use crate::render::gradient::build_fill;
use crate::render::surface::Surface;
use crate::render::Layout;
use crate::style::{ModulePattern, StyleConfig};

// Module renderer
//------------------------------------------------------------------------------

/// Paints every "on" cell outside the finder zones. The fill is resolved once
/// over the full symbol box, not per cell, so gradients run continuously
/// across the symbol.
pub(super) fn draw(
    surface: &mut impl Surface,
    matrix: &Matrix,
    layout: &Layout,
    config: &StyleConfig,
) {
    let paint = build_fill(&config.module_fill, layout.symbol);
    let w = matrix.width();
    for y in 0..w {
        for x in 0..w {
            if !matrix.get(x, y) || matrix.in_finder_zone(x, y) {
                continue;
            }
            let shape = module_shape(config.pattern, layout.cell(x, y));
            surface.fill_shape(&shape, &paint);
        }
    }
}

fn module_shape(pattern: ModulePattern, cell: RectF) -> Shape {
    let s = cell.w;
    match pattern {
        ModulePattern::Square => Shape::Rect(cell),
        ModulePattern::Rounded => {
            let inner = cell.inset(0.1 * s);
            Shape::rounded(inner, 0.35 * inner.w)
        }
        ModulePattern::Dot => {
            let (cx, cy) = cell.center();
            Shape::Circle { cx, cy, r: 0.38 * s }
        }
        // Square along the top and right edges, curved at the bottom-left:
        // adjacent "on" cells read as a connected flow.
        ModulePattern::Classy => Shape::RoundedRect(cell, [0.0, 0.0, 0.0, 0.5 * s]),
        ModulePattern::ClassyRounded => {
            let inner = cell.inset(0.05 * s);
            Shape::rounded(inner, 0.4 * s)
        }
        ModulePattern::ExtraRounded => {
            let (cx, cy) = cell.center();
            Shape::Circle { cx, cy, r: 0.45 * s }
        }
    }
}

#[cfg(test)]
mod module_tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ModulePattern::Square)]
    #[test_case(ModulePattern::Rounded)]
    #[test_case(ModulePattern::Dot)]
    #[test_case(ModulePattern::Classy)]
    #[test_case(ModulePattern::ClassyRounded)]
    #[test_case(ModulePattern::ExtraRounded)]
    fn test_every_pattern_covers_cell_center(pattern: ModulePattern) {
        let cell = RectF::new(100.0, 100.0, 10.0, 10.0);
        let shape = module_shape(pattern, cell);
        let (cx, cy) = cell.center();
        assert!(shape.contains(cx, cy));
    }

    #[test]
    fn test_shapes_stay_inside_cell() {
        let cell = RectF::new(50.0, 50.0, 10.0, 10.0);
        for pattern in [
            ModulePattern::Square,
            ModulePattern::Rounded,
            ModulePattern::Dot,
            ModulePattern::Classy,
            ModulePattern::ClassyRounded,
            ModulePattern::ExtraRounded,
        ] {
            let b = module_shape(pattern, cell).bounds();
            assert!(b.x >= cell.x - 0.01 && b.right() <= cell.right() + 0.01, "{pattern:?}");
            assert!(b.y >= cell.y - 0.01 && b.bottom() <= cell.bottom() + 0.01, "{pattern:?}");
        }
    }

    #[test]
    fn test_classy_curves_only_bottom_left() {
        let cell = RectF::new(0.0, 0.0, 10.0, 10.0);
        let shape = module_shape(ModulePattern::Classy, cell);
        assert!(shape.contains(0.5, 0.5));
        assert!(shape.contains(9.5, 0.5));
        assert!(shape.contains(9.5, 9.5));
        assert!(!shape.contains(0.5, 9.5));
    }
}
