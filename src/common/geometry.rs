// Geometry primitives for the raster surface
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn square(x: f32, y: f32, side: f32) -> Self {
        Self { x, y, w: side, h: side }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Positive `d` shrinks the rect on every side; width and height never
    /// go negative.
    pub fn inset(&self, d: f32) -> RectF {
        let w = (self.w - 2.0 * d).max(0.0);
        let h = (self.h - 2.0 * d).max(0.0);
        RectF { x: self.x + d, y: self.y + d, w, h }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Closed shapes the surface can fill or stroke. Rounded-rect radii are
/// ordered top-left, top-right, bottom-right, bottom-left, which lets a
/// single variant express symmetric rounding as well as single-corner cuts.
#[derive(Debug, PartialEq, Clone)]
pub enum Shape {
    Rect(RectF),
    RoundedRect(RectF, [f32; 4]),
    Circle { cx: f32, cy: f32, r: f32 },
    Polygon(Vec<(f32, f32)>),
}

impl Shape {
    pub fn rounded(rect: RectF, r: f32) -> Shape {
        Shape::RoundedRect(rect, [r, r, r, r])
    }

    pub fn circle_in(rect: RectF) -> Shape {
        let (cx, cy) = rect.center();
        Shape::Circle { cx, cy, r: rect.w.min(rect.h) / 2.0 }
    }

    pub fn bounds(&self) -> RectF {
        match self {
            Shape::Rect(r) => *r,
            Shape::RoundedRect(r, _) => *r,
            Shape::Circle { cx, cy, r } => RectF::new(cx - r, cy - r, 2.0 * r, 2.0 * r),
            Shape::Polygon(pts) => {
                let mut min = (f32::MAX, f32::MAX);
                let mut max = (f32::MIN, f32::MIN);
                for &(x, y) in pts {
                    min = (min.0.min(x), min.1.min(y));
                    max = (max.0.max(x), max.1.max(y));
                }
                RectF::new(min.0, min.1, max.0 - min.0, max.1 - min.1)
            }
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        match self {
            Shape::Rect(r) => r.contains(x, y),
            Shape::RoundedRect(r, radii) => rounded_rect_contains(r, radii, x, y),
            Shape::Circle { cx, cy, r } => {
                let (dx, dy) = (x - cx, y - cy);
                dx * dx + dy * dy <= r * r
            }
            Shape::Polygon(pts) => polygon_contains(pts, x, y),
        }
    }

    /// Shrinks the shape by `d` (negative `d` grows it). Used to derive the
    /// inner and outer boundaries of a stroked outline.
    pub fn inset(&self, d: f32) -> Shape {
        match self {
            Shape::Rect(r) => Shape::Rect(r.inset(d)),
            Shape::RoundedRect(r, radii) => {
                let radii = radii.map(|rad| if rad > 0.0 { (rad - d).max(0.0) } else { 0.0 });
                Shape::RoundedRect(r.inset(d), radii)
            }
            Shape::Circle { cx, cy, r } => Shape::Circle { cx: *cx, cy: *cy, r: (r - d).max(0.0) },
            Shape::Polygon(pts) => Shape::Polygon(polygon_inset(pts, d)),
        }
    }

    /// Samples the shape's boundary into a closed polyline with roughly
    /// `step` spacing. Drives dashed strokes.
    pub fn outline(&self, step: f32) -> Vec<(f32, f32)> {
        let step = step.max(0.25);
        match self {
            Shape::Rect(r) => sample_polyline(&rect_corners(r), step),
            Shape::RoundedRect(r, radii) => {
                sample_polyline(&rounded_rect_outline(r, radii), step)
            }
            Shape::Circle { cx, cy, r } => {
                let n = ((2.0 * std::f32::consts::PI * r / step).ceil() as usize).max(8);
                (0..=n)
                    .map(|i| {
                        let a = 2.0 * std::f32::consts::PI * i as f32 / n as f32;
                        (cx + r * a.cos(), cy + r * a.sin())
                    })
                    .collect()
            }
            Shape::Polygon(pts) => {
                let mut closed = pts.clone();
                if let Some(&first) = pts.first() {
                    closed.push(first);
                }
                sample_polyline(&closed, step)
            }
        }
    }
}

fn rect_corners(r: &RectF) -> Vec<(f32, f32)> {
    vec![(r.x, r.y), (r.right(), r.y), (r.right(), r.bottom()), (r.x, r.bottom()), (r.x, r.y)]
}

fn rounded_rect_contains(rect: &RectF, radii: &[f32; 4], x: f32, y: f32) -> bool {
    if !rect.contains(x, y) {
        return false;
    }
    let [tl, tr, br, bl] = *radii;
    let corners = [
        (rect.x + tl, rect.y + tl, tl, -1.0, -1.0),
        (rect.right() - tr, rect.y + tr, tr, 1.0, -1.0),
        (rect.right() - br, rect.bottom() - br, br, 1.0, 1.0),
        (rect.x + bl, rect.bottom() - bl, bl, -1.0, 1.0),
    ];
    for (cx, cy, r, sx, sy) in corners {
        if r <= 0.0 {
            continue;
        }
        // Inside the corner square but outside the quarter circle.
        if (x - cx) * sx > 0.0 && (y - cy) * sy > 0.0 {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy > r * r {
                return false;
            }
        }
    }
    true
}

/// Even-odd ray cast. Handles concave outlines such as the star dot.
fn polygon_contains(pts: &[(f32, f32)], x: f32, y: f32) -> bool {
    let n = pts.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = pts[i];
        let (xj, yj) = pts[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Moves every vertex radially toward the centroid by `d`. Exact only for
/// shapes whose vertices are equidistant from the centroid, which covers the
/// regular polygons used here.
fn polygon_inset(pts: &[(f32, f32)], d: f32) -> Vec<(f32, f32)> {
    let n = pts.len() as f32;
    let (cx, cy) = pts.iter().fold((0.0, 0.0), |acc, p| (acc.0 + p.0 / n, acc.1 + p.1 / n));
    pts.iter()
        .map(|&(x, y)| {
            let (dx, dy) = (x - cx, y - cy);
            let len = (dx * dx + dy * dy).sqrt();
            if len <= f32::EPSILON {
                return (x, y);
            }
            let scale = ((len - d) / len).max(0.0);
            (cx + dx * scale, cy + dy * scale)
        })
        .collect()
}

fn rounded_rect_outline(rect: &RectF, radii: &[f32; 4]) -> Vec<(f32, f32)> {
    let [tl, tr, br, bl] = *radii;
    let mut pts = Vec::new();
    let mut arc = |cx: f32, cy: f32, r: f32, from_deg: f32| {
        if r <= 0.0 {
            pts.push((cx, cy));
            return;
        }
        let segs = 8;
        for i in 0..=segs {
            let a = (from_deg + 90.0 * i as f32 / segs as f32).to_radians();
            pts.push((cx + r * a.cos(), cy + r * a.sin()));
        }
    };
    arc(rect.x + tl, rect.y + tl, tl, 180.0);
    arc(rect.right() - tr, rect.y + tr, tr, 270.0);
    arc(rect.right() - br, rect.bottom() - br, br, 0.0);
    arc(rect.x + bl, rect.bottom() - bl, bl, 90.0);
    if let Some(&first) = pts.first() {
        pts.push(first);
    }
    pts
}

/// Re-samples a polyline at roughly uniform `step` spacing.
fn sample_polyline(pts: &[(f32, f32)], step: f32) -> Vec<(f32, f32)> {
    let mut out = Vec::new();
    for win in pts.windows(2) {
        let (x0, y0) = win[0];
        let (x1, y1) = win[1];
        let len = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
        let n = (len / step).ceil().max(1.0) as usize;
        for i in 0..n {
            let t = i as f32 / n as f32;
            out.push((x0 + (x1 - x0) * t, y0 + (y1 - y0) * t));
        }
    }
    if let Some(&last) = pts.last() {
        out.push(last);
    }
    out
}

// Polygon builders
//------------------------------------------------------------------------------

pub fn diamond(rect: RectF) -> Shape {
    let (cx, cy) = rect.center();
    Shape::Polygon(vec![
        (cx, rect.y),
        (rect.right(), cy),
        (cx, rect.bottom()),
        (rect.x, cy),
    ])
}

/// `points`-pointed star, tip up, inner vertices at `inner_ratio` of the
/// outer radius.
pub fn star(cx: f32, cy: f32, outer_r: f32, points: usize, inner_ratio: f32) -> Shape {
    let inner_r = outer_r * inner_ratio;
    let mut pts = Vec::with_capacity(points * 2);
    for i in 0..points * 2 {
        let r = if i % 2 == 0 { outer_r } else { inner_r };
        let a = std::f32::consts::PI * i as f32 / points as f32 - std::f32::consts::FRAC_PI_2;
        pts.push((cx + r * a.cos(), cy + r * a.sin()));
    }
    Shape::Polygon(pts)
}

/// Octagon inscribed in `rect` with corners cut back by `cut` on each axis.
pub fn octagon(rect: RectF, cut: f32) -> Shape {
    let cut = cut.min(rect.w / 2.0).min(rect.h / 2.0);
    Shape::Polygon(vec![
        (rect.x + cut, rect.y),
        (rect.right() - cut, rect.y),
        (rect.right(), rect.y + cut),
        (rect.right(), rect.bottom() - cut),
        (rect.right() - cut, rect.bottom()),
        (rect.x + cut, rect.bottom()),
        (rect.x, rect.bottom() - cut),
        (rect.x, rect.y + cut),
    ])
}
