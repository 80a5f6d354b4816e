//! Star-rating geometry
//!
//! Pure computations backing a percent-filled star control: the unit-space
//! star outline, scaling into a target frame, percent/pixel conversions,
//! the fill mask, and polygon hit-testing. No state and no rendering; the
//! drawing layer consumes the returned geometry.

/// A point in unit or frame space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a target frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Symmetrical ten-vertex star in a 1x1 unit space.
pub const STAR_UNIT_POINTS: [Point; 10] = [
    Point::new(0.62723, 0.37309),
    Point::new(0.5, 0.025),
    Point::new(0.37292, 0.37309),
    Point::new(0.025, 0.39112),
    Point::new(0.30504, 0.62908),
    Point::new(0.20642, 0.975),
    Point::new(0.5, 0.78265),
    Point::new(0.79358, 0.975),
    Point::new(0.69501, 0.62908),
    Point::new(0.975, 0.39112),
];

/// Clamp a fill fraction into 0..=1. NaN maps to 0.
pub fn clamp_percent(percent: f32) -> f32 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 1.0)
}

/// Fill fraction for a horizontal position inside a control of the given
/// width. Positions at or past either edge clamp to 0 or 1.
pub fn percent_from_pixels(x: f32, width: f32) -> f32 {
    if width <= 0.0 || x <= 0.0 {
        return 0.0;
    }
    if x >= width {
        return 1.0;
    }
    x / width
}

/// Horizontal extent covered by a fill fraction of the given width.
pub fn pixels_from_percent(percent: f32, width: f32) -> f32 {
    clamp_percent(percent) * width
}

/// Scale unit-space outline points into a frame, offset by the border
/// width so the stroke stays inside the frame.
pub fn scale_to_frame(points: &[Point], frame: Size, border_width: f32) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(p.x * frame.width + border_width, p.y * frame.height + border_width))
        .collect()
}

/// Renderable geometry for a partially filled shape: the scaled outline
/// plus the left-anchored mask over the filled layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FillRegion {
    pub outline: Vec<Point>,
    pub mask: Rect,
}

/// Compute the outline and fill mask for a fill fraction of `shape_points`
/// rendered into `frame`.
pub fn fill_region(percent: f32, shape_points: &[Point], frame: Size) -> FillRegion {
    let percent = clamp_percent(percent);
    FillRegion {
        outline: scale_to_frame(shape_points, frame, 0.0),
        mask: Rect {
            x: 0.0,
            y: 0.0,
            width: frame.width * percent,
            height: frame.height,
        },
    }
}

/// Even-odd containment test of a point against a closed polygon.
pub fn polygon_contains(points: &[Point], point: Point) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
