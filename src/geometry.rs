//! Points, bounding boxes and the data transform of an axes.
//!
//! Display coordinates follow the plotting convention: origin at the bottom
//! left of the figure, y growing upwards, measured in physical pixels.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A 2-D point, either in display pixels or in data units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0);
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from(value: (f64, f64)) -> Self {
        let (x, y) = value;

        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(val: Point) -> Self {
        (val.x, val.y)
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from(value: [f64; 2]) -> Self {
        Self {
            x: value[0],
            y: value[1],
        }
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(val: Point) -> Self {
        [val.x, val.y]
    }
}

impl Add<Point> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub<Point> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// Axis-aligned box given by two corners, `(x0, y0)` lower left and
/// `(x1, y1)` upper right.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bbox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Bbox {
    #[inline]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Build a box from two arbitrary corners, sorting each axis.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x0: a.x.min(b.x),
            y0: a.y.min(b.y),
            x1: a.x.max(b.x),
            y1: a.y.max(b.y),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    #[inline]
    pub fn interval_x(&self) -> (f64, f64) {
        (self.x0, self.x1)
    }

    #[inline]
    pub fn interval_y(&self) -> (f64, f64) {
        (self.y0, self.y1)
    }

    #[inline]
    pub fn min(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    #[inline]
    pub fn max(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x0 && point.x <= self.x1 && point.y >= self.y0 && point.y <= self.y1
    }

    /// Clamp a point into the box.
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(point.x.clamp(self.x0, self.x1), point.y.clamp(self.y0, self.y1))
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }
}

/// Scale applied to one axis before the affine data-to-display mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scale {
    #[default]
    Linear,
    Log10,
}

impl Scale {
    /// Map a data value into scale space. `None` when the value is outside
    /// the scale's domain.
    pub fn forward(self, value: f64) -> Option<f64> {
        match self {
            Self::Linear => Some(value),
            Self::Log10 if value > 0.0 => Some(value.log10()),
            Self::Log10 => None,
        }
    }

    /// Map a scale-space value back into data units.
    pub fn inverse(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log10 => 10f64.powf(value),
        }
    }

    /// Whether `(min, max)` are valid limits for this scale.
    pub fn accepts(self, limits: (f64, f64)) -> bool {
        let finite = limits.0.is_finite() && limits.1.is_finite() && limits.0 != limits.1;
        match self {
            Self::Linear => finite,
            Self::Log10 => finite && limits.0 > 0.0 && limits.1 > 0.0,
        }
    }
}

/// View limits of one axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewLimits {
    pub xlim: (f64, f64),
    pub ylim: (f64, f64),
}

impl ViewLimits {
    pub const fn new(xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        Self { xlim, ylim }
    }
}

/// Snapshot of an axes' data-to-display mapping.
///
/// The mapping is affine in scale space: limits are pushed through each
/// axis' [`Scale`] and then stretched onto the display bbox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataTransform {
    limits: ViewLimits,
    xscale: Scale,
    yscale: Scale,
    bbox: Bbox,
}

impl DataTransform {
    pub fn new(limits: ViewLimits, xscale: Scale, yscale: Scale, bbox: Bbox) -> Self {
        Self {
            limits,
            xscale,
            yscale,
            bbox,
        }
    }

    pub fn limits(&self) -> ViewLimits {
        self.limits
    }

    pub fn bbox(&self) -> Bbox {
        self.bbox
    }

    pub fn scales(&self) -> (Scale, Scale) {
        (self.xscale, self.yscale)
    }

    fn scaled_limits(&self) -> ((f64, f64), (f64, f64)) {
        let fx = |v| self.xscale.forward(v).unwrap_or(f64::NAN);
        let fy = |v| self.yscale.forward(v).unwrap_or(f64::NAN);
        (
            (fx(self.limits.xlim.0), fx(self.limits.xlim.1)),
            (fy(self.limits.ylim.0), fy(self.limits.ylim.1)),
        )
    }

    /// Scale-space value to display pixel.
    pub fn scaled_to_display(&self, scaled: Point) -> Point {
        let ((sx0, sx1), (sy0, sy1)) = self.scaled_limits();
        let x = self.bbox.x0 + (scaled.x - sx0) / (sx1 - sx0) * self.bbox.width();
        let y = self.bbox.y0 + (scaled.y - sy0) / (sy1 - sy0) * self.bbox.height();

        Point::new(x, y)
    }

    /// Display pixel to scale-space value.
    pub fn display_to_scaled(&self, point: Point) -> Point {
        let ((sx0, sx1), (sy0, sy1)) = self.scaled_limits();
        let x = sx0 + (point.x - self.bbox.x0) / self.bbox.width() * (sx1 - sx0);
        let y = sy0 + (point.y - self.bbox.y0) / self.bbox.height() * (sy1 - sy0);

        Point::new(x, y)
    }

    /// Data to display. Values outside a log scale's domain map to NaN.
    pub fn transform(&self, point: Point) -> Point {
        let scaled = Point::new(
            self.xscale.forward(point.x).unwrap_or(f64::NAN),
            self.yscale.forward(point.y).unwrap_or(f64::NAN),
        );

        self.scaled_to_display(scaled)
    }

    /// Display to data.
    pub fn inverted(&self, point: Point) -> Point {
        let scaled = self.display_to_scaled(point);

        Point::new(self.xscale.inverse(scaled.x), self.yscale.inverse(scaled.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_from_corners_sorts() {
        let bbox = Bbox::from_corners(Point::new(5.0, 1.0), Point::new(2.0, 8.0));
        assert_eq!(bbox, Bbox::new(2.0, 1.0, 5.0, 8.0));
        assert!(bbox.contains(Point::new(3.0, 3.0)));
        assert!(!bbox.contains(Point::new(6.0, 3.0)));
        assert_eq!(bbox.clamp(Point::new(9.0, -1.0)), Point::new(5.0, 1.0));
    }

    #[test]
    fn log_transform_roundtrip() {
        let transform = DataTransform::new(
            ViewLimits::new((1.0, 1000.0), (0.0, 10.0)),
            Scale::Log10,
            Scale::Linear,
            Bbox::new(100.0, 50.0, 400.0, 350.0),
        );
        let display = transform.transform(Point::new(10.0, 5.0));
        assert!((display.x - 200.0).abs() < 1e-9);
        assert!((display.y - 200.0).abs() < 1e-9);
        let back = transform.inverted(display);
        assert!((back.x - 10.0).abs() < 1e-9);
        assert!((back.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn log_scale_rejects_non_positive_limits() {
        assert!(!Scale::Log10.accepts((-1.0, 10.0)));
        assert!(Scale::Log10.accepts((0.1, 10.0)));
        assert!(!Scale::Linear.accepts((3.0, 3.0)));
    }
}
