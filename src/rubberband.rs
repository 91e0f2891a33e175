//! Zoom selection overlay geometry.

use crate::geometry::{Bbox, Point};

/// Default distance, in device independent pixels, below which a drag along
/// one axis is treated as a single-axis zoom.
pub const DEFAULT_RUBBERBAND_THRESHOLD: f64 = 20.0;

/// Single-axis zoom lock derived from the shape of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisLock {
    #[default]
    None,
    /// Only the x limits change; the rectangle spans the full axes height.
    XOnly,
    /// Only the y limits change; the rectangle spans the full axes width.
    YOnly,
}

impl AxisLock {
    #[inline]
    pub fn x_only(self) -> bool {
        self == Self::XOnly
    }

    #[inline]
    pub fn y_only(self) -> bool {
        self == Self::YOnly
    }
}

/// Rectangle shown while dragging out a zoom, in display pixels.
///
/// `corners` is the closed outline starting and ending at `pos`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RubberbandGeometry {
    pub pos: Point,
    pub size: Point,
    pub corners: [Point; 5],
}

impl Default for RubberbandGeometry {
    fn default() -> Self {
        Self::cleared()
    }
}

impl RubberbandGeometry {
    pub const fn cleared() -> Self {
        Self {
            pos: Point::ZERO,
            size: Point::ZERO,
            corners: [Point::ZERO; 5],
        }
    }

    fn from_normalized(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            pos: Point::new(x0, y0),
            size: Point::new(x1 - x0, y1 - y0),
            corners: [
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
                Point::new(x0, y0),
            ],
        }
    }

    /// A rubberband counts as drawn once either side exceeds one pixel.
    #[inline]
    pub fn is_drawn(&self) -> bool {
        self.size.x > 1.0 || self.size.y > 1.0
    }

    /// Flat `[x0, y0, x1, y0, ...]` outline, as line primitives expect it.
    pub fn flat_corners(&self) -> [f64; 10] {
        let mut flat = [0.0; 10];
        for (i, corner) in self.corners.iter().enumerate() {
            flat[2 * i] = corner.x;
            flat[2 * i + 1] = corner.y;
        }

        flat
    }
}

/// Computes the zoom overlay and the axis lock for a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RubberbandSelector {
    threshold: f64,
}

impl Default for RubberbandSelector {
    fn default() -> Self {
        Self::new(DEFAULT_RUBBERBAND_THRESHOLD)
    }
}

impl RubberbandSelector {
    /// `threshold` is in display pixels.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Geometry for a drag from `(x0, y0)` to `(x1, y1)`.
    ///
    /// Locking is only considered when the active axes bbox is given.
    pub fn select(
        &self,
        (mut x0, mut y0): (f64, f64),
        (mut x1, mut y1): (f64, f64),
        axes_bbox: Option<Bbox>,
    ) -> (RubberbandGeometry, AxisLock) {
        let mut lock = AxisLock::None;

        if let Some(bbox) = axes_bbox {
            let width = (x1 - x0).abs();
            let height = (y1 - y0).abs();
            if width < self.threshold && self.threshold < height {
                (x0, x1) = bbox.interval_x();
                lock = AxisLock::YOnly;
            } else if height < self.threshold && self.threshold < width {
                (y0, y1) = bbox.interval_y();
                lock = AxisLock::XOnly;
            }
        }

        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
        }
        if y0 > y1 {
            std::mem::swap(&mut y0, &mut y1);
        }

        (RubberbandGeometry::from_normalized(x0, y0, x1, y1), lock)
    }
}
