//! Conversions between display pixels, data coordinates and axes fractions.
//!
//! Every function takes the axes currently under the pointer. When there is
//! none the input is returned untouched, so callers never have to special
//! case a pointer outside the plot regions.

use crate::figure::Axes;
use crate::geometry::Point;

/// A single point or an ordered sequence of points.
///
/// Mapping preserves the shape of the input.
pub trait PointSet: Sized {
    fn map_points(self, f: impl Fn(Point) -> Point) -> Self;
}

impl PointSet for Point {
    #[inline]
    fn map_points(self, f: impl Fn(Point) -> Point) -> Self {
        f(self)
    }
}

impl PointSet for (f64, f64) {
    #[inline]
    fn map_points(self, f: impl Fn(Point) -> Point) -> Self {
        f(self.into()).into()
    }
}

impl PointSet for [f64; 2] {
    #[inline]
    fn map_points(self, f: impl Fn(Point) -> Point) -> Self {
        f(self.into()).into()
    }
}

impl<T> PointSet for Vec<T>
where
    T: PointSet,
{
    fn map_points(self, f: impl Fn(Point) -> Point) -> Self {
        self.into_iter().map(|item| item.map_points(&f)).collect()
    }
}

/// Data coordinates to axes fractions.
pub fn data_to_axes<P: PointSet>(points: P, axes: Option<&Axes>) -> P {
    let Some(axes) = axes else {
        return points;
    };
    let data = axes.trans_data();
    let frac = axes.trans_axes();

    points.map_points(|p| frac.inverted(data.transform(p)))
}

/// Display pixels to data coordinates.
pub fn display_to_data<P: PointSet>(points: P, axes: Option<&Axes>) -> P {
    let Some(axes) = axes else {
        return points;
    };
    let data = axes.trans_data();

    points.map_points(|p| data.inverted(p))
}

/// Data coordinates to display pixels.
pub fn data_to_display<P: PointSet>(points: P, axes: Option<&Axes>) -> P {
    let Some(axes) = axes else {
        return points;
    };
    let data = axes.trans_data();

    points.map_points(|p| data.transform(p))
}

/// Display pixels to axes fractions.
pub fn display_to_axes<P: PointSet>(points: P, axes: Option<&Axes>) -> P {
    let Some(axes) = axes else {
        return points;
    };
    let frac = axes.trans_axes();

    points.map_points(|p| frac.inverted(p))
}

/// Axes fractions to display pixels.
pub fn axes_to_display<P: PointSet>(points: P, axes: Option<&Axes>) -> P {
    let Some(axes) = axes else {
        return points;
    };
    let frac = axes.trans_axes();

    points.map_points(|p| frac.transform(p))
}
