//! The figure object graph the navigation layer works against.
//!
//! Axes carry placement, view limits, scales and line series. Tick layout
//! and rasterization belong to plotters, see [`crate::FigureCanvas`].

use crate::geometry::{Bbox, DataTransform, Point, Scale, ViewLimits};

/// Index of an axes inside its [`Figure`].
pub type AxesId = usize;

/// Direction of a rectangle zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// The selected rectangle becomes the new view.
    In,
    /// The current view is squeezed into the selected rectangle.
    Out,
}

/// A polyline drawn inside an axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    pub color: [u8; 3],
}

/// A plotting region with its own limits and display bbox.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    position: [f64; 4],
    bbox: Bbox,
    xlim: (f64, f64),
    ylim: (f64, f64),
    xscale: Scale,
    yscale: Scale,
    navigate: bool,
    series: Vec<Series>,
}

impl Axes {
    /// Create an axes placed at `[left, bottom, width, height]` in figure
    /// fractions.
    pub fn new(position: [f64; 4]) -> Self {
        Self {
            position,
            bbox: Bbox::default(),
            xlim: (0.0, 1.0),
            ylim: (0.0, 1.0),
            xscale: Scale::Linear,
            yscale: Scale::Linear,
            navigate: true,
            series: Vec::new(),
        }
    }

    pub fn xlim(mut self, min: f64, max: f64) -> Self {
        self.xlim = (min, max);

        self
    }

    pub fn ylim(mut self, min: f64, max: f64) -> Self {
        self.ylim = (min, max);

        self
    }

    pub fn xscale(mut self, scale: Scale) -> Self {
        self.xscale = scale;

        self
    }

    pub fn yscale(mut self, scale: Scale) -> Self {
        self.yscale = scale;

        self
    }

    /// Exclude this axes from pan/zoom.
    pub fn navigate(mut self, navigate: bool) -> Self {
        self.navigate = navigate;

        self
    }

    /// Add a line series.
    pub fn line(mut self, label: impl Into<String>, points: Vec<(f64, f64)>, color: [u8; 3]) -> Self {
        self.series.push(Series {
            label: Some(label.into()),
            points,
            color,
        });

        self
    }

    #[inline]
    pub fn bbox(&self) -> Bbox {
        self.bbox
    }

    #[inline]
    pub fn can_navigate(&self) -> bool {
        self.navigate
    }

    #[inline]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[inline]
    pub fn scales(&self) -> (Scale, Scale) {
        (self.xscale, self.yscale)
    }

    #[inline]
    pub fn view(&self) -> ViewLimits {
        ViewLimits::new(self.xlim, self.ylim)
    }

    /// Replace the view limits. Limits invalid for the axis scales are
    /// rejected and `false` is returned.
    pub fn set_view(&mut self, view: ViewLimits) -> bool {
        if !self.xscale.accepts(view.xlim) || !self.yscale.accepts(view.ylim) {
            tracing::debug!(?view, "rejecting view limits outside the scale domain");
            return false;
        }
        self.xlim = view.xlim;
        self.ylim = view.ylim;

        true
    }

    /// Data to display transform.
    pub fn trans_data(&self) -> DataTransform {
        DataTransform::new(self.view(), self.xscale, self.yscale, self.bbox)
    }

    /// Axes fraction (0..1 on both axes) to display.
    pub fn trans_axes(&self) -> DataTransform {
        DataTransform::new(
            ViewLimits::new((0.0, 1.0), (0.0, 1.0)),
            Scale::Linear,
            Scale::Linear,
            self.bbox,
        )
    }

    fn update_bbox(&mut self, figure_size: (u32, u32)) {
        let (w, h) = (figure_size.0 as f64, figure_size.1 as f64);
        let [left, bottom, width, height] = self.position;
        self.bbox = Bbox::new(left * w, bottom * h, (left + width) * w, (bottom + height) * h);
    }

    /// Apply a rectangle zoom given two display corners.
    pub fn set_view_from_bbox(&mut self, start: Point, end: Point, direction: ZoomDirection) -> bool {
        let trans = self.trans_data();
        let rect = Bbox::from_corners(start, end);
        let lo = trans.display_to_scaled(rect.min());
        let hi = trans.display_to_scaled(rect.max());

        let (sx, sy) = match direction {
            ZoomDirection::In => ((lo.x, hi.x), (lo.y, hi.y)),
            ZoomDirection::Out => {
                let cur_lo = trans.display_to_scaled(self.bbox.min());
                let cur_hi = trans.display_to_scaled(self.bbox.max());
                (
                    zoom_out_interval((cur_lo.x, cur_hi.x), (lo.x, hi.x)),
                    zoom_out_interval((cur_lo.y, cur_hi.y), (lo.y, hi.y)),
                )
            }
        };

        let view = ViewLimits::new(
            (self.xscale.inverse(sx.0), self.xscale.inverse(sx.1)),
            (self.yscale.inverse(sy.0), self.yscale.inverse(sy.1)),
        );

        self.set_view(view)
    }

    /// Readout text for a data coordinate.
    pub fn format_coord(&self, x: f64, y: f64) -> String {
        format!("x={} y={}", format_value(x), format_value(y))
    }
}

/// Stretch `current` so that its old extent lands inside `selected`.
fn zoom_out_interval(current: (f64, f64), selected: (f64, f64)) -> (f64, f64) {
    let factor = (current.1 - current.0) / (selected.1 - selected.0);

    (
        current.0 - factor * (selected.0 - current.0),
        current.1 + factor * (current.1 - selected.1),
    )
}

fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-3..1e5).contains(&magnitude) {
        format!("{value:.3e}")
    } else {
        format!("{value:.3}")
    }
}

/// Top level container for all plot elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    size: (u32, u32),
    title: Option<String>,
    axes: Vec<Axes>,
}

impl Figure {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            title: None,
            axes: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());

        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn add_axes(&mut self, mut axes: Axes) -> AxesId {
        axes.update_bbox(self.size);
        self.axes.push(axes);

        self.axes.len() - 1
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Resize the figure in display pixels. Degenerate sizes are ignored.
    pub fn set_size(&mut self, width: u32, height: u32) -> bool {
        if width <= 1 || height <= 1 || (width, height) == self.size {
            return false;
        }
        self.size = (width, height);
        for axes in &mut self.axes {
            axes.update_bbox(self.size);
        }

        true
    }

    #[inline]
    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    #[inline]
    pub fn get_axes(&self, id: AxesId) -> Option<&Axes> {
        self.axes.get(id)
    }

    #[inline]
    pub fn get_axes_mut(&mut self, id: AxesId) -> Option<&mut Axes> {
        self.axes.get_mut(id)
    }

    /// The topmost axes containing a display point.
    pub fn inaxes(&self, point: Point) -> Option<AxesId> {
        self.axes.iter().rposition(|axes| axes.bbox.contains(point))
    }

    /// Every navigable axes under a display point, bottom first.
    pub fn navigable_axes_at(&self, point: Point) -> Vec<AxesId> {
        self.axes
            .iter()
            .enumerate()
            .filter(|(_, axes)| axes.navigate && axes.bbox.contains(point))
            .map(|(id, _)| id)
            .collect()
    }

    /// Current view of every axes, in axes order.
    pub fn views(&self) -> Vec<ViewLimits> {
        self.axes.iter().map(Axes::view).collect()
    }

    pub fn restore_views(&mut self, views: &[ViewLimits]) {
        for (axes, view) in self.axes.iter_mut().zip(views) {
            axes.set_view(*view);
        }
    }

    /// Suggested file name: the title with spaces replaced, or `image`.
    pub fn default_filename(&self) -> String {
        let stem = match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title
                .chars()
                .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
                .collect(),
            _ => "image".to_string(),
        };

        format!("{stem}.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure() -> Figure {
        let mut figure = Figure::new(400, 300);
        figure.add_axes(Axes::new([0.25, 0.0, 0.5, 1.0]).xlim(0.0, 10.0).ylim(0.0, 30.0));
        figure
    }

    #[test]
    fn axes_bbox_follows_figure_size() {
        let mut figure = figure();
        assert_eq!(figure.axes()[0].bbox(), Bbox::new(100.0, 0.0, 300.0, 300.0));
        assert!(figure.set_size(800, 600));
        assert_eq!(figure.axes()[0].bbox(), Bbox::new(200.0, 0.0, 600.0, 600.0));
        assert!(!figure.set_size(1, 600));
    }

    #[test]
    fn inaxes_picks_topmost() {
        let mut figure = figure();
        let inset = figure.add_axes(Axes::new([0.5, 0.5, 0.2, 0.2]));
        assert_eq!(figure.inaxes(Point::new(220.0, 170.0)), Some(inset));
        assert_eq!(figure.inaxes(Point::new(120.0, 20.0)), Some(0));
        assert_eq!(figure.inaxes(Point::new(10.0, 20.0)), None);
    }

    #[test]
    fn zoom_in_then_out_restores_view() {
        let mut figure = figure();
        let axes = figure.get_axes_mut(0).unwrap();
        assert!(axes.set_view_from_bbox(
            Point::new(150.0, 100.0),
            Point::new(250.0, 200.0),
            ZoomDirection::In
        ));
        let view = axes.view();
        assert!((view.xlim.0 - 2.5).abs() < 1e-9 && (view.xlim.1 - 7.5).abs() < 1e-9);
        assert!((view.ylim.0 - 10.0).abs() < 1e-9 && (view.ylim.1 - 20.0).abs() < 1e-9);

        assert!(axes.set_view_from_bbox(
            Point::new(150.0, 100.0),
            Point::new(250.0, 200.0),
            ZoomDirection::Out
        ));
        let view = axes.view();
        assert!((view.xlim.0 - 0.0).abs() < 1e-9 && (view.xlim.1 - 10.0).abs() < 1e-9);
        assert!((view.ylim.0 - 0.0).abs() < 1e-9 && (view.ylim.1 - 30.0).abs() < 1e-9);
    }

    #[test]
    fn default_filename_uses_title() {
        assert_eq!(Figure::new(10, 10).default_filename(), "image.png");
        assert_eq!(
            Figure::new(10, 10).with_title("Step response").default_filename(),
            "Step_response.png"
        );
    }
}
