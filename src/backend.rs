//! Rasterizes a [`Figure`] with plotters and hands the pixels to egui.

use std::path::Path;

use egui::{Color32, ColorImage, TextureHandle, TextureId, TextureOptions};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_backend::BackendColor;
use serde::{Deserialize, Serialize};

use crate::config::Rgba;
use crate::error::ChartError;
use crate::figure::{Axes, Figure};
use crate::geometry::Scale;

/// Pixels reserved left of each axes for the y tick labels.
const Y_LABEL_AREA: f64 = 48.0;
/// Pixels reserved below each axes for the x tick labels.
const X_LABEL_AREA: f64 = 28.0;

/// Struct used to convert between egui, plotters and configuration colour
/// types.
#[derive(Debug, Clone, Copy)]
struct EguiBackendColor {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<BackendColor> for EguiBackendColor {
    #[inline]
    fn from(value: BackendColor) -> Self {
        let (r, g, b) = value.rgb;

        let a = (value.alpha * 255.0) as u8;

        Self { r, g, b, a }
    }
}

impl From<EguiBackendColor> for Color32 {
    #[inline]
    fn from(val: EguiBackendColor) -> Self {
        Color32::from_rgba_unmultiplied(val.r, val.g, val.b, val.a)
    }
}

impl From<Rgba> for BackendColor {
    #[inline]
    fn from(value: Rgba) -> Self {
        let [r, g, b, a] = value.0;

        BackendColor {
            alpha: a as f64 / 255.0,
            rgb: (r, g, b),
        }
    }
}

/// Configuration colour to egui.
#[inline]
pub fn egui_color(color: Rgba) -> Color32 {
    EguiBackendColor::from(BackendColor::from(color)).into()
}

#[inline]
fn plotters_color(color: Rgba) -> RGBAColor {
    let backend = BackendColor::from(color);
    let (r, g, b) = backend.rgb;

    RGBAColor(r, g, b, backend.alpha)
}

/// File formats the figure can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Bmp,
    Jpeg,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
            Self::Jpeg => "jpg",
            Self::Svg => "svg",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }
}

fn render_error<E>(err: DrawingAreaErrorKind<E>) -> ChartError
where
    E: std::error::Error + Send + Sync,
{
    ChartError::Render(err.to_string())
}

macro_rules! draw_axes {
    ($builder:expr, $axes:expr, $x:expr, $y:expr) => {{
        let (xscale, yscale) = $axes.scales();
        let mut chart = $builder.build_cartesian_2d($x, $y).map_err(render_error)?;
        chart.configure_mesh().draw().map_err(render_error)?;
        for series in $axes.series() {
            let [r, g, b] = series.color;
            let points = series
                .points
                .iter()
                .copied()
                .filter(|(x, y)| xscale.forward(*x).is_some() && yscale.forward(*y).is_some());
            chart
                .draw_series(LineSeries::new(points, &RGBColor(r, g, b)))
                .map_err(render_error)?;
        }
    }};
}

fn render_axes<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure_height: u32,
    axes: &Axes,
) -> Result<(), ChartError> {
    let bbox = axes.bbox();
    let y_area = Y_LABEL_AREA.min(bbox.x0).max(0.0);
    let x_area = X_LABEL_AREA.min(bbox.y0).max(0.0);

    // Plotters counts from the top; the label areas sit outside the bbox so
    // the plotting area lands exactly on it.
    let left = (bbox.x0 - y_area).round() as i32;
    let top = (figure_height as f64 - bbox.y1).round() as i32;
    let width = (bbox.width() + y_area).round() as u32;
    let height = (bbox.height() + x_area).round() as u32;
    let area = root.clone().shrink((left, top), (width, height));

    let mut builder = ChartBuilder::on(&area);
    builder
        .x_label_area_size(x_area.round() as u32)
        .y_label_area_size(y_area.round() as u32);

    let view = axes.view();
    let (xlim, ylim) = (view.xlim.0..view.xlim.1, view.ylim.0..view.ylim.1);
    match axes.scales() {
        (Scale::Linear, Scale::Linear) => draw_axes!(builder, axes, xlim, ylim),
        (Scale::Log10, Scale::Linear) => draw_axes!(builder, axes, xlim.log_scale(), ylim),
        (Scale::Linear, Scale::Log10) => draw_axes!(builder, axes, xlim, ylim.log_scale()),
        (Scale::Log10, Scale::Log10) => {
            draw_axes!(builder, axes, xlim.log_scale(), ylim.log_scale())
        }
    }

    Ok(())
}

/// Draw the whole figure onto any plotters drawing area.
pub fn render_on<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    background: Rgba,
) -> Result<(), ChartError> {
    root.fill(&plotters_color(background)).map_err(render_error)?;

    for axes in figure.axes() {
        render_axes(root, figure.size().1, axes)?;
    }

    if let Some(title) = figure.title() {
        let style = ("sans-serif", 16).into_font().color(&BLACK);
        root.draw(&Text::new(title.to_string(), (8, 6), style))
            .map_err(render_error)?;
    }

    root.present().map_err(render_error)
}

/// Rasterize the figure into an RGB image the size of the figure.
pub fn rasterize(figure: &Figure, background: Rgba) -> Result<ColorImage, ChartError> {
    let (width, height) = figure.size();
    if width == 0 || height == 0 {
        return Err(ChartError::Render(format!("empty figure {width}x{height}")));
    }

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        render_on(&root, figure, background)?;
    }

    Ok(ColorImage::from_rgb([width as usize, height as usize], &buffer))
}

/// Write the figure to `path` in the given format.
pub fn render_to_file(
    figure: &Figure,
    path: &Path,
    format: ImageFormat,
    background: Rgba,
) -> Result<(), ChartError> {
    let size = figure.size();
    match format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            render_on(&root, figure, background)
        }
        ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Jpeg => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            render_on(&root, figure, background)
        }
    }
}

/// egui texture holding the last successfully rendered frame.
pub struct FigureCanvas {
    texture: Option<TextureHandle>,
    dirty: bool,
    is_drawn: bool,
}

impl Default for FigureCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl FigureCanvas {
    pub fn new() -> Self {
        Self {
            texture: None,
            dirty: true,
            is_drawn: false,
        }
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether at least one frame has been rendered.
    #[inline]
    pub fn is_drawn(&self) -> bool {
        self.is_drawn
    }

    #[inline]
    pub fn texture_id(&self) -> Option<TextureId> {
        self.texture.as_ref().map(TextureHandle::id)
    }

    /// Render the figure into the texture.
    ///
    /// A failed render is logged and skipped; the previous texture stays in
    /// place.
    pub fn draw(&mut self, ctx: &egui::Context, figure: &Figure, background: Rgba) -> bool {
        self.dirty = false;

        let image = match rasterize(figure, background) {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!(%err, "could not redraw canvas");
                return false;
            }
        };

        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("egui-plotnav-figure", image, TextureOptions::LINEAR));
            }
        }
        self.is_drawn = true;

        true
    }
}
