#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod backend;
mod chart;
pub mod config;
mod error;
pub mod event;
pub mod figure;
pub mod geometry;
pub mod mapper;
pub mod navigation;
pub mod observe;
pub mod router;
pub mod rubberband;
pub mod save;
pub mod toolbar;

pub use backend::{FigureCanvas, ImageFormat, egui_color, rasterize, render_on, render_to_file};
pub use chart::Chart;
pub use config::{ChartConfig, Rgba};
pub use error::ChartError;
pub use event::{ButtonToken, CanvasEvent, CanvasEventKind, MouseButton, RawPointerEvent};
pub use figure::{Axes, AxesId, Figure, Series, ZoomDirection};
pub use geometry::{Bbox, DataTransform, Point, Scale, ViewLimits};
pub use navigation::{NavigationChange, NavigationController, NavigationMode, ZoomSession};
pub use router::{PointerEventRouter, RouteOutcome, WidgetBounds};
pub use rubberband::{AxisLock, RubberbandGeometry, RubberbandSelector};
pub use save::save_figure;
pub use toolbar::{Tool, Toolbar, ToolbarCommand, ToolbarMenu, ToggleGroups};
