//! Default visual and behavioural parameters of a chart.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::backend::ImageFormat;
use crate::error::ChartError;
use crate::rubberband::DEFAULT_RUBBERBAND_THRESHOLD;

/// Straight (not premultiplied) RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }
}

/// Plain configuration struct; every field has a default so partial JSON
/// documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Drag extent, in device independent pixels, separating a one-axis zoom
    /// from a rectangle zoom.
    pub rubberband_threshold: f64,
    /// Zoom drags shorter than this, in display pixels, are cancelled.
    pub zoom_click_threshold: f64,
    pub rubberband_fill: Rgba,
    pub rubberband_edge: Rgba,
    pub rubberband_dash_length: f32,
    pub rubberband_dash_gap: f32,
    pub background: Rgba,
    pub info_label_size: [f32; 2],
    pub info_text_color: Rgba,
    pub icon_color: Rgba,
    pub active_color: Rgba,
    pub button_font_size: f32,
    pub button_size: f32,
    /// Expanded height of the toolbar menu. Not derived from its tools.
    pub menu_open_height: f32,
    pub menu_open_duration: f64,
    pub menu_close_duration: f64,
    pub default_dir: PathBuf,
    /// File name used when saving; empty means the figure's default.
    pub filename: String,
    pub default_format: ImageFormat,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            rubberband_threshold: DEFAULT_RUBBERBAND_THRESHOLD,
            zoom_click_threshold: 5.0,
            rubberband_fill: Rgba::new(0, 0, 0, 51),
            rubberband_edge: Rgba::new(0, 0, 0, 153),
            rubberband_dash_length: 6.0,
            rubberband_dash_gap: 4.0,
            background: Rgba::new(255, 255, 255, 255),
            info_label_size: [150.0, 20.0],
            info_text_color: Rgba::new(0, 0, 0, 102),
            icon_color: Rgba::new(0, 0, 0, 102),
            active_color: Rgba::new(103, 80, 164, 255),
            button_font_size: 18.0,
            button_size: 32.0,
            menu_open_height: 100.0,
            menu_open_duration: 0.1,
            menu_close_duration: 0.1,
            default_dir: default_save_dir(),
            filename: String::new(),
            default_format: ImageFormat::Png,
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// `~/Downloads`, or `./Downloads` when no home directory is known.
pub fn default_save_dir() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    home.join("Downloads")
}
