//! The egui widget tying figure, router, navigation and toolbar together.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use egui::{
    Align2, Color32, Event, FontId, Painter, PointerButton, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2,
    Widget, pos2, vec2,
};

use crate::backend::{FigureCanvas, ImageFormat, egui_color};
use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::event::RawPointerEvent;
use crate::figure::Figure;
use crate::navigation::{NavigationChange, NavigationController, NavigationMode};
use crate::router::{PointerEventRouter, WidgetBounds};
use crate::save;
use crate::toolbar::{Tool, Toolbar, ToolbarCommand};

/// Seconds between two presses for them to count as a double tap.
const DOUBLE_TAP_TIME: f64 = 0.25;
/// Maximum distance, in points, between the two presses of a double tap.
const DOUBLE_TAP_DISTANCE: f32 = 20.0;
/// Columns of tool buttons in the expanded menu.
const MENU_COLUMNS: usize = 3;

/// Recognises double taps from a stream of button presses.
#[derive(Debug, Clone, Copy, Default)]
struct DoubleTapDetector {
    last: Option<(PointerButton, Pos2, f64)>,
}

impl DoubleTapDetector {
    /// Register a press and report whether it completes a double tap.
    fn press(&mut self, button: PointerButton, pos: Pos2, time: f64) -> bool {
        let double = self.last.is_some_and(|(last_button, last_pos, last_time)| {
            last_button == button
                && time - last_time < DOUBLE_TAP_TIME
                && last_pos.distance(pos) < DOUBLE_TAP_DISTANCE
        });
        // A third press starts a new sequence instead of chaining.
        self.last = if double { None } else { Some((button, pos, time)) };

        double
    }
}

fn button_name(button: PointerButton) -> &'static str {
    match button {
        PointerButton::Primary => "left",
        PointerButton::Secondary => "right",
        PointerButton::Middle => "middle",
        PointerButton::Extra1 => "back",
        PointerButton::Extra2 => "forward",
    }
}

fn glyph(tool: Tool) -> &'static str {
    match tool {
        Tool::Home => "⌂",
        Tool::Back => "⏴",
        Tool::Forward => "⏵",
        Tool::Readout => "✛",
        Tool::Pan => "✋",
        Tool::Zoom => "🔍",
        Tool::Save => "💾",
    }
}

/// Interactive figure widget.
///
/// Renders the figure into a texture, routes pointer input into the
/// navigation controller and draws the rubberband, the coordinate readout
/// and a collapsible toolbar on top.
pub struct Chart {
    figure: Figure,
    config: ChartConfig,
    canvas: FigureCanvas,
    router: PointerEventRouter,
    navigation: NavigationController,
    toolbar: Toolbar,
    view_changed: Rc<Cell<bool>>,
    double_tap: DoubleTapDetector,
    held_button: Option<&'static str>,
    pixels_per_point: f32,
    width: Option<f32>,
    height: Option<f32>,
    last_dir: Option<PathBuf>,
}

impl Chart {
    pub fn new(figure: Figure) -> Self {
        Self::with_config(figure, ChartConfig::default())
    }

    pub fn with_config(figure: Figure, config: ChartConfig) -> Self {
        let mut navigation = NavigationController::new(&figure, &config, 1.0);
        let view_changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&view_changed);
        navigation.subscribe(move |change| {
            if matches!(change, NavigationChange::View) {
                flag.set(true);
            }
        });

        Self {
            toolbar: Toolbar::new(&config),
            figure,
            config,
            canvas: FigureCanvas::new(),
            router: PointerEventRouter::new(),
            navigation,
            view_changed,
            double_tap: DoubleTapDetector::default(),
            held_button: None,
            pixels_per_point: 1.0,
            width: None,
            height: None,
            last_dir: None,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);

        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);

        self
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = Some(width);
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = Some(height);
    }

    #[inline]
    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Mutable access to the figure. The texture is redrawn next frame.
    pub fn figure_mut(&mut self) -> &mut Figure {
        self.canvas.mark_dirty();
        &mut self.figure
    }

    #[inline]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[inline]
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    #[inline]
    pub fn navigation_mut(&mut self) -> &mut NavigationController {
        &mut self.navigation
    }

    #[inline]
    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    /// Whether the figure has been rendered at least once.
    #[inline]
    pub fn is_drawn(&self) -> bool {
        self.canvas.is_drawn()
    }

    /// Directory of the last successful save.
    #[inline]
    pub fn last_dir(&self) -> Option<&Path> {
        self.last_dir.as_deref()
    }

    /// Save the figure. Without `dir` the last used directory is tried
    /// before the configured default.
    pub fn save_figure(
        &mut self,
        dir: Option<&Path>,
        filename: Option<&str>,
        format: Option<ImageFormat>,
    ) -> Result<PathBuf, ChartError> {
        let dir = dir.map(Path::to_path_buf).or_else(|| self.last_dir.clone());
        let path = save::save_figure(&self.figure, dir.as_deref(), filename, format, &self.config)?;
        self.last_dir = path.parent().map(Path::to_path_buf);

        Ok(path)
    }

    /// Press a toolbar tool as if its button had been clicked.
    pub fn press_tool(&mut self, tool: Tool) {
        for command in self.toolbar.press(tool) {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: ToolbarCommand) {
        match command {
            ToolbarCommand::Home => self.navigation.home(&mut self.figure),
            ToolbarCommand::Back => self.navigation.back(&mut self.figure),
            ToolbarCommand::Forward => self.navigation.forward(&mut self.figure),
            ToolbarCommand::TogglePan => self.navigation.pan(),
            ToolbarCommand::ToggleZoom => self.navigation.zoom(),
            ToolbarCommand::ShowReadout(show) => self.navigation.set_readout_active(show),
            ToolbarCommand::ResetMode => match self.navigation.mode() {
                NavigationMode::Pan => self.navigation.pan(),
                NavigationMode::Zoom => self.navigation.zoom(),
                NavigationMode::None => {}
            },
            ToolbarCommand::Save => {
                if let Err(err) = self.save_figure(None, None, None) {
                    tracing::warn!(%err, "could not save figure");
                }
            }
        }
    }

    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let available = ui.available_size();
        let desired = vec2(
            self.width.unwrap_or(available.x),
            self.height.unwrap_or(available.y),
        );
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click_and_drag());

        let pixels_per_point = ui.ctx().pixels_per_point();
        if pixels_per_point != self.pixels_per_point {
            self.pixels_per_point = pixels_per_point;
            self.navigation.set_pixels_per_point(pixels_per_point as f64);
        }
        let bounds = WidgetBounds::new(
            (rect.min.x, rect.min.y),
            (rect.max.x, rect.max.y),
            pixels_per_point,
        );
        let (width, height) = bounds.size_px();
        if self.figure.set_size(width, height) {
            self.canvas.mark_dirty();
        }

        let now = ui.input(|i| i.time);
        let menu_area = self.menu_area(rect, now);
        let events = ui.input(|i| i.events.clone());
        for event in &events {
            self.route(event, &bounds, menu_area, now);
        }

        if self.view_changed.replace(false) {
            self.canvas.mark_dirty();
        }
        if self.canvas.is_dirty() {
            self.canvas.draw(ui.ctx(), &self.figure, self.config.background);
        }

        let painter = ui.painter_at(rect);
        if let Some(texture) = self.canvas.texture_id() {
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(texture, rect, uv, Color32::WHITE);
        }
        self.paint_rubberband(&painter, &bounds);
        self.paint_readout(&painter, &bounds);
        self.show_toolbar(ui, rect, now);

        response
    }

    fn route(&mut self, event: &Event, bounds: &WidgetBounds, menu_area: Rect, now: f64) {
        match event {
            Event::PointerButton {
                pos, button, pressed, ..
            } => {
                let name = button_name(*button);
                let mut raw = RawPointerEvent::new((pos.x, pos.y), name);
                if *pressed {
                    if menu_area.contains(*pos) {
                        return;
                    }
                    if self.double_tap.press(*button, *pos, now) {
                        raw = raw.double_tap();
                    }
                    self.router
                        .touch_down(&raw, bounds, &mut self.figure, &mut self.navigation);
                    if self.router.is_pressed() {
                        self.held_button = Some(name);
                    }
                } else {
                    self.held_button = None;
                    self.router
                        .touch_up(&raw, bounds, &mut self.figure, &mut self.navigation);
                }
            }
            Event::PointerMoved(pos) => {
                if let Some(name) = self.held_button {
                    let raw = RawPointerEvent::new((pos.x, pos.y), name);
                    self.router
                        .touch_move(&raw, bounds, &mut self.figure, &mut self.navigation);
                }
                self.router
                    .mouse_move((pos.x, pos.y), bounds, &mut self.figure, &mut self.navigation);
            }
            Event::MouseWheel { delta, .. } => {
                let Some(pos) = self.router.state().mouse_pos.map(|p| bounds.from_display(p)) else {
                    return;
                };
                let name = if delta.y > 0.0 { "scrollup" } else { "scrolldown" };
                let raw = RawPointerEvent::new(pos, name).scroll();
                self.router
                    .touch_down(&raw, bounds, &mut self.figure, &mut self.navigation);
            }
            _ => {}
        }
    }

    fn paint_rubberband(&self, painter: &Painter, bounds: &WidgetBounds) {
        let rubberband = self.navigation.rubberband();
        if !rubberband.is_drawn() {
            return;
        }

        let outline: Vec<Pos2> = rubberband
            .corners
            .iter()
            .map(|corner| {
                let (x, y) = bounds.from_display(*corner);
                pos2(x, y)
            })
            .collect();
        let area = Rect::from_two_pos(outline[0], outline[2]);
        painter.rect_filled(area, 0.0, egui_color(self.config.rubberband_fill));
        painter.extend(Shape::dashed_line(
            &outline,
            Stroke::new(1.0, egui_color(self.config.rubberband_edge)),
            self.config.rubberband_dash_length,
            self.config.rubberband_dash_gap,
        ));
    }

    fn paint_readout(&self, painter: &Painter, bounds: &WidgetBounds) {
        let readout = self.navigation.readout();
        let Some(anchor) = readout.anchor else {
            return;
        };
        if !readout.active || readout.text.is_empty() {
            return;
        }

        let (x, y) = bounds.from_display(anchor);
        let [width, height] = self.config.info_label_size;
        let label = Rect::from_min_size(pos2(x - width / 2.0, y - height), vec2(width, height));
        painter.text(
            label.center(),
            Align2::CENTER_CENTER,
            &readout.text,
            FontId::proportional(12.0),
            egui_color(self.config.info_text_color),
        );
    }

    fn menu_button_rect(&self, rect: Rect) -> Rect {
        let size = self.config.button_size;
        Rect::from_min_size(pos2(rect.max.x - size - 4.0, rect.min.y + 4.0), Vec2::splat(size))
    }

    /// Screen area covered by the menu button and the expanded menu.
    fn menu_area(&self, rect: Rect, now: f64) -> Rect {
        let button = self.menu_button_rect(rect);
        let width = self.config.button_size * MENU_COLUMNS as f32;
        let height = self.toolbar.menu().height(now);

        button.union(Rect::from_min_size(
            pos2(button.max.x - width, button.max.y),
            vec2(width, height),
        ))
    }

    fn show_toolbar(&mut self, ui: &mut Ui, rect: Rect, now: f64) {
        let size = self.config.button_size;
        let font = FontId::proportional(self.config.button_font_size);
        let icon = egui_color(self.config.icon_color);
        let active = egui_color(self.config.active_color);

        if self.toolbar.menu_mut().tick(now) {
            tracing::debug!(open = self.toolbar.menu().is_open(), "toolbar menu settled");
        }

        let button = self.menu_button_rect(rect);
        let response = ui.interact(button, ui.id().with("plotnav-menu"), Sense::click());
        let painter = ui.painter_at(rect);
        painter.circle_filled(button.center(), size / 2.0, egui_color(self.config.background));
        painter.text(button.center(), Align2::CENTER_CENTER, "☰", font.clone(), icon);
        if response.clicked() {
            self.toolbar.menu_mut().toggle(now);
        }

        let area = self.menu_area(rect, now);
        let panel = ui.painter_at(area.intersect(rect));
        let mut pressed = None;
        for (i, tool) in self.toolbar.menu().visible_tools(now).iter().enumerate() {
            let (row, column) = (i / MENU_COLUMNS, i % MENU_COLUMNS);
            let min = pos2(
                button.max.x - size * (MENU_COLUMNS - column) as f32,
                button.max.y + size * row as f32,
            );
            let tool_rect = Rect::from_min_size(min, Vec2::splat(size));
            let response = ui
                .interact(tool_rect, ui.id().with(("plotnav-tool", *tool)), Sense::click())
                .on_hover_text(tool.label());

            let color = if self.toolbar.is_active(*tool) { active } else { icon };
            panel.circle_filled(tool_rect.center(), size / 2.0 - 2.0, egui_color(self.config.background));
            panel.circle_stroke(tool_rect.center(), size / 2.0 - 2.0, Stroke::new(1.0, color));
            panel.text(tool_rect.center(), Align2::CENTER_CENTER, glyph(*tool), font.clone(), color);
            if response.clicked() {
                pressed = Some(*tool);
            }
        }

        if let Some(tool) = pressed {
            self.press_tool(tool);
        }
        if self.toolbar.menu().in_motion() {
            ui.ctx().request_repaint();
        }
    }
}

impl Widget for &mut Chart {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui)
    }
}
