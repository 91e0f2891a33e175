//! Pan/zoom state machine and view history.
//!
//! [`NavigationController`] interprets canvas events according to the
//! current [`NavigationMode`], owns the zoom and pan sessions of the gesture
//! in progress and keeps the rubberband overlay and readout message in sync.
//! Every externally visible change is published through [`Observers`].

use tracing::debug;

use crate::config::ChartConfig;
use crate::event::{CanvasEvent, MouseButton};
use crate::figure::{Axes, AxesId, Figure, ZoomDirection};
use crate::geometry::{DataTransform, Point, ViewLimits};
use crate::observe::{Observers, SubscriptionId};
use crate::rubberband::{AxisLock, RubberbandGeometry, RubberbandSelector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMode {
    #[default]
    None,
    Pan,
    Zoom,
}

/// Change notifications published by [`NavigationController`].
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationChange {
    Mode(NavigationMode),
    Rubberband(RubberbandGeometry),
    Message(String),
    /// Axes limits changed; the figure needs a redraw.
    View,
    History { can_back: bool, can_forward: bool },
}

/// State of one zoom drag. Replaced wholesale, never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomSession {
    pub direction: ZoomDirection,
    pub start: Point,
    pub axes: Vec<AxesId>,
    pub lock: AxisLock,
}

impl ZoomSession {
    pub fn with_start(&self, start: Point) -> Self {
        Self {
            start,
            ..self.clone()
        }
    }

    pub fn with_lock(&self, lock: AxisLock) -> Self {
        Self {
            lock,
            ..self.clone()
        }
    }

    #[inline]
    pub fn lock_x_only(&self) -> bool {
        self.lock.x_only()
    }

    #[inline]
    pub fn lock_y_only(&self) -> bool {
        self.lock.y_only()
    }
}

#[derive(Debug, Clone)]
struct PanSession {
    button: MouseButton,
    start: Point,
    axes: Vec<(AxesId, DataTransform)>,
}

/// History of figure views with a cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewStack {
    views: Vec<Vec<ViewLimits>>,
    position: usize,
}

impl ViewStack {
    /// Push a view, discarding everything after the cursor.
    pub fn push(&mut self, views: Vec<ViewLimits>) {
        if !self.views.is_empty() {
            self.views.truncate(self.position + 1);
        }
        self.views.push(views);
        self.position = self.views.len() - 1;
    }

    pub fn current(&self) -> Option<&[ViewLimits]> {
        self.views.get(self.position).map(Vec::as_slice)
    }

    /// Push a copy of the first view. The view that was current stays
    /// reachable with [`Self::back`].
    pub fn home(&mut self) -> Option<&[ViewLimits]> {
        let first = self.views.first()?.clone();
        self.push(first);

        self.current()
    }

    /// `None` at the oldest entry.
    pub fn back(&mut self) -> Option<&[ViewLimits]> {
        if !self.can_back() {
            return None;
        }
        self.position -= 1;

        self.current()
    }

    /// `None` at the newest entry.
    pub fn forward(&mut self) -> Option<&[ViewLimits]> {
        if !self.can_forward() {
            return None;
        }
        self.position += 1;

        self.current()
    }

    pub fn can_back(&self) -> bool {
        self.position > 0
    }

    pub fn can_forward(&self) -> bool {
        self.position + 1 < self.views.len()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// Floating coordinate readout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readout {
    pub active: bool,
    pub text: String,
    /// Display position the label is centred on.
    pub anchor: Option<Point>,
}

#[derive(Debug)]
pub struct NavigationController {
    mode: NavigationMode,
    history: ViewStack,
    zoom: Option<ZoomSession>,
    pan: Option<PanSession>,
    selector: RubberbandSelector,
    threshold_dp: f64,
    click_threshold: f64,
    rubberband: RubberbandGeometry,
    readout: Readout,
    observers: Observers<NavigationChange>,
}

impl NavigationController {
    /// Create a controller and record the figure's current view as home.
    pub fn new(figure: &Figure, config: &ChartConfig, pixels_per_point: f64) -> Self {
        let mut history = ViewStack::default();
        history.push(figure.views());

        Self {
            mode: NavigationMode::None,
            history,
            zoom: None,
            pan: None,
            selector: RubberbandSelector::new(config.rubberband_threshold * pixels_per_point),
            threshold_dp: config.rubberband_threshold,
            click_threshold: config.zoom_click_threshold,
            rubberband: RubberbandGeometry::cleared(),
            readout: Readout::default(),
            observers: Observers::default(),
        }
    }

    /// Rescale the rubberband threshold for a new display density.
    pub fn set_pixels_per_point(&mut self, pixels_per_point: f64) {
        self.selector = RubberbandSelector::new(self.threshold_dp * pixels_per_point);
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&NavigationChange) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    #[inline]
    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    #[inline]
    pub fn zoom_session(&self) -> Option<&ZoomSession> {
        self.zoom.as_ref()
    }

    #[inline]
    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    #[inline]
    pub fn rubberband(&self) -> &RubberbandGeometry {
        &self.rubberband
    }

    #[inline]
    pub fn readout(&self) -> &Readout {
        &self.readout
    }

    #[inline]
    pub fn can_back(&self) -> bool {
        self.history.can_back()
    }

    #[inline]
    pub fn can_forward(&self) -> bool {
        self.history.can_forward()
    }

    #[inline]
    pub fn history(&self) -> &ViewStack {
        &self.history
    }

    fn notify_history(&mut self) {
        let change = NavigationChange::History {
            can_back: self.history.can_back(),
            can_forward: self.history.can_forward(),
        };
        self.observers.notify(&change);
    }

    fn apply_views(&mut self, figure: &mut Figure, views: Option<Vec<ViewLimits>>) {
        if let Some(views) = views {
            figure.restore_views(&views);
            self.observers.notify(&NavigationChange::View);
        }
        self.notify_history();
    }

    /// Reset every axes to the first recorded view.
    pub fn home(&mut self, figure: &mut Figure) {
        debug!("navigation home");
        self.zoom = None;
        self.pan = None;
        self.remove_rubberband();
        let views = self.history.home().map(<[ViewLimits]>::to_vec);
        self.apply_views(figure, views);
    }

    pub fn back(&mut self, figure: &mut Figure) {
        let Some(views) = self.history.back().map(<[ViewLimits]>::to_vec) else {
            return;
        };
        debug!(position = self.history.position, "navigation back");
        self.apply_views(figure, Some(views));
    }

    pub fn forward(&mut self, figure: &mut Figure) {
        let Some(views) = self.history.forward().map(<[ViewLimits]>::to_vec) else {
            return;
        };
        debug!(position = self.history.position, "navigation forward");
        self.apply_views(figure, Some(views));
    }

    /// Record the figure's current view in the history.
    pub fn push_current(&mut self, figure: &Figure) {
        self.history.push(figure.views());
        self.notify_history();
    }

    /// Toggle pan mode.
    pub fn pan(&mut self) {
        let mode = if self.mode == NavigationMode::Pan {
            NavigationMode::None
        } else {
            NavigationMode::Pan
        };
        self.set_mode(mode);
    }

    /// Toggle zoom-to-rectangle mode.
    pub fn zoom(&mut self) {
        let mode = if self.mode == NavigationMode::Zoom {
            NavigationMode::None
        } else {
            NavigationMode::Zoom
        };
        self.set_mode(mode);
    }

    fn set_mode(&mut self, mode: NavigationMode) {
        debug!(from = ?self.mode, to = ?mode, "navigation mode");
        self.mode = mode;
        self.zoom = None;
        self.pan = None;
        self.remove_rubberband();
        if mode == NavigationMode::None {
            self.clear_message();
        } else {
            self.set_readout_active(false);
        }
        self.observers.notify(&NavigationChange::Mode(mode));
    }

    /// Button press on the canvas.
    pub fn press(&mut self, event: &CanvasEvent, figure: &Figure) {
        match self.mode {
            NavigationMode::Zoom => self.press_zoom(event, figure),
            NavigationMode::Pan => self.press_pan(event, figure),
            NavigationMode::None => {}
        }
    }

    /// Button release on the canvas.
    pub fn release(&mut self, event: &CanvasEvent, figure: &mut Figure) {
        match self.mode {
            NavigationMode::Zoom => self.release_zoom(event, figure),
            NavigationMode::Pan => self.release_pan(figure),
            NavigationMode::None => {}
        }
    }

    /// Pointer motion, with or without a button held.
    pub fn motion(&mut self, event: &CanvasEvent, figure: &mut Figure) {
        self.mouse_move(event, figure);
        if self.zoom.is_some() {
            self.drag_zoom(event, figure);
        } else if self.pan.is_some() {
            self.drag_pan(event, figure);
        }
    }

    fn press_zoom(&mut self, event: &CanvasEvent, figure: &Figure) {
        let direction = match event.mouse_button() {
            Some(MouseButton::Left) => ZoomDirection::In,
            Some(MouseButton::Right) => ZoomDirection::Out,
            _ => return,
        };
        let axes = figure.navigable_axes_at(event.position());
        if axes.is_empty() {
            return;
        }
        self.zoom = Some(ZoomSession {
            direction,
            start: event.position(),
            axes,
            lock: AxisLock::None,
        });
    }

    fn drag_zoom(&mut self, event: &CanvasEvent, figure: &Figure) {
        let Some(session) = &self.zoom else {
            return;
        };
        let Some(bbox) = session.axes.first().and_then(|id| figure.get_axes(*id)).map(Axes::bbox) else {
            return;
        };
        let start = bbox.clamp(session.start);
        let end = bbox.clamp(event.position());
        self.draw_rubberband(figure, start.x, start.y, end.x, end.y);
    }

    /// Show the zoom selection from `(x0, y0)` to `(x1, y1)`.
    ///
    /// While a zoom session is active the selector may lock the selection to
    /// one axis; the session records the lock for [`Self::release_zoom`].
    pub fn draw_rubberband(&mut self, figure: &Figure, x0: f64, y0: f64, x1: f64, y1: f64) {
        let bbox = self
            .zoom
            .as_ref()
            .and_then(|session| session.axes.first())
            .and_then(|id| figure.get_axes(*id))
            .map(Axes::bbox);
        let (geometry, lock) = self.selector.select((x0, y0), (x1, y1), bbox);
        if let Some(session) = self.zoom.take() {
            self.zoom = Some(session.with_lock(lock));
        }
        self.rubberband = geometry;
        self.observers.notify(&NavigationChange::Rubberband(geometry));
    }

    pub fn remove_rubberband(&mut self) {
        if self.rubberband == RubberbandGeometry::cleared() {
            return;
        }
        self.rubberband = RubberbandGeometry::cleared();
        self.observers.notify(&NavigationChange::Rubberband(self.rubberband));
    }

    /// Commit the zoom session. The selection is clipped to the axes, and
    /// locked drags are widened to the full axes extent.
    pub fn release_zoom(&mut self, event: &CanvasEvent, figure: &mut Figure) {
        let Some(session) = self.zoom.take() else {
            return;
        };
        self.remove_rubberband();

        let Some(bbox) = session.axes.first().and_then(|id| figure.get_axes(*id)).map(Axes::bbox) else {
            return;
        };
        let session = session.with_start(bbox.clamp(session.start));
        let mut end = bbox.clamp(event.position());
        let session = match session.lock {
            AxisLock::YOnly => {
                end.x = bbox.x1;
                session.with_start(Point::new(bbox.x0, session.start.y))
            }
            AxisLock::XOnly => {
                end.y = bbox.y1;
                session.with_start(Point::new(session.start.x, bbox.y0))
            }
            AxisLock::None => session,
        };

        let start = session.start;
        if (end.x - start.x).abs() < self.click_threshold || (end.y - start.y).abs() < self.click_threshold {
            debug!("zoom selection too small, ignoring");
            return;
        }

        debug!(?start, ?end, direction = ?session.direction, lock = ?session.lock, "zoom to rect");
        for id in &session.axes {
            if let Some(axes) = figure.get_axes_mut(*id) {
                axes.set_view_from_bbox(start, end, session.direction);
            }
        }
        self.observers.notify(&NavigationChange::View);
        self.push_current(figure);
    }

    fn press_pan(&mut self, event: &CanvasEvent, figure: &Figure) {
        let button = match event.mouse_button() {
            Some(button @ (MouseButton::Left | MouseButton::Right)) => button,
            _ => return,
        };
        let axes: Vec<_> = figure
            .navigable_axes_at(event.position())
            .into_iter()
            .filter_map(|id| figure.get_axes(id).map(|axes| (id, axes.trans_data())))
            .collect();
        if axes.is_empty() {
            return;
        }
        self.pan = Some(PanSession {
            button,
            start: event.position(),
            axes,
        });
    }

    fn drag_pan(&mut self, event: &CanvasEvent, figure: &mut Figure) {
        let Some(session) = &self.pan else {
            return;
        };
        let mut changed = false;
        for (id, trans) in &session.axes {
            let Some(view) = pan_view(trans, session.button, session.start, event.position()) else {
                continue;
            };
            if let Some(axes) = figure.get_axes_mut(*id) {
                changed |= axes.set_view(view);
            }
        }
        if changed {
            self.observers.notify(&NavigationChange::View);
        }
    }

    fn release_pan(&mut self, figure: &Figure) {
        if self.pan.take().is_some() {
            self.push_current(figure);
        }
    }

    /// Update the readout with the data coordinate under the pointer.
    pub fn mouse_move(&mut self, event: &CanvasEvent, figure: &Figure) {
        let message = match (event.inaxes.and_then(|id| figure.get_axes(id)), event.xdata, event.ydata) {
            (Some(axes), Some(x), Some(y)) => axes.format_coord(x, y),
            _ => String::new(),
        };
        self.set_message(&message);
    }

    /// Set the readout text. Ignored while the readout is hidden.
    pub fn set_message(&mut self, text: &str) {
        if !self.readout.active || self.readout.text == text {
            return;
        }
        self.readout.text = text.to_string();
        self.observers.notify(&NavigationChange::Message(self.readout.text.clone()));
    }

    pub fn clear_message(&mut self) {
        if self.readout.text.is_empty() {
            return;
        }
        self.readout.text.clear();
        self.observers.notify(&NavigationChange::Message(String::new()));
    }

    /// Show or hide the readout. Hiding clears its text.
    pub fn set_readout_active(&mut self, active: bool) {
        self.readout.active = active;
        if !active {
            self.clear_message();
        }
    }

    pub fn set_readout_anchor(&mut self, anchor: Option<Point>) {
        self.readout.anchor = anchor;
    }
}

/// New limits for a pan gesture relative to the view at press time.
///
/// The left button translates the view; the right button zooms about the
/// press point by `10^(-d / extent)` along each axis.
fn pan_view(trans: &DataTransform, button: MouseButton, start: Point, current: Point) -> Option<ViewLimits> {
    let dx = current.x - start.x;
    let dy = current.y - start.y;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    let bbox = trans.bbox();

    let (lo, hi) = match button {
        MouseButton::Left => {
            let moved = bbox.translated(-dx, -dy);
            (moved.min(), moved.max())
        }
        MouseButton::Right => {
            let alpha_x = 10f64.powf(-dx / bbox.width());
            let alpha_y = 10f64.powf(-dy / bbox.height());
            let scale = |p: Point| {
                Point::new(
                    start.x + alpha_x * (p.x - start.x),
                    start.y + alpha_y * (p.y - start.y),
                )
            };
            (scale(bbox.min()), scale(bbox.max()))
        }
        _ => return None,
    };
    let lo = trans.inverted(lo);
    let hi = trans.inverted(hi);

    Some(ViewLimits::new((lo.x, hi.x), (lo.y, hi.y)))
}
