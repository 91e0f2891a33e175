//! Routing of raw host pointer events into canvas events.

use crate::event::{ButtonToken, CanvasEvent, CanvasEventKind, RawPointerEvent};
use crate::figure::{AxesId, Figure};
use crate::geometry::Point;
use crate::navigation::NavigationController;

/// Screen rectangle of the chart widget in host coordinates.
///
/// Host coordinates are points with the origin at the top left and y growing
/// downwards; display coordinates are physical pixels with the origin at the
/// bottom left of the widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetBounds {
    pub min: (f32, f32),
    pub max: (f32, f32),
    pub pixels_per_point: f32,
}

impl WidgetBounds {
    pub fn new(min: (f32, f32), max: (f32, f32), pixels_per_point: f32) -> Self {
        Self {
            min,
            max,
            pixels_per_point,
        }
    }

    pub fn contains(&self, pos: (f32, f32)) -> bool {
        pos.0 >= self.min.0 && pos.0 <= self.max.0 && pos.1 >= self.min.1 && pos.1 <= self.max.1
    }

    /// Host point to display pixel, flipping the vertical axis.
    pub fn to_display(&self, pos: (f32, f32)) -> Point {
        let ppp = self.pixels_per_point as f64;

        Point::new(
            (pos.0 - self.min.0) as f64 * ppp,
            (self.max.1 - pos.1) as f64 * ppp,
        )
    }

    /// Display pixel back to a host point.
    pub fn from_display(&self, point: Point) -> (f32, f32) {
        let ppp = self.pixels_per_point as f64;

        (
            self.min.0 + (point.x / ppp) as f32,
            self.max.1 - (point.y / ppp) as f32,
        )
    }

    /// Widget size in physical pixels.
    pub fn size_px(&self) -> (u32, u32) {
        let w = (self.max.0 - self.min.0) * self.pixels_per_point;
        let h = (self.max.1 - self.min.1) * self.pixels_per_point;

        (w.max(0.0).round() as u32, h.max(0.0).round() as u32)
    }
}

/// What the router did with a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The event was outside the widget.
    Rejected,
    /// Left to the host (scroll) or suppressed (hover during a drag).
    Ignored,
    /// Double tap, handled as a view reset.
    ResetView,
    Dispatched(CanvasEventKind),
}

/// Per-interaction pointer state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub is_pressed: bool,
    /// Last hover position in display pixels.
    pub mouse_pos: Option<Point>,
    /// Axes under the cursor at the last hover.
    pub inaxes: Option<AxesId>,
}

#[derive(Debug, Default)]
pub struct PointerEventRouter {
    state: PointerState,
}

/// Map a host button name onto the canvas vocabulary.
#[inline]
pub fn classify_button(name: &str) -> Option<ButtonToken> {
    ButtonToken::from_name(name)
}

impl PointerEventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> &PointerState {
        &self.state
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.state.is_pressed
    }

    pub fn reset(&mut self) {
        self.state = PointerState::default();
    }

    fn canvas_event(
        kind: CanvasEventKind,
        raw: &RawPointerEvent,
        bounds: &WidgetBounds,
        figure: &Figure,
    ) -> CanvasEvent {
        CanvasEvent::new(
            kind,
            figure,
            bounds.to_display(raw.pos),
            classify_button(&raw.button),
            Some(raw.clone()),
        )
    }

    /// Button press or touch down.
    pub fn touch_down(
        &mut self,
        raw: &RawPointerEvent,
        bounds: &WidgetBounds,
        figure: &mut Figure,
        navigation: &mut NavigationController,
    ) -> RouteOutcome {
        if !bounds.contains(raw.pos) {
            return RouteOutcome::Rejected;
        }
        if raw.is_scroll {
            return RouteOutcome::Ignored;
        }
        if raw.is_double_tap {
            navigation.home(figure);
            return RouteOutcome::ResetView;
        }

        self.state.is_pressed = true;
        let event = Self::canvas_event(CanvasEventKind::ButtonPress, raw, bounds, figure);
        navigation.press(&event, figure);

        RouteOutcome::Dispatched(CanvasEventKind::ButtonPress)
    }

    /// Button release or touch up. Releases outside the widget are dropped,
    /// leaving any zoom session to be cleared by the next reset or mode
    /// change.
    pub fn touch_up(
        &mut self,
        raw: &RawPointerEvent,
        bounds: &WidgetBounds,
        figure: &mut Figure,
        navigation: &mut NavigationController,
    ) -> RouteOutcome {
        if !bounds.contains(raw.pos) {
            return RouteOutcome::Rejected;
        }

        self.state.is_pressed = false;
        let event = Self::canvas_event(CanvasEventKind::ButtonRelease, raw, bounds, figure);
        navigation.release(&event, figure);

        RouteOutcome::Dispatched(CanvasEventKind::ButtonRelease)
    }

    /// Motion with a button held or a finger down.
    pub fn touch_move(
        &mut self,
        raw: &RawPointerEvent,
        bounds: &WidgetBounds,
        figure: &mut Figure,
        navigation: &mut NavigationController,
    ) -> RouteOutcome {
        if !bounds.contains(raw.pos) {
            return RouteOutcome::Rejected;
        }

        let event = Self::canvas_event(CanvasEventKind::MotionNotify, raw, bounds, figure);
        navigation.motion(&event, figure);

        RouteOutcome::Dispatched(CanvasEventKind::MotionNotify)
    }

    /// Hover motion. While a button is held the readout is cleared and the
    /// other hover side effects are skipped; the drag reaches the canvas via
    /// [`Self::touch_move`].
    pub fn mouse_move(
        &mut self,
        pos: (f32, f32),
        bounds: &WidgetBounds,
        figure: &mut Figure,
        navigation: &mut NavigationController,
    ) -> RouteOutcome {
        let display = bounds.to_display(pos);
        self.state.mouse_pos = Some(display);

        if !bounds.contains(pos) {
            navigation.clear_message();
            return RouteOutcome::Rejected;
        }
        if self.state.is_pressed {
            navigation.clear_message();
            return RouteOutcome::Ignored;
        }

        self.state.inaxes = figure.inaxes(display);
        let event = CanvasEvent::new(CanvasEventKind::MotionNotify, figure, display, None, None);
        navigation.motion(&event, figure);
        navigation.set_readout_anchor(Some(display));

        RouteOutcome::Dispatched(CanvasEventKind::MotionNotify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::figure::Axes;
    use crate::navigation::NavigationMode;

    // 400x300 widget placed at (100, 50) in the window.
    const BOUNDS: WidgetBounds = WidgetBounds {
        min: (100.0, 50.0),
        max: (500.0, 350.0),
        pixels_per_point: 1.0,
    };

    fn setup() -> (Figure, NavigationController, PointerEventRouter) {
        let mut figure = Figure::new(400, 300);
        figure.add_axes(Axes::new([0.0, 0.0, 1.0, 1.0]).xlim(0.0, 400.0).ylim(0.0, 300.0));
        let nav = NavigationController::new(&figure, &ChartConfig::default(), 1.0);
        (figure, nav, PointerEventRouter::new())
    }

    #[test]
    fn converts_to_bottom_left_display() {
        assert_eq!(BOUNDS.to_display((100.0, 350.0)), Point::new(0.0, 0.0));
        assert_eq!(BOUNDS.to_display((150.0, 80.0)), Point::new(50.0, 270.0));
        assert_eq!(BOUNDS.from_display(Point::new(50.0, 270.0)), (150.0, 80.0));

        let hidpi = WidgetBounds::new((0.0, 0.0), (100.0, 50.0), 2.0);
        assert_eq!(hidpi.to_display((10.0, 40.0)), Point::new(20.0, 20.0));
        assert_eq!(hidpi.size_px(), (200, 100));
    }

    #[test]
    fn rejects_outside_and_ignores_scroll() {
        let (mut figure, mut nav, mut router) = setup();
        let outside = RawPointerEvent::new((20.0, 20.0), "left");
        assert_eq!(router.touch_down(&outside, &BOUNDS, &mut figure, &mut nav), RouteOutcome::Rejected);
        assert!(!router.is_pressed());

        let scroll = RawPointerEvent::new((200.0, 200.0), "scrollup").scroll();
        assert_eq!(router.touch_down(&scroll, &BOUNDS, &mut figure, &mut nav), RouteOutcome::Ignored);
        assert!(!router.is_pressed());
    }

    #[test]
    fn double_tap_resets_view() {
        let (mut figure, mut nav, mut router) = setup();
        nav.zoom();
        router.touch_down(&RawPointerEvent::new((150.0, 300.0), "left"), &BOUNDS, &mut figure, &mut nav);
        router.touch_move(&RawPointerEvent::new((350.0, 100.0), "left"), &BOUNDS, &mut figure, &mut nav);
        router.touch_up(&RawPointerEvent::new((350.0, 100.0), "left"), &BOUNDS, &mut figure, &mut nav);
        assert_ne!(figure.axes()[0].view().xlim, (0.0, 400.0));

        let tap = RawPointerEvent::new((200.0, 200.0), "left").double_tap();
        assert_eq!(router.touch_down(&tap, &BOUNDS, &mut figure, &mut nav), RouteOutcome::ResetView);
        assert_eq!(figure.axes()[0].view().xlim, (0.0, 400.0));
        assert_eq!(figure.axes()[0].view().ylim, (0.0, 300.0));
        assert!(!router.is_pressed());
    }

    #[test]
    fn drag_zooms_through_router() {
        let (mut figure, mut nav, mut router) = setup();
        nav.zoom();
        let down = RawPointerEvent::new((150.0, 300.0), "left");
        assert_eq!(
            router.touch_down(&down, &BOUNDS, &mut figure, &mut nav),
            RouteOutcome::Dispatched(CanvasEventKind::ButtonPress)
        );
        assert!(router.is_pressed());
        assert_eq!(nav.zoom_session().map(|s| s.start), Some(Point::new(50.0, 50.0)));

        router.touch_move(&RawPointerEvent::new((350.0, 100.0), "left"), &BOUNDS, &mut figure, &mut nav);
        assert_eq!(nav.rubberband().pos, Point::new(50.0, 50.0));
        assert_eq!(nav.rubberband().size, Point::new(200.0, 200.0));

        router.touch_up(&RawPointerEvent::new((350.0, 100.0), "left"), &BOUNDS, &mut figure, &mut nav);
        assert!(!router.is_pressed());
        let view = figure.axes()[0].view();
        assert!((view.xlim.0 - 50.0).abs() < 1e-9 && (view.xlim.1 - 250.0).abs() < 1e-9);
        assert!((view.ylim.0 - 50.0).abs() < 1e-9 && (view.ylim.1 - 250.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_button_still_dispatches() {
        let (mut figure, mut nav, mut router) = setup();
        nav.zoom();
        let pen = RawPointerEvent::new((200.0, 200.0), "stylus");
        assert_eq!(
            router.touch_down(&pen, &BOUNDS, &mut figure, &mut nav),
            RouteOutcome::Dispatched(CanvasEventKind::ButtonPress)
        );
        assert!(nav.zoom_session().is_none());
    }

    #[test]
    fn hover_is_suppressed_while_pressed() {
        let (mut figure, mut nav, mut router) = setup();
        nav.set_readout_active(true);
        assert_eq!(
            router.mouse_move((200.0, 250.0), &BOUNDS, &mut figure, &mut nav),
            RouteOutcome::Dispatched(CanvasEventKind::MotionNotify)
        );
        assert_eq!(router.state().inaxes, Some(0));
        assert_eq!(nav.readout().anchor, Some(Point::new(100.0, 100.0)));
        assert_eq!(nav.readout().text, "x=100.000 y=100.000");

        router.touch_down(&RawPointerEvent::new((200.0, 250.0), "left"), &BOUNDS, &mut figure, &mut nav);
        assert_eq!(router.mouse_move((300.0, 150.0), &BOUNDS, &mut figure, &mut nav), RouteOutcome::Ignored);
        assert_eq!(nav.readout().anchor, Some(Point::new(100.0, 100.0)));
        assert_eq!(nav.readout().text, "");
        assert_eq!(router.state().inaxes, Some(0));

        assert_eq!(router.mouse_move((10.0, 10.0), &BOUNDS, &mut figure, &mut nav), RouteOutcome::Rejected);
        assert_eq!(nav.readout().text, "");
    }

    #[test]
    fn release_outside_leaves_stale_session() {
        let (mut figure, mut nav, mut router) = setup();
        nav.zoom();
        router.touch_down(&RawPointerEvent::new((150.0, 300.0), "left"), &BOUNDS, &mut figure, &mut nav);
        router.touch_move(&RawPointerEvent::new((350.0, 100.0), "left"), &BOUNDS, &mut figure, &mut nav);
        let up = RawPointerEvent::new((600.0, 100.0), "left");
        assert_eq!(router.touch_up(&up, &BOUNDS, &mut figure, &mut nav), RouteOutcome::Rejected);
        assert!(nav.zoom_session().is_some());
        assert_eq!(figure.axes()[0].view().xlim, (0.0, 400.0));

        nav.zoom();
        assert_eq!(nav.mode(), NavigationMode::None);
        assert!(nav.zoom_session().is_none());
        assert!(!nav.rubberband().is_drawn());
    }
}
