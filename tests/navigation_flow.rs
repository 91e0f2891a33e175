use egui_plotnav::{
    Axes, AxisLock, Chart, ChartConfig, Figure, NavigationChange, NavigationController, NavigationMode,
    PointerEventRouter, RawPointerEvent, RouteOutcome, RubberbandGeometry, Tool, WidgetBounds,
};
use std::cell::RefCell;
use std::rc::Rc;

// Widget at the window origin, one point per pixel. Host y grows downwards,
// so display (x, y) is host (x, 300 - y).
const BOUNDS: WidgetBounds = WidgetBounds {
    min: (0.0, 0.0),
    max: (400.0, 300.0),
    pixels_per_point: 1.0,
};

struct Harness {
    figure: Figure,
    nav: NavigationController,
    router: PointerEventRouter,
}

impl Harness {
    fn new() -> Self {
        let mut figure = Figure::new(400, 300);
        figure.add_axes(Axes::new([0.0, 0.0, 1.0, 1.0]).xlim(0.0, 400.0).ylim(0.0, 300.0));
        let nav = NavigationController::new(&figure, &ChartConfig::default(), 1.0);
        Self {
            figure,
            nav,
            router: PointerEventRouter::new(),
        }
    }

    fn raw(display: (f32, f32), button: &str) -> RawPointerEvent {
        RawPointerEvent::new((display.0, 300.0 - display.1), button)
    }

    fn drag(&mut self, from: (f32, f32), to: (f32, f32), button: &str) {
        let down = Self::raw(from, button);
        let moved = Self::raw(to, button);
        self.router.touch_down(&down, &BOUNDS, &mut self.figure, &mut self.nav);
        self.router.touch_move(&moved, &BOUNDS, &mut self.figure, &mut self.nav);
        self.router.touch_up(&moved, &BOUNDS, &mut self.figure, &mut self.nav);
    }

    fn xlim(&self) -> (f64, f64) {
        self.figure.axes()[0].view().xlim
    }

    fn ylim(&self) -> (f64, f64) {
        self.figure.axes()[0].view().ylim
    }
}

fn close(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
}

#[test]
fn home_restores_construction_limits() {
    let mut h = Harness::new();
    h.nav.zoom();
    h.drag((100.0, 100.0), (300.0, 200.0), "left");
    assert!(close(h.xlim(), (100.0, 300.0)));
    assert!(close(h.ylim(), (100.0, 200.0)));

    h.nav.pan();
    h.drag((200.0, 150.0), (250.0, 150.0), "left");
    assert!(close(h.xlim(), (75.0, 275.0)));

    h.nav.home(&mut h.figure);
    assert_eq!(h.xlim(), (0.0, 400.0));
    assert_eq!(h.ylim(), (0.0, 300.0));

    h.nav.back(&mut h.figure);
    assert!(close(h.xlim(), (75.0, 275.0)));
}

#[test]
fn zoom_released_beyond_axes_stays_inside_limits() {
    let mut figure = Figure::new(400, 300);
    figure.add_axes(Axes::new([0.1, 0.1, 0.8, 0.8]).xlim(0.0, 100.0).ylim(0.0, 100.0));
    let mut h = Harness {
        nav: NavigationController::new(&figure, &ChartConfig::default(), 1.0),
        figure,
        router: PointerEventRouter::new(),
    };
    h.nav.zoom();
    // Axes span x 40..360 and y 30..270; the release lands in the right margin.
    h.drag((200.0, 90.0), (390.0, 210.0), "left");
    assert!(close(h.xlim(), (50.0, 100.0)));
    assert!(close(h.ylim(), (25.0, 75.0)));
}

#[test]
fn back_and_forward_walk_history() {
    let mut h = Harness::new();
    h.nav.zoom();
    h.drag((100.0, 100.0), (300.0, 200.0), "left");
    assert!(h.nav.can_back());
    assert!(!h.nav.can_forward());

    h.nav.back(&mut h.figure);
    assert_eq!(h.xlim(), (0.0, 400.0));
    assert!(h.nav.can_forward());

    h.nav.forward(&mut h.figure);
    assert!(close(h.xlim(), (100.0, 300.0)));

    // At the newest entry forward is a no-op.
    h.nav.forward(&mut h.figure);
    assert!(close(h.xlim(), (100.0, 300.0)));
}

#[test]
fn vertical_drag_locks_to_y() {
    let mut h = Harness::new();
    h.nav.zoom();
    let down = Harness::raw((60.0, 60.0), "left");
    let moved = Harness::raw((62.0, 250.0), "left");
    h.router.touch_down(&down, &BOUNDS, &mut h.figure, &mut h.nav);
    h.router.touch_move(&moved, &BOUNDS, &mut h.figure, &mut h.nav);

    assert_eq!(h.nav.zoom_session().map(|s| s.lock), Some(AxisLock::YOnly));
    let band = *h.nav.rubberband();
    assert_eq!(band.pos.x, 0.0);
    assert_eq!(band.size.x, 400.0);
    assert_eq!(band.size.y, 190.0);

    h.router.touch_up(&moved, &BOUNDS, &mut h.figure, &mut h.nav);
    assert!(close(h.xlim(), (0.0, 400.0)));
    assert!(close(h.ylim(), (60.0, 250.0)));
}

#[test]
fn tiny_zoom_is_cancelled() {
    let mut h = Harness::new();
    h.nav.zoom();
    h.drag((100.0, 100.0), (103.0, 103.0), "left");
    assert_eq!(h.xlim(), (0.0, 400.0));
    assert!(!h.nav.can_back());
}

#[test]
fn switching_to_pan_clears_rubberband() {
    let mut h = Harness::new();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    h.nav.subscribe(move |change| sink.borrow_mut().push(change.clone()));

    h.nav.zoom();
    let down = Harness::raw((100.0, 100.0), "left");
    let moved = Harness::raw((300.0, 200.0), "left");
    h.router.touch_down(&down, &BOUNDS, &mut h.figure, &mut h.nav);
    h.router.touch_move(&moved, &BOUNDS, &mut h.figure, &mut h.nav);
    assert!(h.nav.rubberband().is_drawn());

    h.nav.pan();
    assert_eq!(h.nav.mode(), NavigationMode::Pan);
    assert_eq!(*h.nav.rubberband(), RubberbandGeometry::cleared());
    assert!(h.nav.zoom_session().is_none());

    let changes = changes.borrow();
    assert_eq!(changes.first(), Some(&NavigationChange::Mode(NavigationMode::Zoom)));
    assert_eq!(changes.last(), Some(&NavigationChange::Mode(NavigationMode::Pan)));
    assert!(changes.contains(&NavigationChange::Rubberband(RubberbandGeometry::cleared())));
}

#[test]
fn double_tap_outside_is_rejected() {
    let mut h = Harness::new();
    let tap = RawPointerEvent::new((450.0, 10.0), "left").double_tap();
    assert_eq!(
        h.router.touch_down(&tap, &BOUNDS, &mut h.figure, &mut h.nav),
        RouteOutcome::Rejected
    );
}

#[test]
fn chart_toolbar_drives_navigation() {
    let mut figure = Figure::new(400, 300);
    figure.add_axes(Axes::new([0.0, 0.0, 1.0, 1.0]).xlim(0.0, 400.0).ylim(0.0, 300.0));
    let mut chart = Chart::new(figure);

    chart.press_tool(Tool::Pan);
    assert_eq!(chart.navigation().mode(), NavigationMode::Pan);
    chart.press_tool(Tool::Zoom);
    assert_eq!(chart.navigation().mode(), NavigationMode::Zoom);
    assert!(chart.toolbar().is_active(Tool::Zoom));
    assert!(!chart.toolbar().is_active(Tool::Pan));

    chart.press_tool(Tool::Readout);
    assert_eq!(chart.navigation().mode(), NavigationMode::None);
    assert!(chart.navigation().readout().active);
}
