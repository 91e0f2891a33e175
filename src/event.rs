//! Synthetic input events in the plotting vocabulary.

use crate::figure::{AxesId, Figure};
use crate::geometry::Point;
use crate::mapper;

/// Named mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
}

/// Button carried by a canvas event: a mouse button, or the scroll
/// direction literals `up` / `down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonToken {
    Mouse(MouseButton),
    ScrollUp,
    ScrollDown,
}

impl ButtonToken {
    /// Parse a host button name such as `left` or `scrollup`.
    ///
    /// Unknown names yield `None`; the event is still dispatched with no
    /// button.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        let button = match name.as_str() {
            "left" => Self::Mouse(MouseButton::Left),
            "middle" => Self::Mouse(MouseButton::Middle),
            "right" => Self::Mouse(MouseButton::Right),
            "back" => Self::Mouse(MouseButton::Back),
            "forward" => Self::Mouse(MouseButton::Forward),
            _ => match name.strip_prefix("scroll") {
                Some("up") => Self::ScrollUp,
                Some("down") => Self::ScrollDown,
                _ => return None,
            },
        };

        Some(button)
    }

    pub fn mouse(self) -> Option<MouseButton> {
        match self {
            Self::Mouse(button) => Some(button),
            _ => None,
        }
    }
}

/// Raw pointer or touch notification as delivered by the host widget.
///
/// `pos` is in host coordinates: points, origin at the top left of the
/// window, y growing downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPointerEvent {
    pub pos: (f32, f32),
    pub button: String,
    pub is_double_tap: bool,
    pub is_scroll: bool,
}

impl RawPointerEvent {
    pub fn new(pos: (f32, f32), button: impl Into<String>) -> Self {
        Self {
            pos,
            button: button.into(),
            is_double_tap: false,
            is_scroll: false,
        }
    }

    pub fn double_tap(mut self) -> Self {
        self.is_double_tap = true;

        self
    }

    pub fn scroll(mut self) -> Self {
        self.is_scroll = true;

        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEventKind {
    ButtonPress,
    ButtonRelease,
    MotionNotify,
}

/// Location event resolved against a figure.
///
/// `inaxes`, `xdata` and `ydata` are filled in at construction time from
/// the display position.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasEvent {
    pub kind: CanvasEventKind,
    pub x: f64,
    pub y: f64,
    pub button: Option<ButtonToken>,
    pub inaxes: Option<AxesId>,
    pub xdata: Option<f64>,
    pub ydata: Option<f64>,
    pub gui_event: Option<RawPointerEvent>,
}

impl CanvasEvent {
    pub fn new(
        kind: CanvasEventKind,
        figure: &Figure,
        position: Point,
        button: Option<ButtonToken>,
        gui_event: Option<RawPointerEvent>,
    ) -> Self {
        let inaxes = figure.inaxes(position);
        let (xdata, ydata) = match inaxes.and_then(|id| figure.get_axes(id)) {
            Some(axes) => {
                let data = mapper::display_to_data(position, Some(axes));
                (Some(data.x), Some(data.y))
            }
            None => (None, None),
        };

        Self {
            kind,
            x: position.x,
            y: position.y,
            button,
            inaxes,
            xdata,
            ydata,
            gui_event,
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn mouse_button(&self) -> Option<MouseButton> {
        self.button.and_then(ButtonToken::mouse)
    }
}
