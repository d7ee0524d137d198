use serde::{Deserialize, Serialize};

/// Pixel offset from the preview container's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn rounded(self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }
}

/// Pointer location in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
}

/// Viewport location of the container's bounding box top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerOrigin {
    pub left: f64,
    pub top: f64,
}

/// Not clamped: dragging past the container edges yields negative or
/// oversized offsets.
pub fn container_relative(sample: PointerSample, origin: ContainerOrigin) -> Position {
    Position {
        x: sample.client_x - origin.left,
        y: sample.client_y - origin.top,
    }
}

/// Idle/Dragging state machine for the text overlay.
///
/// `S` is whatever keeps the move/up listeners registered. The controller
/// owns it for the lifetime of the gesture and drops it exactly once, either
/// in [`DragController::end`] or when the controller itself is dropped.
#[derive(Debug)]
pub struct DragController<S> {
    subscription: Option<S>,
}

impl<S> DragController<S> {
    pub fn new() -> Self {
        Self { subscription: None }
    }

    pub fn is_dragging(&self) -> bool {
        self.subscription.is_some()
    }

    /// Starts a gesture. A start while already dragging is ignored and
    /// `subscribe` is not called.
    pub fn begin<F>(&mut self, subscribe: F) -> bool
    where
        F: FnOnce() -> S,
    {
        if self.subscription.is_some() {
            return false;
        }
        self.subscription = Some(subscribe());
        true
    }

    pub fn drag_move(&mut self, sample: PointerSample, origin: ContainerOrigin) -> Option<Position> {
        if self.subscription.is_none() {
            return None;
        }
        Some(container_relative(sample, origin))
    }

    /// Ends the gesture and releases its subscription. Returns false when
    /// there was no gesture to end.
    pub fn end(&mut self) -> bool {
        match self.subscription.take() {
            Some(subscription) => {
                drop(subscription);
                true
            }
            None => false,
        }
    }
}

impl<S> Default for DragController<S> {
    fn default() -> Self {
        Self::new()
    }
}
