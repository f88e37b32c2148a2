//! Single-flight pointer drag tracking

/// Pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    Other(u16),
}

/// Pixel position, origin at the top-left of the drawing area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An active drag: the button that started it and three tracked positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drag {
    pub button: PointerButton,
    pub start: PixelPos,
    pub previous: PixelPos,
    pub current: PixelPos,
}

impl Drag {
    /// Movement since the previous motion event
    pub fn step(&self) -> (i32, i32) {
        (self.current.x - self.previous.x, self.current.y - self.previous.y)
    }

    /// Movement since the press that started the drag
    pub fn total(&self) -> (i32, i32) {
        (self.current.x - self.start.x, self.current.y - self.start.y)
    }
}

/// `Idle` until a press, `Dragging` until the same button is released
///
/// Presses while dragging, motion while idle and releases of any other
/// button are ignored, so at most one drag is ever in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging(Drag),
}

impl DragSession {
    pub fn new() -> Self {
        Self::Idle
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragSession::Dragging(_))
    }

    /// The active drag, if any
    pub fn active(&self) -> Option<&Drag> {
        match self {
            DragSession::Idle => None,
            DragSession::Dragging(drag) => Some(drag),
        }
    }

    /// Handle a button press; returns true if it started a drag
    pub fn press(&mut self, button: PointerButton, pos: PixelPos) -> bool {
        if self.is_dragging() {
            return false;
        }
        *self = DragSession::Dragging(Drag {
            button,
            start: pos,
            previous: pos,
            current: pos,
        });
        true
    }

    /// Handle pointer motion; returns the updated drag while one is active
    pub fn motion(&mut self, pos: PixelPos) -> Option<&Drag> {
        match self {
            DragSession::Idle => None,
            DragSession::Dragging(drag) => {
                drag.previous = drag.current;
                drag.current = pos;
                Some(&*drag)
            }
        }
    }

    /// Handle a button release; returns the finished drag if it ended one
    pub fn release(&mut self, button: PointerButton) -> Option<Drag> {
        match *self {
            DragSession::Dragging(drag) if drag.button == button => {
                *self = DragSession::Idle;
                Some(drag)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_shifts_positions() {
        let mut session = DragSession::new();
        session.press(PointerButton::Left, PixelPos::new(10, 10));
        session.motion(PixelPos::new(12, 15));
        let drag = session.motion(PixelPos::new(20, 11)).copied().unwrap();

        assert_eq!(drag.start, PixelPos::new(10, 10));
        assert_eq!(drag.previous, PixelPos::new(12, 15));
        assert_eq!(drag.current, PixelPos::new(20, 11));
        assert_eq!(drag.step(), (8, -4));
        assert_eq!(drag.total(), (10, 1));
    }

    #[test]
    fn test_idle_ignores_motion_and_release() {
        let mut session = DragSession::new();
        assert!(session.motion(PixelPos::new(1, 1)).is_none());
        assert!(session.release(PointerButton::Left).is_none());
        assert_eq!(session, DragSession::Idle);
    }
}
