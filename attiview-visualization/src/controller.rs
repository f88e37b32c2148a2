//! Input and timer handling, independent of any window system
//!
//! The window shell translates platform events into [`ViewerHandler`] calls
//! and acts on the returned [`Response`]. All viewer state lives in one
//! [`ViewerState`] owned by the [`ViewerController`].

use crate::ViewerConfig;
use attiview_core::{
    AnimationScheduler, ArrowKey, DragSession, OrientationState, PixelPos, PointerButton,
    TickOutcome, TimerDriver,
};
use log::{debug, info, trace};

/// Keys that do not type a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKey {
    Arrow(ArrowKey),
    Other,
}

/// Entries of the viewer's command menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Quit,
}

/// What the shell should do after an event
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub redraw: bool,
    pub quit: bool,
}

impl Response {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn redraw() -> Self {
        Self {
            redraw: true,
            quit: false,
        }
    }

    pub fn quit() -> Self {
        Self {
            redraw: false,
            quit: true,
        }
    }
}

/// Event callbacks of the viewer
///
/// Pointer positions are pixels with the origin at the top-left.
pub trait ViewerHandler {
    fn on_resize(&mut self, width: u32, height: u32) -> Response;
    fn on_char(&mut self, ch: char, pointer: PixelPos) -> Response;
    fn on_special_key(&mut self, key: SpecialKey, pointer: PixelPos) -> Response;
    fn on_pointer_button(
        &mut self,
        button: PointerButton,
        pressed: bool,
        pointer: PixelPos,
    ) -> Response;
    fn on_pointer_motion(&mut self, pointer: PixelPos) -> Response;
    fn on_timer(&mut self) -> Response;
    fn on_menu(&mut self, command: MenuCommand) -> Response;
}

const ESCAPE: char = '\u{1b}';

/// Everything the event handlers read and mutate
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    pub orientation: OrientationState,
    pub drag: DragSession,
    pub animation: AnimationScheduler,
    pub viewport: (u32, u32),
}

/// Applies events to a [`ViewerState`], arming `timer` for animation ticks
pub struct ViewerController<T: TimerDriver> {
    state: ViewerState,
    timer: T,
}

impl<T: TimerDriver> ViewerController<T> {
    pub fn new(config: &ViewerConfig, timer: T) -> Self {
        let mut controller = Self {
            state: ViewerState {
                animation: AnimationScheduler::new(config.frame_interval()),
                viewport: (config.width, config.height),
                ..ViewerState::default()
            },
            timer,
        };
        if config.start_animated {
            controller.state.animation.start(&mut controller.timer);
        }
        controller
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

impl<T: TimerDriver> ViewerHandler for ViewerController<T> {
    fn on_resize(&mut self, width: u32, height: u32) -> Response {
        self.state.viewport = (width, height);
        info!("Reshaped to width {}, height {}", width, height);
        Response::redraw()
    }

    fn on_char(&mut self, ch: char, pointer: PixelPos) -> Response {
        match ch {
            ESCAPE => {
                self.state.animation.pause();
            }
            's' | 'S' => {
                self.state.animation.start(&mut self.timer);
            }
            _ => {}
        }
        debug!(
            "typed {:?} (code {}), pointer at ({},{})",
            ch, ch as u32, pointer.x, pointer.y
        );
        Response::redraw()
    }

    fn on_special_key(&mut self, key: SpecialKey, pointer: PixelPos) -> Response {
        if let SpecialKey::Arrow(arrow) = key {
            self.state.orientation.apply_arrow(arrow);
        }
        debug!(
            "special key {:?}, pointer at ({},{}); roll {} pitch {}",
            key,
            pointer.x,
            pointer.y,
            self.state.orientation.roll(),
            self.state.orientation.pitch()
        );
        Response::redraw()
    }

    fn on_pointer_button(
        &mut self,
        button: PointerButton,
        pressed: bool,
        pointer: PixelPos,
    ) -> Response {
        if pressed {
            if self.state.drag.press(button, pointer) {
                debug!("{:?} button down at ({},{})", button, pointer.x, pointer.y);
            }
        } else if self.state.drag.release(button).is_some() {
            debug!("{:?} button up at ({},{})", button, pointer.x, pointer.y);
        }
        Response::none()
    }

    fn on_pointer_motion(&mut self, pointer: PixelPos) -> Response {
        if let Some(drag) = self.state.drag.motion(pointer) {
            let (dx, dy) = drag.step();
            let (tx, ty) = drag.total();
            trace!(
                "dragged to ({},{}), step ({},{}), total ({},{})",
                pointer.x,
                pointer.y,
                dx,
                dy,
                tx,
                ty
            );
        }
        Response::none()
    }

    fn on_timer(&mut self) -> Response {
        match self.state.animation.on_timer(&mut self.timer) {
            TickOutcome::Frame(_) => Response::redraw(),
            TickOutcome::Suppressed => Response::none(),
        }
    }

    fn on_menu(&mut self, command: MenuCommand) -> Response {
        match command {
            MenuCommand::Quit => {
                info!("quit requested");
                Response::quit()
            }
        }
    }
}
