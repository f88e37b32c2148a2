//! Start/pause animation loop driven by a re-armed one-shot timer

use log::debug;
use std::time::{Duration, Instant};

/// Interval between animation frames
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(30);

/// Arms a one-shot timer that later calls back into the scheduler
pub trait TimerDriver {
    fn schedule(&mut self, after: Duration);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    #[default]
    Stopped,
    Running,
}

/// What a timer firing did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Advanced to this frame number; a redraw is due
    Frame(u64),
    /// The scheduler was paused when the tick arrived; nothing happened
    Suppressed,
}

/// Frame counter advanced by a timer that re-arms itself while running
///
/// At most one timer is outstanding at any time. Pausing only clears the
/// running flag; a tick already armed still arrives, is suppressed, and is
/// not re-armed. Starting again while that tick is outstanding reuses it
/// instead of arming a second one.
#[derive(Debug, Clone)]
pub struct AnimationScheduler {
    phase: AnimationPhase,
    frame_number: u64,
    interval: Duration,
    armed: bool,
}

impl AnimationScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            phase: AnimationPhase::Stopped,
            frame_number: 0,
            interval,
            armed: false,
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == AnimationPhase::Running
    }

    /// Frames advanced since the scheduler was created
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True while a timer tick is outstanding
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Start animating; returns false if already running
    pub fn start<T: TimerDriver + ?Sized>(&mut self, timer: &mut T) -> bool {
        if self.is_running() {
            return false;
        }
        self.phase = AnimationPhase::Running;
        if !self.armed {
            timer.schedule(self.interval);
            self.armed = true;
        }
        debug!("animation started at frame {}", self.frame_number);
        true
    }

    /// Pause animating; returns false if already stopped
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = AnimationPhase::Stopped;
        debug!("animation paused at frame {}", self.frame_number);
        true
    }

    /// Handle the armed timer firing
    pub fn on_timer<T: TimerDriver + ?Sized>(&mut self, timer: &mut T) -> TickOutcome {
        self.armed = false;
        if !self.is_running() {
            debug!("tick after pause suppressed");
            return TickOutcome::Suppressed;
        }
        self.frame_number += 1;
        timer.schedule(self.interval);
        self.armed = true;
        debug!("frame number {}", self.frame_number);
        TickOutcome::Frame(self.frame_number)
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

/// Wall-clock timer for event loops that wait until a deadline
#[derive(Debug, Clone, Default)]
pub struct DeadlineTimer {
    deadline: Option<Instant>,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// When the armed tick is due
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Disarm and return true if the armed tick is due at `now`
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl TimerDriver for DeadlineTimer {
    fn schedule(&mut self, after: Duration) {
        self.deadline = Some(Instant::now() + after);
    }
}
