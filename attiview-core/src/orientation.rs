//! Scene orientation driven by the arrow keys

/// Lower bound of the roll range, inclusive
pub const ROLL_MIN: i32 = -180;
/// Span of both angle ranges in degrees
pub const FULL_TURN: i32 = 360;

/// The four arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKey {
    Left,
    Up,
    Right,
    Down,
}

/// Roll in `[-180, 180)` and pitch in `[0, 360)`, whole degrees
///
/// Both angles wrap around their range; they are never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrientationState {
    roll: i32,
    pitch: i32,
}

impl OrientationState {
    /// Build an orientation, wrapping both angles into range
    pub fn new(roll: i32, pitch: i32) -> Self {
        Self {
            roll: wrap_roll(roll),
            pitch: wrap_pitch(pitch),
        }
    }

    pub fn roll(&self) -> i32 {
        self.roll
    }

    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    /// Step roll by `delta` degrees
    pub fn adjust_roll(&mut self, delta: i32) {
        self.roll = wrap_roll(self.roll + delta.rem_euclid(FULL_TURN));
    }

    /// Step pitch by `delta` degrees
    pub fn adjust_pitch(&mut self, delta: i32) {
        self.pitch = wrap_pitch(self.pitch + delta.rem_euclid(FULL_TURN));
    }

    /// Apply one arrow key press: left/right roll, up/down pitch
    pub fn apply_arrow(&mut self, key: ArrowKey) {
        match key {
            ArrowKey::Left => self.adjust_roll(1),
            ArrowKey::Right => self.adjust_roll(-1),
            ArrowKey::Up => self.adjust_pitch(-1),
            ArrowKey::Down => self.adjust_pitch(1),
        }
    }
}

fn wrap_roll(roll: i32) -> i32 {
    (roll - ROLL_MIN).rem_euclid(FULL_TURN) + ROLL_MIN
}

fn wrap_pitch(pitch: i32) -> i32 {
    pitch.rem_euclid(FULL_TURN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_wraps_at_top_of_range() {
        let mut orientation = OrientationState::new(179, 0);
        orientation.apply_arrow(ArrowKey::Left);
        assert_eq!(orientation.roll(), -180);
    }

    #[test]
    fn test_roll_wraps_at_bottom_of_range() {
        let mut orientation = OrientationState::new(-180, 0);
        orientation.apply_arrow(ArrowKey::Right);
        assert_eq!(orientation.roll(), 179);
    }

    #[test]
    fn test_pitch_wraps_both_ways() {
        let mut orientation = OrientationState::default();
        orientation.apply_arrow(ArrowKey::Up);
        assert_eq!(orientation.pitch(), 359);
        orientation.apply_arrow(ArrowKey::Down);
        assert_eq!(orientation.pitch(), 0);
    }

    #[test]
    fn test_new_wraps_out_of_range_input() {
        let orientation = OrientationState::new(180, 360);
        assert_eq!(orientation.roll(), -180);
        assert_eq!(orientation.pitch(), 0);

        let orientation = OrientationState::new(-181, -1);
        assert_eq!(orientation.roll(), 179);
        assert_eq!(orientation.pitch(), 359);
    }

    #[test]
    fn test_extreme_deltas_stay_in_range() {
        let mut orientation = OrientationState::new(10, 0);
        orientation.adjust_roll(i32::MAX);
        assert_eq!(orientation.roll(), 137);

        let mut orientation = OrientationState::new(10, 0);
        orientation.adjust_roll(i32::MIN);
        assert_eq!(orientation.roll(), -118);

        let mut orientation = OrientationState::new(0, 359);
        orientation.adjust_pitch(i32::MAX);
        assert_eq!(orientation.pitch(), 126);
        orientation.adjust_pitch(i32::MIN);
        assert_eq!(orientation.pitch(), 358);
    }
}
