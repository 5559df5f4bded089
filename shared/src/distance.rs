//! Touch-surface distance adjustment for a held object.
//!
//! The touch surface is split into a push band at the top, a pull band at the bottom
//! and a neutral remainder. Only the central column counts so that sideways swipes do
//! not move the object.

use crate::{
    constants::{
        GRAB_DISTANCE_STEP, MIN_GRAB_DISTANCE, TOUCH_CENTER_HALF_WIDTH, TOUCH_PULL_Y, TOUCH_PUSH_Y,
    },
    types::Vec2,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchRegion {
    /// Top center: move the object away.
    Push,
    /// Bottom center: bring the object closer.
    Pull,
    Neutral,
}

/// Classify a touch position in `[-1, 1] x [-1, 1]`.
pub fn classify_touch(touch: Vec2) -> TouchRegion {
    let centered = (-TOUCH_CENTER_HALF_WIDTH..=TOUCH_CENTER_HALF_WIDTH).contains(&touch.x);
    if !centered {
        return TouchRegion::Neutral;
    }

    if touch.y > TOUCH_PUSH_Y {
        TouchRegion::Push
    } else if touch.y < TOUCH_PULL_Y {
        TouchRegion::Pull
    } else {
        TouchRegion::Neutral
    }
}

/// Apply one tick of touch input to a grab distance.
///
/// Each qualifying tick moves the distance by a fixed step; the result never goes
/// below [`MIN_GRAB_DISTANCE`].
pub fn adjust_distance(distance: f32, touch: Vec2) -> f32 {
    let next = match classify_touch(touch) {
        TouchRegion::Push => distance + GRAB_DISTANCE_STEP,
        TouchRegion::Pull => distance - GRAB_DISTANCE_STEP,
        TouchRegion::Neutral => distance,
    };
    next.max(MIN_GRAB_DISTANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-5;

    #[test]
    fn regions() {
        assert_eq!(classify_touch(Vec2::new(0.0, 0.61)), TouchRegion::Push);
        assert_eq!(classify_touch(Vec2::new(0.49, 1.0)), TouchRegion::Push);
        assert_eq!(classify_touch(Vec2::new(0.0, -0.91)), TouchRegion::Pull);
        assert_eq!(classify_touch(Vec2::new(0.0, 0.6)), TouchRegion::Neutral);
        assert_eq!(classify_touch(Vec2::new(0.0, -0.9)), TouchRegion::Neutral);
        assert_eq!(classify_touch(Vec2::new(0.5, 1.0)), TouchRegion::Push);
        assert_eq!(classify_touch(Vec2::new(-0.5, -1.0)), TouchRegion::Pull);
        assert_eq!(classify_touch(Vec2::new(0.51, 1.0)), TouchRegion::Neutral);
        assert_eq!(classify_touch(Vec2::new(-0.8, -1.0)), TouchRegion::Neutral);
        assert_eq!(classify_touch(Vec2::zeros()), TouchRegion::Neutral);
    }

    #[test]
    fn push_accumulates_linearly() {
        let mut d = 2.0;
        for _ in 0..10 {
            d = adjust_distance(d, Vec2::new(0.0, 0.9));
        }
        assert!((d - 3.0).abs() < EPS);
    }

    #[test]
    fn pull_never_goes_below_the_floor() {
        let mut d = 0.35;
        for _ in 0..100 {
            d = adjust_distance(d, Vec2::new(0.1, -1.0));
            assert!(d >= MIN_GRAB_DISTANCE);
        }
        assert_eq!(d, MIN_GRAB_DISTANCE);
    }

    #[test]
    fn neutral_leaves_distance_alone() {
        assert_eq!(adjust_distance(4.2, Vec2::new(0.9, 0.9)), 4.2);
        assert_eq!(adjust_distance(4.2, Vec2::new(0.0, 0.0)), 4.2);
    }

    #[test]
    fn below_floor_distances_are_lifted() {
        assert_eq!(adjust_distance(0.02, Vec2::zeros()), MIN_GRAB_DISTANCE);
    }
}
