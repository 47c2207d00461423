//! Balloon placement: left-or-right side selection with hysteresis.
//!
//! The balloon is anchored to an owner window (the mascot) that the user
//! drags around the screen. Side selection is a pure function so hosts can
//! call it on every move event without touching animator state.

/// Side of the owner on which the balloon sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Balloon to the left of the owner.
    Left,
    /// Balloon to the right of the owner.
    #[default]
    Right,
}

/// A chosen side and the balloon's horizontal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Chosen side.
    pub side: Side,
    /// Horizontal position of the balloon's left edge.
    pub x: i32,
}

/// Choose which side of the owner the balloon goes on.
///
/// A side fits when the whole balloon stays inside `[0, screen_width)`.
/// When exactly one side fits it wins; when both or neither fit the
/// previous side is kept, so the balloon does not flip back and forth
/// while the owner is dragged near the middle or squeezed at an edge.
pub fn choose_side(
    owner_x: i32,
    owner_width: i32,
    balloon_width: i32,
    screen_width: i32,
    previous: Side,
) -> Placement {
    let left_x = owner_x - balloon_width;
    let right_x = owner_x + owner_width;
    let fits_left = left_x >= 0;
    let fits_right = right_x + balloon_width <= screen_width;

    let side = match (fits_left, fits_right) {
        (true, false) => Side::Left,
        (false, true) => Side::Right,
        _ => previous,
    };
    let x = match side {
        Side::Left => left_x,
        Side::Right => right_x,
    };

    Placement { side, x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_fitting_side_wins() {
        // Owner at the left edge: only the right side has room
        let p = choose_side(10, 100, 200, 1920, Side::Left);
        assert_eq!(p.side, Side::Right);
        assert_eq!(p.x, 110);

        // Owner at the right edge: only the left side has room
        let p = choose_side(1800, 100, 200, 1920, Side::Right);
        assert_eq!(p.side, Side::Left);
        assert_eq!(p.x, 1600);
    }

    #[test]
    fn test_both_fit_keeps_previous() {
        let p = choose_side(800, 100, 200, 1920, Side::Left);
        assert_eq!(p.side, Side::Left);
        assert_eq!(p.x, 600);

        let p = choose_side(800, 100, 200, 1920, Side::Right);
        assert_eq!(p.side, Side::Right);
        assert_eq!(p.x, 900);
    }

    #[test]
    fn test_neither_fits_keeps_previous() {
        // Balloon wider than either margin
        let p = choose_side(400, 100, 500, 900, Side::Right);
        assert_eq!(p.side, Side::Right);

        let p = choose_side(400, 100, 500, 900, Side::Left);
        assert_eq!(p.side, Side::Left);
    }

    #[test]
    fn test_no_flip_while_owner_drifts() {
        // Dragging across the middle of the screen never flips the side
        let mut side = Side::Right;
        for owner_x in (400..1400).step_by(25) {
            let p = choose_side(owner_x, 100, 300, 1920, side);
            side = p.side;
        }
        assert_eq!(side, Side::Right);
    }
}
