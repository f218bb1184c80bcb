// crates/horizon-layout/src/transform.rs
//
// The residual ambiguity group of a 2D spectral embedding: optional axis
// swap followed by independent x/y sign flips.

use crate::spectral::Point;

/// One element of the 8-element ambiguity group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisTransform {
    /// Exchange x and y before applying signs.
    pub swap: bool,
    /// Sign applied to the (post-swap) x-axis: +1 or -1.
    pub x_sign: i8,
    /// Sign applied to the (post-swap) y-axis: +1 or -1.
    pub y_sign: i8,
}

impl AxisTransform {
    pub const IDENTITY: AxisTransform = AxisTransform {
        swap: false,
        x_sign: 1,
        y_sign: 1,
    };

    pub fn apply(&self, point: Point) -> Point {
        let [x, y] = if self.swap {
            [point[1], point[0]]
        } else {
            point
        };
        [x * f64::from(self.x_sign), y * f64::from(self.y_sign)]
    }

    pub fn apply_all(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.apply(p)).collect()
    }
}

const fn t(swap: bool, x_sign: i8, y_sign: i8) -> AxisTransform {
    AxisTransform {
        swap,
        x_sign,
        y_sign,
    }
}

/// All eight transforms in evaluation order: swap is the outer loop, then
/// x-sign, then y-sign, with "no swap" and "+1" first. Continuity alignment
/// breaks exact ties in favour of the earlier entry, so this order is part
/// of the output contract.
pub const AMBIGUITY_GROUP: [AxisTransform; 8] = [
    t(false, 1, 1),
    t(false, 1, -1),
    t(false, -1, 1),
    t(false, -1, -1),
    t(true, 1, 1),
    t(true, 1, -1),
    t(true, -1, 1),
    t(true, -1, -1),
];
