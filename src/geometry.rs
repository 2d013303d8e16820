// =============================================================================
// GEOMETRY.RS: Integer rectangles and distances for sprite placement
//
// Everything in the world is positioned by an axis-aligned pixel rectangle:
// - Tiles and characters own a `Rect` (draw position) and a hitbox `Rect`.
// - NPC radar is an inflated `Rect`.
// - Collision tests are rectangle overlaps.
// =============================================================================

use glam::{IVec2, Vec2};

/// Axis-aligned pixel rectangle, top-left origin, y grows downward.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size whose top-left corner is `topleft`.
    pub fn at(topleft: IVec2, w: i32, h: i32) -> Self {
        Self::new(topleft.x, topleft.y, w, h)
    }

    #[inline] pub fn left(&self) -> i32 { self.x }
    #[inline] pub fn right(&self) -> i32 { self.x + self.w }
    #[inline] pub fn top(&self) -> i32 { self.y }
    #[inline] pub fn bottom(&self) -> i32 { self.y + self.h }
    #[inline] pub fn topleft(&self) -> IVec2 { IVec2::new(self.x, self.y) }

    /// Centre rounded toward the top-left (`x + w / 2`, floor division).
    #[inline]
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.centerx(), self.centery())
    }

    #[inline] pub fn centerx(&self) -> i32 { self.x + self.w.div_euclid(2) }
    #[inline] pub fn centery(&self) -> i32 { self.y + self.h.div_euclid(2) }

    /// Move so that `center()` returns `c`.
    pub fn set_center(&mut self, c: IVec2) {
        self.x = c.x - self.w.div_euclid(2);
        self.y = c.y - self.h.div_euclid(2);
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Grow (or shrink, for negative deltas) around the centre.
    ///
    /// The origin shifts by `floor(d / 2)`, so odd deltas keep the extra
    /// pixel on the right/bottom edge.
    pub fn inflate(&self, dw: i32, dh: i32) -> Rect {
        Rect {
            x: self.x - dw.div_euclid(2),
            y: self.y - dh.div_euclid(2),
            w: self.w + dw,
            h: self.h + dh,
        }
    }

    /// Strict overlap test. Touching edges do not collide, and a rectangle
    /// with zero width or height never collides with anything.
    pub fn collides(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Indices of every rectangle in `others` overlapping `self`, in order.
    pub fn collide_all<'a>(&self, others: impl IntoIterator<Item = &'a Rect>) -> Vec<usize> {
        others
            .into_iter()
            .enumerate()
            .filter_map(|(i, r)| self.collides(r).then_some(i))
            .collect()
    }
}

/// Straight-line distance between two pixel positions.
#[inline]
pub fn distance_euclidean(a: IVec2, b: IVec2) -> f32 {
    (a - b).as_vec2().length()
}

/// Unit step (-1, 0 or 1 per axis) that moves `from` toward `to`.
#[inline]
pub fn direction_toward(from: IVec2, to: IVec2) -> IVec2 {
    (to - from).signum()
}

/// Reflect `v` off a surface with unit normal `n`.
#[inline]
pub fn reflect(v: Vec2, n: Vec2) -> Vec2 {
    v - 2.0 * v.dot(n) * n
}

/// Which axis separates two points the most. Ties count as vertical.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

pub fn further_axis(from: IVec2, to: IVec2) -> Axis {
    let d = (from - to).abs();
    if d.x > d.y { Axis::Horizontal } else { Axis::Vertical }
}
