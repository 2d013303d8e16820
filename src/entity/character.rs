use glam::{IVec2, Vec2};

use super::{EntityKind, Facing};
use crate::geometry::{Axis, Rect, further_axis, reflect};
use crate::settings::{ANIMATION_SPEED, ENTITY_HEIGHT, ENTITY_WIDTH, WALKING_IMAGE_COUNT};

/// Compass components within this of zero count as "not moving" on that axis
/// when picking a facing.
const FACING_DEAD_ZONE: f32 = 0.25;

/// Movement, collision and animation state shared by every character.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub rect: Rect,
    pub hitbox: Rect,
    /// Hitbox centre relative to the rect centre.
    hitbox_shift: IVec2,
    /// Heading. Components are in [-1, 1]; not necessarily unit length.
    pub compass: Vec2,
    pub speed: i32,
    pub facing: Facing,
    pub frame_index: f32,
    /// Sub-pixel movement not yet applied to `rect`.
    tracker: Vec2,
}

impl Body {
    pub fn new(rect: Rect, hitbox: Rect, hitbox_shift: IVec2) -> Self {
        let mut body = Self {
            rect,
            hitbox,
            hitbox_shift,
            compass: Vec2::X,
            speed: 1,
            facing: Facing::Right,
            frame_index: 0.0,
            tracker: Vec2::ZERO,
        };
        body.sync_hitbox();
        body
    }

    /// Standard body for `kind`, image-sized at `pos`.
    pub fn for_kind(kind: EntityKind, pos: IVec2) -> Self {
        let rect = Rect::at(pos, ENTITY_WIDTH as i32, ENTITY_HEIGHT as i32);
        match kind {
            // Wide enough to cover the rotated frame, nudged one pixel right.
            EntityKind::Player => Self::new(rect, rect.inflate(2, 0), IVec2::new(1, 0)),
            EntityKind::Skeleton => Self::new(rect, rect.inflate(-4, 0), IVec2::ZERO),
            EntityKind::Damsel => Self::new(rect, rect, IVec2::ZERO),
        }
    }

    pub fn sync_hitbox(&mut self) {
        self.hitbox.set_center(self.rect.center() + self.hitbox_shift);
    }

    // ── Movement ────────────────────────────────────────────────────────────

    /// Accumulate the compass and move `speed` pixels on every axis whose
    /// accumulated distance reached a whole pixel.
    pub fn move_by_compass(&mut self, speed: i32) {
        self.tracker += self.compass;

        if self.tracker.y <= -1.0 {
            self.rect.translate(0, -speed);
            self.tracker.y += 1.0;
        } else if self.tracker.y >= 1.0 {
            self.rect.translate(0, speed);
            self.tracker.y -= 1.0;
        }

        if self.tracker.x <= -1.0 {
            self.rect.translate(-speed, 0);
            self.tracker.x += 1.0;
        } else if self.tracker.x >= 1.0 {
            self.rect.translate(speed, 0);
            self.tracker.x -= 1.0;
        }

        self.sync_hitbox();
    }

    /// Move straight by `dir * speed` pixels, bypassing the tracker.
    pub fn step(&mut self, dir: IVec2, speed: i32) {
        self.rect.translate(dir.x * speed, dir.y * speed);
        self.sync_hitbox();
    }

    pub fn tracker(&self) -> Vec2 {
        self.tracker
    }

    // ── Facing / animation ──────────────────────────────────────────────────

    pub fn update_facing(&mut self) {
        self.facing = facing_from_compass(self.compass);
    }

    pub fn animate(&mut self) {
        self.frame_index += ANIMATION_SPEED;
        if self.frame_index >= WALKING_IMAGE_COUNT as f32 {
            self.frame_index = 0.0;
        }
    }

    /// Degrees (counter-clockwise) to tilt the current frame toward the
    /// compass cross-axis component.
    pub fn rotation_angle(&self) -> f32 {
        match self.facing {
            Facing::Right => -(self.compass.y * 45.0),
            Facing::Left => self.compass.y * 45.0,
            Facing::Up => -(self.compass.x * 45.0),
            Facing::Down => self.compass.x * 45.0,
        }
    }

    // ── Collisions ──────────────────────────────────────────────────────────

    /// Find every obstacle overlapping the rect, nudge out of each one, and
    /// return the centres of those that lie off-centre on their further axis.
    ///
    /// The second value is true if anything overlapped at all.
    pub fn detect_collisions(&mut self, obstacles: &[Rect]) -> (Vec<IVec2>, bool) {
        let hits = self.rect.collide_all(obstacles);
        let mut points = Vec::with_capacity(hits.len());
        for &i in &hits {
            let other = obstacles[i];
            let c = other.center();
            let own = self.hitbox.center();
            let off_centre = match further_axis(self.rect.center(), c) {
                Axis::Vertical => c.y != own.y,
                Axis::Horizontal => c.x != own.x,
            };
            if off_centre {
                points.push(c);
            }
            self.teleport_out_of(other);
        }
        (points, !hits.is_empty())
    }

    /// Push one pixel away from `other` along the axis that separates the
    /// centres most, if the hitbox still overlaps it on that axis.
    pub fn teleport_out_of(&mut self, other: Rect) {
        let hb = self.hitbox;
        match further_axis(self.rect.center(), other.center()) {
            Axis::Horizontal => {
                if hb.centerx() < other.centerx() {
                    if other.left() - (hb.right() + 1) < 0 {
                        self.rect.translate(-1, 0);
                    }
                } else if other.right() - (hb.left() - 1) > 0 {
                    self.rect.translate(1, 0);
                }
            }
            Axis::Vertical => {
                if hb.centery() < other.centery() {
                    if other.top() - (hb.bottom() + 1) < 0 {
                        self.rect.translate(0, -1);
                    }
                } else if other.bottom() - (hb.top() - 1) > 0 {
                    self.rect.translate(0, 1);
                }
            }
        }
        self.sync_hitbox();
    }

    /// Reflect the compass off the horizontal or vertical axis if it points
    /// into the collision at `point`.
    pub fn bounce_off(&mut self, point: Vec2) {
        let center = self.rect.center().as_vec2();
        let d = point - center;
        if d.x.abs() > d.y.abs() {
            if (d.x > 0.0 && self.compass.x > 0.0) || (d.x <= 0.0 && self.compass.x < 0.0) {
                self.compass = reflect(self.compass, Vec2::X);
            }
        } else if (d.y < 0.0 && self.compass.y < 0.0) || (d.y >= 0.0 && self.compass.y > 0.0) {
            self.compass = reflect(self.compass, Vec2::Y);
        }
    }

    /// Resolve obstacle overlaps and bounce off their average centre.
    /// Returns true if anything was hit.
    pub fn collide_with_obstacles(&mut self, obstacles: &[Rect]) -> bool {
        let (points, collided) = self.detect_collisions(obstacles);
        if !points.is_empty() {
            let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.as_vec2());
            self.bounce_off(sum / points.len() as f32);
        }
        collided
    }
}

/// Facing for a heading. The dominant sign of x picks left/right; a heading
/// within the dead zone of an axis snaps to the other axis's direction.
pub fn facing_from_compass(c: Vec2) -> Facing {
    let mut facing = if c.x < 0.0 { Facing::Left } else { Facing::Right };
    if c.x > 0.0 && c.y.abs() < FACING_DEAD_ZONE {
        facing = Facing::Right;
    }
    if c.x < 0.0 && c.y.abs() < FACING_DEAD_ZONE {
        facing = Facing::Left;
    }
    if c.y > 0.0 && c.x.abs() < FACING_DEAD_ZONE {
        facing = Facing::Down;
    }
    if c.y < 0.0 && c.x.abs() < FACING_DEAD_ZONE {
        facing = Facing::Up;
    }
    facing
}
