pub mod group;

pub use group::{GroupSingle, SpriteGroup};

use glam::IVec2;

use crate::assets::Art;
use crate::geometry::Rect;
use crate::surface::Surface;

// ---------------------------------------------------------------------------
// SpriteId: stable handle used for group membership and back-references
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(u32);

impl SpriteId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Hands out unique ids for one level.
#[derive(Debug, Default)]
pub struct SpriteIds {
    next: u32,
}

impl SpriteIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> SpriteId {
        let id = SpriteId(self.next);
        self.next += 1;
        id
    }
}

// ---------------------------------------------------------------------------
// Sprite: anything a group can hold and the camera can draw
// ---------------------------------------------------------------------------

pub trait Sprite {
    fn id(&self) -> SpriteId;

    /// Draw position and size in world pixels.
    fn rect(&self) -> Rect;

    /// Collision box. Defaults to the draw rect.
    fn hitbox(&self) -> Rect {
        self.rect()
    }

    /// Draw at `rect().topleft() - offset`.
    fn draw(&self, surface: &mut Surface, art: &Art, offset: IVec2);
}
