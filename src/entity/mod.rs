// =============================================================================
// ENTITY: the closed set of moving characters
//
// Every character is one `Entity`: shared movement state in a `Body`, plus a
// per-kind `Role` (the player's action queue, or an NPC brain). Cross-entity
// decisions read a `Snapshot` taken before each group updates, and anything
// that has to touch another entity is returned as an `Interaction` for the
// level to resolve.
// =============================================================================

pub mod character;
pub mod npc;
pub mod player;
pub mod spawner;

pub use character::Body;
pub use npc::{ActiveState, NpcBrain, NpcState};
pub use player::{Action, EatenPower, PlayerState, Steer};
pub use spawner::{CharacterKeys, Spawned, spawn_entities};

use glam::{IVec2, Vec2};

use crate::assets::Art;
use crate::geometry::Rect;
use crate::sprite::{Sprite, SpriteId};
use crate::surface::{Surface, rotate_image};

// ── Kinds ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Damsel,
    Skeleton,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Player, EntityKind::Damsel, EntityKind::Skeleton];

    /// File stem of this kind's sprite sheet.
    pub fn sheet_name(self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Damsel => "damsel",
            EntityKind::Skeleton => "skeleton",
        }
    }

    pub fn faction(self) -> Option<Faction> {
        match self {
            EntityKind::Player => None,
            EntityKind::Damsel => Some(Faction::Good),
            EntityKind::Skeleton => Some(Faction::Bad),
        }
    }

    /// What the player gains by consuming this kind.
    pub fn power(self) -> EatenPower {
        match self {
            EntityKind::Player => EatenPower::EmptyStomach,
            EntityKind::Damsel => EatenPower::Damsel,
            EntityKind::Skeleton => EatenPower::BasicSkeleton,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Faction {
    Good,
    Bad,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    Down,
    Left,
    Right,
    Up,
}

// ── Snapshot ────────────────────────────────────────────────────────────────

/// Read-only copy of what other entities need to know about one entity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EntityView {
    pub id: SpriteId,
    pub kind: EntityKind,
    pub rect: Rect,
    pub hitbox: Rect,
    pub compass: Vec2,
    pub facing: Facing,
}

/// Positions and headings of every live entity at one instant.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub player: Option<EntityView>,
    pub good: Vec<EntityView>,
    pub bad: Vec<EntityView>,
}

impl Snapshot {
    pub fn find(&self, id: SpriteId) -> Option<&EntityView> {
        self.player
            .iter()
            .chain(&self.good)
            .chain(&self.bad)
            .find(|v| v.id == id)
    }

    pub fn faction(&self, faction: Faction) -> &[EntityView] {
        match faction {
            Faction::Good => &self.good,
            Faction::Bad => &self.bad,
        }
    }
}

/// Everything an entity may read during its update.
pub struct UpdateContext<'a> {
    pub snapshot: &'a Snapshot,
    /// Rects of every obstacle sprite.
    pub obstacles: &'a [Rect],
    /// Seconds of unpaused level time.
    pub now: f32,
    pub steer: Steer,
}

/// Something that happened during an update that involves more than the
/// entity itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interaction {
    Died { id: SpriteId, kind: EntityKind },
    PlayerContact { npc: SpriteId },
}

// ── Entity ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub enum Role {
    Player(PlayerState),
    Npc(NpcBrain),
}

#[derive(Clone, Debug)]
pub struct Entity {
    id: SpriteId,
    kind: EntityKind,
    pub body: Body,
    pub role: Role,
    alive: bool,
}

impl Entity {
    pub fn new(id: SpriteId, kind: EntityKind, pos: IVec2) -> Self {
        let body = Body::for_kind(kind, pos);
        let role = match kind {
            EntityKind::Player => Role::Player(PlayerState::new(id.raw() as u64)),
            _ => Role::Npc(NpcBrain::new(body.rect)),
        };
        Self { id, kind, body, role, alive: true }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark dead. Returns the matching interaction the first time only.
    pub fn die(&mut self) -> Option<Interaction> {
        if !self.alive {
            return None;
        }
        self.alive = false;
        Some(Interaction::Died { id: self.id, kind: self.kind })
    }

    pub fn view(&self) -> EntityView {
        EntityView {
            id: self.id,
            kind: self.kind,
            rect: self.body.rect,
            hitbox: self.body.hitbox,
            compass: self.body.compass,
            facing: self.body.facing,
        }
    }

    pub fn player(&self) -> Option<&PlayerState> {
        match &self.role {
            Role::Player(p) => Some(p),
            Role::Npc(_) => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.role {
            Role::Player(p) => Some(p),
            Role::Npc(_) => None,
        }
    }

    pub fn brain(&self) -> Option<&NpcBrain> {
        match &self.role {
            Role::Npc(b) => Some(b),
            Role::Player(_) => None,
        }
    }

    pub fn brain_mut(&mut self) -> Option<&mut NpcBrain> {
        match &mut self.role {
            Role::Npc(b) => Some(b),
            Role::Player(_) => None,
        }
    }

    /// Non-owning link to the player, resolved through snapshots.
    pub fn set_player(&mut self, player: SpriteId) {
        if let Role::Npc(brain) = &mut self.role {
            brain.player = Some(player);
        }
    }

    pub fn player_ref(&self) -> Option<SpriteId> {
        self.brain().and_then(|b| b.player)
    }

    /// Advance one tick. Dead entities do nothing.
    pub fn update(&mut self, ctx: &UpdateContext<'_>, out: &mut Vec<Interaction>) {
        if !self.alive {
            return;
        }
        match self.kind {
            EntityKind::Player => player::update(self, ctx),
            EntityKind::Damsel => npc::update_damsel(self, ctx, out),
            EntityKind::Skeleton => npc::update_skeleton(self, ctx, out),
        }
    }

    /// Put this NPC into its thrown flight along `heading`.
    pub fn throw(&mut self, heading: Vec2, now: f32) {
        if let Role::Npc(brain) = &mut self.role {
            brain.set_thrown(now);
            self.body.compass = heading;
        }
    }
}

impl Sprite for Entity {
    fn id(&self) -> SpriteId {
        self.id
    }

    fn rect(&self) -> Rect {
        self.body.rect
    }

    fn hitbox(&self) -> Rect {
        self.body.hitbox
    }

    fn draw(&self, surface: &mut Surface, art: &Art, offset: IVec2) {
        let Some(anims) = art.characters.for_kind(self.kind) else { return };
        let Some(frame) = anims.frame(self.body.facing, self.body.frame_index) else { return };

        if self.kind == EntityKind::Player {
            // Rotated frames grow, so keep them centred on the rect.
            let rotated = rotate_image(frame, self.body.rotation_angle());
            let size = IVec2::new(rotated.width() as i32, rotated.height() as i32);
            let topleft = self.body.rect.center() - size / 2;
            surface.blit(&rotated, topleft - offset);
        } else {
            surface.blit(frame, self.body.rect.topleft() - offset);
        }
    }
}
