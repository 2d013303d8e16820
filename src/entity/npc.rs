use glam::IVec2;

use super::{Body, Entity, EntityView, Facing, Interaction, Role, UpdateContext};
use crate::geometry::{Rect, direction_toward, distance_euclidean};
use crate::settings::{
    PATROL_SECONDS_PER_DIRECTION, RADAR_INFLATION_TILES, THROWN_SECONDS, THROWN_SPEED, TILE_SIZE,
};
use crate::sprite::SpriteId;

// ── States ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NpcState {
    Patrol,
    Attack,
    Flee,
    Follow,
    Thrown,
}

/// States a radar hit may request. Patrol is the passive fallback and
/// Thrown is only entered through a player contact, so neither is here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActiveState {
    Attack,
    Flee,
    Follow,
}

impl From<ActiveState> for NpcState {
    fn from(s: ActiveState) -> Self {
        match s {
            ActiveState::Attack => NpcState::Attack,
            ActiveState::Flee => NpcState::Flee,
            ActiveState::Follow => NpcState::Follow,
        }
    }
}

/// Which rectangle of a candidate the radar tests against.
#[derive(Copy, Clone)]
enum Probe {
    Rect,
    Hitbox,
}

impl Probe {
    fn of(self, v: &EntityView) -> Rect {
        match self {
            Probe::Rect => v.rect,
            Probe::Hitbox => v.hitbox,
        }
    }
}

// ── NpcBrain ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct NpcBrain {
    state: NpcState,
    radar: Rect,
    target: Option<SpriteId>,
    pub(super) player: Option<SpriteId>,
    /// Level time the current timed behaviour started.
    last_time: f32,
}

impl NpcBrain {
    pub fn new(rect: Rect) -> Self {
        let reach = TILE_SIZE * RADAR_INFLATION_TILES;
        Self {
            state: NpcState::Patrol,
            radar: rect.inflate(reach, reach),
            target: None,
            player: None,
            last_time: 0.0,
        }
    }

    pub fn state(&self) -> NpcState {
        self.state
    }

    pub fn radar(&self) -> Rect {
        self.radar
    }

    pub fn target(&self) -> Option<SpriteId> {
        self.target
    }

    pub fn set_patrol(&mut self) {
        if self.state != NpcState::Thrown {
            self.state = NpcState::Patrol;
        }
    }

    pub fn set_active(&mut self, active: ActiveState) {
        if self.state != NpcState::Thrown {
            self.state = active.into();
        }
    }

    pub fn set_thrown(&mut self, now: f32) {
        self.state = NpcState::Thrown;
        self.last_time = now;
    }

    /// Request `active` if anything in `candidates` is on radar, targeting
    /// the closest one. Returns whether anything was seen, even while thrown.
    fn radar_set_state(
        &mut self,
        body: &Body,
        candidates: &[EntityView],
        probe: Probe,
        active: ActiveState,
    ) -> bool {
        let mut closest: Option<(f32, SpriteId)> = None;
        for c in candidates {
            if !self.radar.collides(&probe.of(c)) {
                continue;
            }
            let d = distance_euclidean(body.rect.topleft(), c.rect.center());
            if closest.is_none_or(|(best, _)| d < best) {
                closest = Some((d, c.id));
            }
        }

        let Some((_, id)) = closest else { return false };
        if self.state != NpcState::Thrown {
            self.target = Some(id);
            if self.state != NpcState::from(active) {
                self.set_active(active);
            }
        }
        true
    }

    /// Like `radar_set_state`, but falls back to patrol when nothing is seen.
    fn radar_set_states(
        &mut self,
        body: &Body,
        candidates: &[EntityView],
        probe: Probe,
        active: ActiveState,
    ) {
        if !self.radar_set_state(body, candidates, probe, active) && self.state != NpcState::Patrol {
            self.set_patrol();
        }
    }
}

// ── Behaviour ───────────────────────────────────────────────────────────────

/// True if `other` is looking toward `me` along the axis that separates
/// them most.
pub fn facing_towards(me: Rect, other: &EntityView) -> bool {
    let dx = (me.x - other.rect.x).abs();
    let dy = (me.y - other.rect.y).abs();
    if dx >= dy {
        if me.x < other.rect.x { other.facing == Facing::Left } else { other.facing == Facing::Right }
    } else if me.y < other.rect.y {
        other.facing == Facing::Up
    } else {
        other.facing == Facing::Down
    }
}

fn obstacle_bounce(body: &mut Body, brain: &mut NpcBrain, ctx: &UpdateContext<'_>) {
    if body.collide_with_obstacles(ctx.obstacles) {
        brain.last_time = ctx.now;
    }
}

/// Run the current state's movement. Returns true if the NPC died.
fn move_based_on_state(body: &mut Body, brain: &mut NpcBrain, ctx: &UpdateContext<'_>) -> bool {
    match brain.state {
        NpcState::Patrol => {
            if ctx.now - brain.last_time > PATROL_SECONDS_PER_DIRECTION {
                body.compass.x = if body.compass.x != 1.0 { 1.0 } else { -1.0 };
                body.compass.y = 0.0;
                brain.last_time = ctx.now;
            }
            obstacle_bounce(body, brain, ctx);
            body.move_by_compass(body.speed);
        }
        NpcState::Flee => {
            let Some(target) = resolve_target(brain, ctx) else { return false };
            if facing_towards(body.rect, &target) {
                body.compass = target.compass;
                obstacle_bounce(body, brain, ctx);
            }
            body.move_by_compass(body.speed);
        }
        NpcState::Attack | NpcState::Follow => {
            let Some(target) = resolve_target(brain, ctx) else { return false };
            move_towards(body, &target);
        }
        NpcState::Thrown => {
            if ctx.now - brain.last_time > THROWN_SECONDS {
                brain.state = NpcState::Patrol;
            } else {
                let (_, hit) = body.detect_collisions(ctx.obstacles);
                if hit {
                    return true;
                }
                body.move_by_compass(THROWN_SPEED);
            }
        }
    }
    false
}

/// Look the target up in this tick's snapshot. A target that is gone drops
/// the NPC back to patrol.
fn resolve_target(brain: &mut NpcBrain, ctx: &UpdateContext<'_>) -> Option<EntityView> {
    let found = brain.target.and_then(|id| ctx.snapshot.find(id)).copied();
    if found.is_none() {
        brain.target = None;
        brain.set_patrol();
    }
    found
}

/// One speed step toward the target on each axis, then copy its heading.
fn move_towards(body: &mut Body, target: &EntityView) {
    let dir: IVec2 = direction_toward(body.rect.topleft(), target.rect.topleft());
    body.step(dir, body.speed);
    body.compass = target.compass;
}

fn split(entity: &mut Entity) -> Option<(&mut Body, &mut NpcBrain)> {
    match &mut entity.role {
        Role::Npc(brain) => Some((&mut entity.body, brain)),
        Role::Player(_) => None,
    }
}

fn begin_tick(body: &mut Body, brain: &mut NpcBrain) {
    body.update_facing();
    body.animate();
    brain.radar.set_center(body.rect.center());
}

/// Damsel: flee hostiles, follow the player, die on touching a hostile.
pub(super) fn update_damsel(entity: &mut Entity, ctx: &UpdateContext<'_>, out: &mut Vec<Interaction>) {
    let Some((body, brain)) = split(entity) else { return };
    let player = ctx.snapshot.player.as_slice();

    begin_tick(body, brain);
    brain.radar_set_states(body, &ctx.snapshot.bad, Probe::Hitbox, ActiveState::Flee);
    brain.radar_set_state(body, player, Probe::Rect, ActiveState::Follow);
    let mut died = move_based_on_state(body, brain, ctx);

    if !died {
        obstacle_bounce(body, brain, ctx);
        died = ctx.snapshot.bad.iter().any(|b| body.rect.collides(&b.rect));
    }

    if died {
        out.extend(entity.die());
    }
}

/// Skeleton: flee the player, attack friendlies, trigger a player contact
/// when touching the player's hitbox.
pub(super) fn update_skeleton(entity: &mut Entity, ctx: &UpdateContext<'_>, out: &mut Vec<Interaction>) {
    let id = entity.id;
    let Some((body, brain)) = split(entity) else { return };
    let player = ctx.snapshot.player.as_slice();

    begin_tick(body, brain);
    brain.radar_set_states(body, player, Probe::Rect, ActiveState::Flee);
    brain.radar_set_state(body, &ctx.snapshot.good, Probe::Hitbox, ActiveState::Attack);
    if move_based_on_state(body, brain, ctx) {
        out.extend(entity.die());
        return;
    }

    if brain.state != NpcState::Thrown {
        obstacle_bounce(body, brain, ctx);
        if ctx.snapshot.player.is_some_and(|p| body.rect.collides(&p.hitbox)) {
            out.push(Interaction::PlayerContact { npc: id });
        }
    }
}
