use glam::{IVec2, Vec2};

use reluctant_hero::entity::{
    Entity, EntityKind, Facing, Interaction, NpcState, Snapshot, Steer, UpdateContext,
};
use reluctant_hero::geometry::Rect;
use reluctant_hero::settings::{PATROL_SECONDS_PER_DIRECTION, THROWN_SECONDS, THROWN_SPEED};
use reluctant_hero::sprite::{Sprite, SpriteId};

fn entity(id: u32, kind: EntityKind, x: i32, y: i32) -> Entity {
    Entity::new(SpriteId::new(id), kind, IVec2::new(x, y))
}

fn tick(e: &mut Entity, snapshot: &Snapshot, now: f32) -> Vec<Interaction> {
    tick_among(e, snapshot, &[], now)
}

fn tick_among(e: &mut Entity, snapshot: &Snapshot, obstacles: &[Rect], now: f32) -> Vec<Interaction> {
    let ctx = UpdateContext { snapshot, obstacles, now, steer: Steer::Straight };
    let mut out = Vec::new();
    e.update(&ctx, &mut out);
    out
}

fn with_player(player: &Entity) -> Snapshot {
    Snapshot { player: Some(player.view()), ..Default::default() }
}

#[test]
fn damsel_follows_player_on_radar() {
    let player = entity(0, EntityKind::Player, 140, 100);
    let mut damsel = entity(1, EntityKind::Damsel, 100, 100);
    damsel.set_player(player.id());

    tick(&mut damsel, &with_player(&player), 0.1);

    let brain = damsel.brain().unwrap();
    assert_eq!(brain.state(), NpcState::Follow);
    assert_eq!(brain.target(), Some(player.id()));
    assert_eq!(damsel.rect().topleft(), IVec2::new(101, 100));
    assert_eq!(damsel.body.compass, player.body.compass);
}

#[test]
fn losing_sight_drops_back_to_patrol() {
    let player = entity(0, EntityKind::Player, 140, 100);
    let mut damsel = entity(1, EntityKind::Damsel, 100, 100);

    tick(&mut damsel, &with_player(&player), 0.1);
    assert_eq!(damsel.brain().unwrap().state(), NpcState::Follow);

    tick(&mut damsel, &Snapshot::default(), 0.2);
    assert_eq!(damsel.brain().unwrap().state(), NpcState::Patrol);
}

#[test]
fn out_of_radar_player_is_ignored() {
    let player = entity(0, EntityKind::Player, 1000, 1000);
    let mut damsel = entity(1, EntityKind::Damsel, 0, 0);
    tick(&mut damsel, &with_player(&player), 0.1);
    assert_eq!(damsel.brain().unwrap().state(), NpcState::Patrol);
}

#[test]
fn patrol_reverses_after_its_interval() {
    let mut skeleton = entity(1, EntityKind::Skeleton, 0, 0);
    let empty = Snapshot::default();

    tick(&mut skeleton, &empty, 0.5);
    assert_eq!(skeleton.body.compass, Vec2::X);
    assert_eq!(skeleton.rect().x, 1);

    tick(&mut skeleton, &empty, PATROL_SECONDS_PER_DIRECTION + 0.5);
    assert_eq!(skeleton.body.compass, Vec2::new(-1.0, 0.0));
    assert_eq!(skeleton.rect().x, 0);
}

#[test]
fn thrown_npc_flies_then_patrols() {
    let mut skeleton = entity(1, EntityKind::Skeleton, 0, 0);
    let empty = Snapshot::default();
    skeleton.throw(Vec2::X, 0.0);
    assert_eq!(skeleton.brain().unwrap().state(), NpcState::Thrown);

    tick(&mut skeleton, &empty, THROWN_SECONDS / 2.0);
    assert_eq!(skeleton.rect().x, THROWN_SPEED);
    assert_eq!(skeleton.brain().unwrap().state(), NpcState::Thrown);

    tick(&mut skeleton, &empty, THROWN_SECONDS + 0.5);
    assert_eq!(skeleton.brain().unwrap().state(), NpcState::Patrol);
    assert!(skeleton.is_alive());
}

#[test]
fn thrown_npc_ignores_radar() {
    let player = entity(0, EntityKind::Player, 20, 0);
    let mut skeleton = entity(1, EntityKind::Skeleton, 0, 0);
    skeleton.throw(Vec2::new(-1.0, 0.0), 0.0);

    let out = tick(&mut skeleton, &with_player(&player), 0.1);
    assert_eq!(skeleton.brain().unwrap().state(), NpcState::Thrown);
    assert!(out.is_empty());
}

#[test]
fn skeleton_touching_player_reports_contact() {
    let player = entity(0, EntityKind::Player, 10, 0);
    let mut skeleton = entity(1, EntityKind::Skeleton, 0, 0);

    let out = tick(&mut skeleton, &with_player(&player), 0.1);
    assert_eq!(skeleton.brain().unwrap().state(), NpcState::Flee);
    assert_eq!(out, vec![Interaction::PlayerContact { npc: skeleton.id() }]);
}

#[test]
fn skeleton_attacks_nearest_damsel() {
    let near = entity(2, EntityKind::Damsel, 60, 0);
    let far = entity(3, EntityKind::Damsel, 70, 0);
    let snapshot = Snapshot { good: vec![far.view(), near.view()], ..Default::default() };
    let mut skeleton = entity(1, EntityKind::Skeleton, 0, 0);

    tick(&mut skeleton, &snapshot, 0.1);
    let brain = skeleton.brain().unwrap();
    assert_eq!(brain.state(), NpcState::Attack);
    assert_eq!(brain.target(), Some(near.id()));
}

#[test]
fn damsel_dies_touching_a_skeleton() {
    let skeleton = entity(1, EntityKind::Skeleton, 6, 0);
    let snapshot = Snapshot { bad: vec![skeleton.view()], ..Default::default() };
    let mut damsel = entity(2, EntityKind::Damsel, 0, 0);

    let out = tick(&mut damsel, &snapshot, 0.1);
    assert!(!damsel.is_alive());
    assert_eq!(out, vec![Interaction::Died { id: damsel.id(), kind: EntityKind::Damsel }]);

    // Dead entities stay inert.
    assert!(tick(&mut damsel, &snapshot, 0.2).is_empty());
    assert!(damsel.die().is_none());
}

#[test]
fn skeleton_flees_along_the_players_heading_when_watched() {
    let mut player = entity(0, EntityKind::Player, 60, 0);
    player.body.compass = Vec2::new(-1.0, 0.0);
    player.body.facing = Facing::Left;
    let mut skeleton = entity(1, EntityKind::Skeleton, 0, 0);

    let out = tick(&mut skeleton, &with_player(&player), 0.1);

    assert!(out.is_empty());
    assert_eq!(skeleton.brain().unwrap().state(), NpcState::Flee);
    assert_eq!(skeleton.body.compass, Vec2::new(-1.0, 0.0));
    assert_eq!(skeleton.rect().x, -1);
}

#[test]
fn skeleton_keeps_its_heading_when_the_player_looks_away() {
    let mut player = entity(0, EntityKind::Player, 60, 0);
    player.body.compass = Vec2::new(1.0, 0.0);
    player.body.facing = Facing::Right;
    let mut skeleton = entity(1, EntityKind::Skeleton, 0, 0);

    tick(&mut skeleton, &with_player(&player), 0.1);

    assert_eq!(skeleton.brain().unwrap().state(), NpcState::Flee);
    assert_eq!(skeleton.body.compass, Vec2::X);
    assert_eq!(skeleton.rect().x, 1);
}

#[test]
fn thrown_npc_dies_hitting_an_obstacle() {
    let fence = [Rect::new(18, 0, 16, 16)];
    let empty = Snapshot::default();
    let mut skeleton = entity(1, EntityKind::Skeleton, 0, 0);
    skeleton.throw(Vec2::X, 0.0);

    assert!(tick_among(&mut skeleton, &empty, &fence, 0.1).is_empty());
    assert_eq!(skeleton.rect().x, THROWN_SPEED);
    assert!(skeleton.is_alive());

    let out = tick_among(&mut skeleton, &empty, &fence, 0.2);
    assert!(!skeleton.is_alive());
    assert_eq!(out, vec![Interaction::Died { id: skeleton.id(), kind: EntityKind::Skeleton }]);
}
