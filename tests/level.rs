use glam::IVec2;
use image::{Rgba, RgbaImage};

use reluctant_hero::assets::{Art, AssetTable};
use reluctant_hero::entity::{Action, CharacterKeys, EntityKind, NpcState, Steer};
use reluctant_hero::input::{ActionMap, InputState, KeyCode};
use reluctant_hero::layout::Layout;
use reluctant_hero::level::{Level, LevelLayouts, LevelState};
use reluctant_hero::score::ScoreController;
use reluctant_hero::sprite::Sprite;
use reluctant_hero::surface::Surface;
use reluctant_hero::GameError;

const DT: f32 = 1.0 / 60.0;

fn rows(r: Vec<Vec<i32>>) -> Layout {
    Layout::from_rows(r).unwrap()
}

fn empty() -> Layout {
    rows(vec![vec![-1]])
}

fn tiles(size: u32) -> AssetTable {
    let images = (0..2)
        .map(|i| RgbaImage::from_pixel(size, size, Rgba([40 * i as u8, 120, 40, 255])))
        .collect();
    AssetTable::from_images(images, size)
}

fn layouts(fence: Layout, characters: Layout) -> LevelLayouts {
    LevelLayouts {
        ground: rows(vec![vec![0, 0], vec![0, 0]]),
        rocks: empty(),
        raised_ground: rows(vec![vec![-1, 1]]),
        plants: empty(),
        fence,
        extra: empty(),
        characters,
    }
}

fn build(l: &LevelLayouts, tile_size: i32) -> Level {
    Level::from_layouts(
        l,
        &tiles(tile_size as u32),
        &CharacterKeys::default(),
        tile_size,
        IVec2::new(320, 180),
        false,
    )
    .unwrap()
}

fn fill_queue(level: &mut Level, action: Action) {
    let player = level.groups_mut().player.sprite_mut().unwrap();
    let state = player.player_mut().unwrap();
    while state.pop_next_action().is_some() {}
    for _ in 0..3 {
        state.push_action(action);
    }
}

#[test]
fn builds_groups_from_layouts() {
    let fence = rows(vec![vec![1, 1], vec![-1, 1]]);
    let level = build(&layouts(fence, rows(vec![vec![0, 1, 2]])), 16);
    let g = level.groups();

    assert_eq!(g.terrain.len(), 5);
    assert_eq!(g.fence.len(), 3);
    assert_eq!(g.obstacles.len(), g.fence.len());
    assert_eq!(g.good.len(), 1);
    assert_eq!(g.bad.len(), 1);
    assert!(g.attack.is_empty());
    assert_eq!(level.player().unwrap().kind(), EntityKind::Player);
    assert_eq!(level.level_size(), IVec2::new(48, 32));
    assert_eq!(level.camera().layers().len(), 6);
}

#[test]
fn camera_starts_on_the_player() {
    let level = build(&layouts(empty(), rows(vec![vec![-1, -1, 0]])), 16);
    let center = level.player().unwrap().rect().center();
    assert_eq!(level.camera().world_to_screen(center), IVec2::new(160, 90));
}

#[test]
fn bad_tile_index_fails_the_build() {
    let l = layouts(rows(vec![vec![5]]), rows(vec![vec![0]]));
    let err = Level::from_layouts(&l, &tiles(16), &CharacterKeys::default(), 16, IVec2::ONE, false)
        .err()
        .unwrap();
    assert!(matches!(err, GameError::AssetIndexOutOfRange { index: 5, available: 2 }), "{err}");
}

#[test]
fn pause_toggles_back_and_forth() {
    let mut level = build(&layouts(empty(), rows(vec![vec![0]])), 16);
    assert_eq!(level.state(), LevelState::Running);
    level.toggle_pause();
    assert_eq!(level.state(), LevelState::Paused);
    level.toggle_pause();
    assert_eq!(level.state(), LevelState::Running);
}

#[test]
fn escape_release_toggles_pause() {
    let mut level = build(&layouts(empty(), rows(vec![vec![0]])), 16);
    let actions = ActionMap::game_defaults();
    let mut input = InputState::new();

    input.press(KeyCode::Escape);
    level.handle_input(&input, &actions);
    assert!(!level.is_paused());

    input.release(KeyCode::Escape);
    level.handle_input(&input, &actions);
    assert!(level.is_paused());

    input.clear_frame_state();
    level.handle_input(&input, &actions);
    assert!(level.is_paused());

    input.press(KeyCode::Escape);
    input.release(KeyCode::Escape);
    level.handle_input(&input, &actions);
    assert!(!level.is_paused());
}

#[test]
fn paused_level_does_not_advance() {
    let mut level = build(&layouts(empty(), rows(vec![vec![0]])), 16);
    let mut score = ScoreController::new();

    level.update(Steer::Straight, &mut score, DT);
    let clock = level.clock();
    let pos = level.player().unwrap().rect();

    level.toggle_pause();
    for _ in 0..30 {
        level.update(Steer::Left, &mut score, DT);
    }
    assert_eq!(level.clock(), clock);
    assert_eq!(level.player().unwrap().rect(), pos);

    level.toggle_pause();
    level.update(Steer::Straight, &mut score, DT);
    assert!(level.clock() > clock);
}

#[test]
fn destroying_a_skeleton_scores() {
    let mut level = build(&layouts(empty(), rows(vec![vec![0, 2]])), 16);
    let mut score = ScoreController::new();
    fill_queue(&mut level, Action::Destroy);

    level.update(Steer::Straight, &mut score, DT);

    assert!(level.groups().bad.is_empty());
    assert_eq!(score.high_score(), 1);
    assert_eq!(score.boredom_meter(), 5);
    let state = level.player().unwrap().player().unwrap();
    assert_eq!(state.actions().len(), 2);
}

#[test]
fn consuming_sets_eaten_power() {
    let mut level = build(&layouts(empty(), rows(vec![vec![0, 2]])), 16);
    let mut score = ScoreController::new();
    fill_queue(&mut level, Action::Consume);

    level.update(Steer::Straight, &mut score, DT);

    assert!(level.groups().bad.is_empty());
    let state = level.player().unwrap().player().unwrap();
    assert_eq!(state.eaten_power(), EntityKind::Skeleton.power());
    assert_eq!(score.high_score(), 1);
}

#[test]
fn throwing_keeps_the_skeleton_alive() {
    let mut level = build(&layouts(empty(), rows(vec![vec![0, 2]])), 16);
    let mut score = ScoreController::new();
    fill_queue(&mut level, Action::Throw);

    level.update(Steer::Straight, &mut score, DT);

    let skeleton = level.groups().bad.iter().next().unwrap();
    assert_eq!(skeleton.brain().unwrap().state(), NpcState::Thrown);
    assert_eq!(score.high_score(), 0);
}

#[test]
fn skeleton_thrown_into_the_fence_scores() {
    let fence = rows(vec![vec![-1, -1, -1, 1]]);
    let mut level = build(&layouts(fence, rows(vec![vec![0, 2]])), 16);
    let mut score = ScoreController::new();
    fill_queue(&mut level, Action::Throw);

    level.update(Steer::Straight, &mut score, DT);
    let skeleton = level.groups().bad.iter().next().unwrap();
    assert_eq!(skeleton.brain().unwrap().state(), NpcState::Thrown);
    assert_eq!(score.high_score(), 0);

    for _ in 0..20 {
        level.update(Steer::Straight, &mut score, DT);
    }
    assert!(level.groups().bad.is_empty());
    assert_eq!(score.high_score(), 1);
}

#[test]
fn damsel_killed_by_skeleton_costs_points() {
    let mut characters = vec![-1; 62];
    characters[21] = 1;
    characters[22] = 2;
    characters[61] = 0;
    let mut level = build(&layouts(empty(), rows(vec![characters])), 8);
    let mut score = ScoreController::new();
    score.set_high_score(10).unwrap();
    score.set_boredom_meter(30).unwrap();

    level.update(Steer::Straight, &mut score, DT);

    assert!(level.groups().good.is_empty());
    assert_eq!(level.groups().bad.len(), 1);
    assert_eq!(score.high_score(), 4);
    assert_eq!(score.boredom_meter(), 20);
}

#[test]
fn steering_turns_the_player() {
    let mut level = build(&layouts(empty(), rows(vec![vec![0]])), 16);
    let mut score = ScoreController::new();
    level.update(Steer::Right, &mut score, DT);
    let compass = level.player().unwrap().body.compass;
    assert!(compass.y > 0.0);
    assert!((compass.length() - 1.0).abs() < 1e-4);
}

#[test]
fn run_draws_the_world_and_dims_it_when_paused() {
    let mut level = build(&layouts(empty(), rows(vec![vec![0]])), 16);
    let art = Art { tiles: tiles(16), ..Default::default() };
    let mut score = ScoreController::new();
    let mut surface = Surface::new(320, 180);

    level.run(&mut surface, &art, Steer::Straight, &mut score, DT);
    let ground = level.camera().world_to_screen(IVec2::new(4, 4));
    let lit = surface.pixel(ground.x as u32, ground.y as u32).unwrap();
    assert_eq!(lit, [0, 120, 40, 255]);

    level.toggle_pause();
    let clock = level.clock();
    level.run(&mut surface, &art, Steer::Straight, &mut score, DT);
    assert_eq!(level.clock(), clock);
    let dimmed = surface.pixel(ground.x as u32, ground.y as u32).unwrap();
    assert!(dimmed[1] < lit[1]);
}
