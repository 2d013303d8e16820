// =============================================================================
// LEVEL: builds one map from its layouts and runs it tick by tick
//
// A level owns every sprite group, the camera and its own clock. It draws into
// a caller-provided surface, reads a shared asset table, and reports deaths to
// a caller-owned score controller. It never loads art or touches audio.
// =============================================================================

use std::path::{Path, PathBuf};

use glam::IVec2;

use crate::assets::{Art, AssetTable};
use crate::camera::{Camera, Layer, LayerSource};
use crate::config::{GameConfig, LevelDescriptor};
use crate::entity::{
    Action, CharacterKeys, Entity, Interaction, Snapshot, Steer, UpdateContext, spawn_entities,
};
use crate::error::Result;
use crate::input::{ActionMap, GameAction, InputState};
use crate::layout::Layout;
use crate::score::ScoreController;
use crate::sprite::{GroupSingle, Sprite, SpriteGroup, SpriteId, SpriteIds};
use crate::surface::{BLACK, Color, Surface};
use crate::tile::{Tile, TileGroupBuilder};

/// Tint laid over the frozen world while paused.
const PAUSE_DIM: Color = [0, 0, 0, 140];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LevelState {
    Running,
    Paused,
}

// ── Layouts ─────────────────────────────────────────────────────────────────

/// Every layer of one level, parsed.
#[derive(Clone, Debug)]
pub struct LevelLayouts {
    pub ground: Layout,
    pub rocks: Layout,
    pub raised_ground: Layout,
    pub plants: Layout,
    pub fence: Layout,
    pub extra: Layout,
    pub characters: Layout,
}

impl LevelLayouts {
    pub fn load(descriptor: &LevelDescriptor) -> Result<Self> {
        Ok(Self {
            ground: Layout::load(&descriptor.ground)?,
            rocks: Layout::load(&descriptor.rocks)?,
            raised_ground: Layout::load(&descriptor.raised_ground)?,
            plants: Layout::load(&descriptor.plants)?,
            fence: Layout::load(&descriptor.fence)?,
            extra: Layout::load(&descriptor.extra)?,
            characters: Layout::load(&descriptor.characters)?,
        })
    }

    /// Pixel extent of the largest layer.
    pub fn pixel_size(&self, tile_size: i32) -> IVec2 {
        [
            &self.ground,
            &self.rocks,
            &self.raised_ground,
            &self.plants,
            &self.fence,
            &self.extra,
            &self.characters,
        ]
        .iter()
        .map(|l| l.pixel_size(tile_size))
        .fold(IVec2::ZERO, IVec2::max)
    }
}

// ── Groups ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct LevelGroups {
    /// ground + rocks + raised ground
    pub terrain: SpriteGroup<Tile>,
    pub plants: SpriteGroup<Tile>,
    pub fence: SpriteGroup<Tile>,
    pub extra: SpriteGroup<Tile>,
    /// Everything characters collide with.
    pub obstacles: SpriteGroup<Tile>,
    pub good: SpriteGroup<Entity>,
    pub bad: SpriteGroup<Entity>,
    pub player: GroupSingle<Entity>,
    /// Player attack sprites. Nothing spawns into it yet.
    pub attack: SpriteGroup<Entity>,
}

impl LevelGroups {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.sprite().filter(|p| p.is_alive()).map(Entity::view),
            good: self.good.iter().filter(|e| e.is_alive()).map(Entity::view).collect(),
            bad: self.bad.iter().filter(|e| e.is_alive()).map(Entity::view).collect(),
        }
    }

    fn npc_mut(&mut self, id: SpriteId) -> Option<&mut Entity> {
        if self.bad.contains(id) {
            self.bad.get_mut(id)
        } else {
            self.good.get_mut(id)
        }
    }
}

impl LayerSource for LevelGroups {
    fn draw_layer(&self, layer: Layer, surface: &mut Surface, art: &Art, offset: IVec2) {
        match layer {
            Layer::Terrain => self.terrain.draw(surface, art, offset),
            Layer::Plants => self.plants.draw(surface, art, offset),
            Layer::Fence => self.fence.draw(surface, art, offset),
            Layer::Extra => self.extra.draw(surface, art, offset),
            Layer::Good => self.good.draw_y_sorted(surface, art, offset),
            Layer::Bad => self.bad.draw_y_sorted(surface, art, offset),
        }
    }
}

// ── Level ───────────────────────────────────────────────────────────────────

pub struct Level {
    paused: bool,
    pause_logged: bool,
    groups: LevelGroups,
    camera: Camera,
    /// Seconds of unpaused play.
    clock: f32,
    level_size: IVec2,
    music: Option<PathBuf>,
}

impl Level {
    /// Load `descriptor`'s layouts and build the level.
    pub fn new(
        config: &GameConfig,
        descriptor: &LevelDescriptor,
        art: &Art,
        viewport: IVec2,
    ) -> Result<Self> {
        let layouts = LevelLayouts::load(descriptor)?;
        let mut level = Self::from_layouts(
            &layouts,
            &art.tiles,
            &config.character_keys,
            config.tile_size,
            viewport,
            config.clamp_camera,
        )?;
        level.music = descriptor.music.clone();
        Ok(level)
    }

    /// Build groups, spawn entities and set up the camera. Bad asset indices
    /// and a missing or duplicate player fail here.
    pub fn from_layouts(
        layouts: &LevelLayouts,
        tiles: &AssetTable,
        keys: &CharacterKeys,
        tile_size: i32,
        viewport: IVec2,
        clamp_camera: bool,
    ) -> Result<Self> {
        let mut ids = SpriteIds::new();
        let builder = TileGroupBuilder::new(tiles, tile_size);
        let mut groups = LevelGroups::default();

        for layout in [&layouts.ground, &layouts.rocks, &layouts.raised_ground] {
            builder.build_into(layout, &mut ids, &mut groups.terrain)?;
        }
        groups.plants = builder.build(&layouts.plants, &mut ids)?;
        groups.fence = builder.build(&layouts.fence, &mut ids)?;
        groups.extra = builder.build(&layouts.extra, &mut ids)?;
        groups.obstacles.add_all(groups.fence.iter().cloned());

        let spawned = spawn_entities(&layouts.characters, keys, tile_size, &mut ids)?;
        groups.player = spawned.player;
        groups.good = spawned.good;
        groups.bad = spawned.bad;

        let level_size = layouts.pixel_size(tile_size);
        let mut camera = Camera::new(viewport);
        if clamp_camera {
            camera = camera.with_bounds(level_size);
        }
        for layer in [Layer::Terrain, Layer::Plants, Layer::Fence, Layer::Extra, Layer::Good, Layer::Bad] {
            camera.register(layer);
        }
        if let Some(player) = groups.player.sprite() {
            camera.update(player.rect().center());
        }

        log::info!(
            "[level] built {}x{} px: {} terrain, {} plants, {} fence, {} extra tiles",
            level_size.x,
            level_size.y,
            groups.terrain.len(),
            groups.plants.len(),
            groups.fence.len(),
            groups.extra.len()
        );

        Ok(Self {
            paused: false,
            pause_logged: false,
            groups,
            camera,
            clock: 0.0,
            level_size,
            music: None,
        })
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn state(&self) -> LevelState {
        if self.paused { LevelState::Paused } else { LevelState::Running }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn groups(&self) -> &LevelGroups {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut LevelGroups {
        &mut self.groups
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn level_size(&self) -> IVec2 {
        self.level_size
    }

    pub fn music(&self) -> Option<&Path> {
        self.music.as_deref()
    }

    pub fn player(&self) -> Option<&Entity> {
        self.groups.player.sprite()
    }

    // ── State machine ───────────────────────────────────────────────────────

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if !self.paused {
            self.pause_logged = false;
        }
        log::debug!("[level] {:?}", self.state());
    }

    /// Releasing the pause key flips between running and paused.
    pub fn handle_input(&mut self, input: &InputState, actions: &ActionMap<GameAction>) {
        if actions.is_released(GameAction::Pause, input) {
            self.toggle_pause();
        }
    }

    /// One frame: advance the simulation (unless paused) and draw.
    pub fn run(
        &mut self,
        surface: &mut Surface,
        art: &Art,
        steer: Steer,
        score: &mut ScoreController,
        dt: f32,
    ) {
        self.update(steer, score, dt);
        self.draw(surface, art);
    }

    /// Advance one tick. Does nothing while paused.
    pub fn update(&mut self, steer: Steer, score: &mut ScoreController, dt: f32) {
        if self.paused {
            return;
        }
        self.clock += dt;

        let obstacles = self.groups.obstacles.hitboxes();
        let mut events = Vec::new();

        let snapshot = self.groups.snapshot();
        let ctx = UpdateContext { snapshot: &snapshot, obstacles: &obstacles, now: self.clock, steer };
        if let Some(player) = self.groups.player.sprite_mut() {
            player.update(&ctx, &mut events);
        }

        let snapshot = self.groups.snapshot();
        let ctx = UpdateContext { snapshot: &snapshot, ..ctx };
        for entity in self.groups.bad.iter_mut() {
            entity.update(&ctx, &mut events);
        }

        let snapshot = self.groups.snapshot();
        let ctx = UpdateContext { snapshot: &snapshot, ..ctx };
        for entity in self.groups.good.iter_mut() {
            entity.update(&ctx, &mut events);
        }

        self.resolve(events);
        self.remove_dead(score);

        if let Some(player) = self.groups.player.sprite() {
            self.camera.update(player.rect().center());
        }
    }

    /// Draw the world, dimmed while paused.
    pub fn draw(&mut self, surface: &mut Surface, art: &Art) {
        surface.fill(BLACK);
        self.camera.draw(&self.groups, surface, art);
        self.groups.player.draw(surface, art, self.camera.offset());
        if self.paused {
            self.pause_menu(surface);
        }
    }

    fn pause_menu(&mut self, surface: &mut Surface) {
        surface.overlay(PAUSE_DIM);
        if !self.pause_logged {
            log::info!("[level] paused at {:.1}s", self.clock);
            self.pause_logged = true;
        }
    }

    // ── Interactions ────────────────────────────────────────────────────────

    fn resolve(&mut self, events: Vec<Interaction>) {
        for event in events {
            match event {
                Interaction::Died { id, kind } => {
                    log::debug!("[level] {kind:?} {} died", id.raw());
                }
                Interaction::PlayerContact { npc } => self.resolve_contact(npc),
            }
        }
    }

    /// The player touched `npc`: spend the next queued action on it.
    fn resolve_contact(&mut self, npc: SpriteId) {
        let now = self.clock;
        let Some(heading) = self.groups.player.sprite().map(|p| p.body.compass) else { return };

        let Some(target) = self.groups.npc_mut(npc) else { return };
        if !target.is_alive() {
            return;
        }
        let kind = target.kind();

        let Some(player) = self.groups.player.sprite_mut() else { return };
        let Some(state) = player.player_mut() else { return };
        let Some(action) = state.pop_next_action() else { return };
        if action == Action::Consume {
            state.set_eaten_power(kind.power());
        }

        let Some(target) = self.groups.npc_mut(npc) else { return };
        match action {
            Action::Destroy | Action::Consume => {
                target.die();
            }
            Action::Throw => target.throw(heading, now),
        }
        log::debug!("[level] player used {action:?} on {kind:?} {}", npc.raw());
    }

    fn remove_dead(&mut self, score: &mut ScoreController) {
        let dead = self
            .groups
            .bad
            .remove_where(|e| !e.is_alive())
            .into_iter()
            .chain(self.groups.good.remove_where(|e| !e.is_alive()));
        for entity in dead {
            score.entity_destroyed(entity.kind());
        }
    }
}
