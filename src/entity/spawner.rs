use glam::IVec2;
use serde::Deserialize;

use super::{Entity, EntityKind, Faction};
use crate::error::{GameError, Result};
use crate::layout::Layout;
use crate::sprite::{GroupSingle, Sprite, SpriteGroup, SpriteIds};

/// Character-layer cell values for each entity kind.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CharacterKeys {
    pub player: i32,
    pub damsel: i32,
    pub skeleton: i32,
}

impl Default for CharacterKeys {
    fn default() -> Self {
        Self { player: 0, damsel: 1, skeleton: 2 }
    }
}

impl CharacterKeys {
    pub fn kind_of(&self, value: i32) -> Option<EntityKind> {
        if value == self.player {
            Some(EntityKind::Player)
        } else if value == self.damsel {
            Some(EntityKind::Damsel)
        } else if value == self.skeleton {
            Some(EntityKind::Skeleton)
        } else {
            None
        }
    }
}

/// Groups produced from a character layout.
#[derive(Default)]
pub struct Spawned {
    pub player: GroupSingle<Entity>,
    pub good: SpriteGroup<Entity>,
    pub bad: SpriteGroup<Entity>,
}

/// Instantiate every entity in `layout`.
///
/// Each non-empty cell moves the spawn point to its pixel position; a
/// recognised key spawns there. Exactly one player is required. Every
/// faction member is linked back to the player afterwards.
pub fn spawn_entities(
    layout: &Layout,
    keys: &CharacterKeys,
    tile_size: i32,
    ids: &mut SpriteIds,
) -> Result<Spawned> {
    let mut spawned = Spawned::default();

    for cell in layout.cells() {
        let position: IVec2 = cell.pixel_pos(tile_size);

        let Some(kind) = keys.kind_of(cell.value) else {
            log::warn!(
                "[level] unknown character key {} at row {}, column {}; skipping",
                cell.value,
                cell.row,
                cell.col
            );
            continue;
        };

        let entity = Entity::new(ids.next_id(), kind, position);
        match kind.faction() {
            None => {
                if !spawned.player.is_empty() {
                    return Err(GameError::DuplicatePlayer { row: cell.row, col: cell.col });
                }
                spawned.player.set(entity);
            }
            Some(Faction::Good) => {
                spawned.good.add(entity);
            }
            Some(Faction::Bad) => {
                spawned.bad.add(entity);
            }
        }
    }

    let player_id = match spawned.player.sprite() {
        Some(p) => p.id(),
        None => return Err(GameError::MissingPlayer),
    };
    for entity in spawned.good.iter_mut().chain(spawned.bad.iter_mut()) {
        entity.set_player(player_id);
    }

    log::info!(
        "[level] spawned player at {:?}, {} good, {} bad",
        spawned.player.sprite().map(|p| p.body.rect.topleft()),
        spawned.good.len(),
        spawned.bad.len()
    );
    Ok(spawned)
}
