use glam::IVec2;

use super::{Sprite, SpriteId};
use crate::assets::Art;
use crate::geometry::Rect;
use crate::surface::Surface;

const EMPTY: u32 = u32::MAX;

// ---------------------------------------------------------------------------
// SpriteGroup<T>: set of sprites keyed by id
// ---------------------------------------------------------------------------

/// Unordered sprite collection with set semantics.
///
/// Storage is a sparse set: `sparse[id]` points into the packed `dense`/`data`
/// arrays, removals swap-remove to keep them packed. Adding a sprite whose id
/// is already present is a no-op.
#[derive(Debug)]
pub struct SpriteGroup<T> {
    sparse: Vec<u32>,
    dense: Vec<SpriteId>,
    data: Vec<T>,
}

impl<T> Default for SpriteGroup<T> {
    fn default() -> Self {
        Self { sparse: Vec::new(), dense: Vec::new(), data: Vec::new() }
    }
}

impl<T: Sprite> SpriteGroup<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: SpriteId) -> Option<usize> {
        match self.sparse.get(id.raw() as usize) {
            Some(&i) if i != EMPTY => Some(i as usize),
            _ => None,
        }
    }

    pub fn contains(&self, id: SpriteId) -> bool {
        self.slot(id).is_some()
    }

    /// Insert `sprite`. Returns false (and drops it) if its id is already in
    /// the group.
    pub fn add(&mut self, sprite: T) -> bool {
        let idx = sprite.id().raw() as usize;
        if idx >= self.sparse.len() {
            self.sparse.resize(idx + 1, EMPTY);
        }
        if self.sparse[idx] != EMPTY {
            return false;
        }
        self.sparse[idx] = self.dense.len() as u32;
        self.dense.push(sprite.id());
        self.data.push(sprite);
        true
    }

    /// Bulk add. Returns how many were new.
    pub fn add_all(&mut self, sprites: impl IntoIterator<Item = T>) -> usize {
        sprites.into_iter().map(|s| self.add(s) as usize).sum()
    }

    pub fn remove(&mut self, id: SpriteId) -> Option<T> {
        let dense_idx = self.slot(id)?;
        self.sparse[id.raw() as usize] = EMPTY;

        let last = self.dense.len() - 1;
        if dense_idx != last {
            let moved = self.dense[last].raw() as usize;
            self.sparse[moved] = dense_idx as u32;
        }
        self.dense.swap_remove(dense_idx);
        Some(self.data.swap_remove(dense_idx))
    }

    /// Remove every member for which `pred` returns true.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        let doomed: Vec<SpriteId> =
            self.data.iter().filter(|s| pred(s)).map(|s| s.id()).collect();
        doomed.into_iter().filter_map(|id| self.remove(id)).collect()
    }

    pub fn get(&self, id: SpriteId) -> Option<&T> {
        self.slot(id).map(|i| &self.data[i])
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut T> {
        self.slot(id).map(move |i| &mut self.data[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.sparse.clear();
        self.dense.clear();
        self.data.clear();
    }

    /// Hitboxes of every member, in storage order.
    pub fn hitboxes(&self) -> Vec<Rect> {
        self.data.iter().map(Sprite::hitbox).collect()
    }

    pub fn draw(&self, surface: &mut Surface, art: &Art, offset: IVec2) {
        for sprite in &self.data {
            sprite.draw(surface, art, offset);
        }
    }

    /// Draw back to front by rect centre y so lower sprites overlap higher ones.
    pub fn draw_y_sorted(&self, surface: &mut Surface, art: &Art, offset: IVec2) {
        let mut order: Vec<&T> = self.data.iter().collect();
        order.sort_by_key(|s| (s.rect().centery(), s.id()));
        for sprite in order {
            sprite.draw(surface, art, offset);
        }
    }
}

impl<T: Sprite> Extend<T> for SpriteGroup<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T: Sprite> FromIterator<T> for SpriteGroup<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut group = Self::new();
        group.add_all(iter);
        group
    }
}

impl<'a, T> IntoIterator for &'a SpriteGroup<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

// ---------------------------------------------------------------------------
// GroupSingle<T>: a group of at most one sprite
// ---------------------------------------------------------------------------

pub struct GroupSingle<T> {
    sprite: Option<T>,
}

impl<T> Default for GroupSingle<T> {
    fn default() -> Self {
        Self { sprite: None }
    }
}

impl<T: Sprite> GroupSingle<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held sprite, returning the previous one.
    pub fn set(&mut self, sprite: T) -> Option<T> {
        self.sprite.replace(sprite)
    }

    pub fn sprite(&self) -> Option<&T> {
        self.sprite.as_ref()
    }

    pub fn sprite_mut(&mut self) -> Option<&mut T> {
        self.sprite.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.sprite.is_none()
    }

    pub fn draw(&self, surface: &mut Surface, art: &Art, offset: IVec2) {
        if let Some(sprite) = &self.sprite {
            sprite.draw(surface, art, offset);
        }
    }
}
