//! Static map tiles and the builder that turns a layout into a tile group.

use glam::IVec2;

use crate::assets::{Art, AssetTable};
use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::Layout;
use crate::sprite::{Sprite, SpriteGroup, SpriteId, SpriteIds};
use crate::surface::Surface;

/// One placed tile. Holds an index into the shared asset table, never the
/// pixels themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    id: SpriteId,
    rect: Rect,
    asset: usize,
}

impl Tile {
    pub fn new(id: SpriteId, pos: IVec2, size: IVec2, asset: usize) -> Self {
        Self { id, rect: Rect::at(pos, size.x, size.y), asset }
    }

    pub fn pos(&self) -> IVec2 {
        self.rect.topleft()
    }

    pub fn asset(&self) -> usize {
        self.asset
    }
}

impl Sprite for Tile {
    fn id(&self) -> SpriteId {
        self.id
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn draw(&self, surface: &mut Surface, art: &Art, offset: IVec2) {
        if let Ok(img) = art.tiles.get(self.asset as i32) {
            surface.blit(img, self.rect.topleft() - offset);
        }
    }
}

/// Builds tile groups from layouts against one asset table.
pub struct TileGroupBuilder<'a> {
    assets: &'a AssetTable,
    tile_size: i32,
}

impl<'a> TileGroupBuilder<'a> {
    pub fn new(assets: &'a AssetTable, tile_size: i32) -> Self {
        Self { assets, tile_size }
    }

    /// One tile per non-empty cell, at `(col, row) * tile_size`.
    pub fn build(&self, layout: &Layout, ids: &mut SpriteIds) -> Result<SpriteGroup<Tile>> {
        let mut group = SpriteGroup::new();
        self.build_into(layout, ids, &mut group)?;
        Ok(group)
    }

    /// Append the tiles for `layout` to an existing group. Stops at the first
    /// bad asset index; tiles added before it stay in `group`.
    pub fn build_into(
        &self,
        layout: &Layout,
        ids: &mut SpriteIds,
        group: &mut SpriteGroup<Tile>,
    ) -> Result<usize> {
        let mut added = 0;
        for cell in layout.cells() {
            let img = self.assets.get(cell.value)?;
            let size = IVec2::new(img.width() as i32, img.height() as i32);
            let tile = Tile::new(ids.next_id(), cell.pixel_pos(self.tile_size), size, cell.value as usize);
            if group.add(tile) {
                added += 1;
            }
        }
        Ok(added)
    }
}
