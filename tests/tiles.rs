use glam::IVec2;
use image::{Rgba, RgbaImage};

use reluctant_hero::GameError;
use reluctant_hero::assets::AssetTable;
use reluctant_hero::layout::Layout;
use reluctant_hero::sprite::{Sprite, SpriteGroup, SpriteIds};
use reluctant_hero::tile::{Tile, TileGroupBuilder};

fn table(count: usize, size: u32) -> AssetTable {
    let images = (0..count)
        .map(|i| RgbaImage::from_pixel(size, size, Rgba([i as u8 + 1, 0, 0, 255])))
        .collect();
    AssetTable::from_images(images, size)
}

#[test]
fn builds_one_tile_per_non_empty_cell() {
    let assets = table(4, 10);
    let layout = Layout::from_rows(vec![vec![-1, 0], vec![3, -1]]).unwrap();
    let mut ids = SpriteIds::new();

    let group = TileGroupBuilder::new(&assets, 10).build(&layout, &mut ids).unwrap();
    assert_eq!(group.len(), 2);

    let mut tiles: Vec<&Tile> = group.iter().collect();
    tiles.sort_by_key(|t| (t.pos().y, t.pos().x));
    assert_eq!(tiles[0].pos(), IVec2::new(10, 0));
    assert_eq!(tiles[0].asset(), 0);
    assert_eq!(tiles[1].pos(), IVec2::new(0, 10));
    assert_eq!(tiles[1].asset(), 3);
}

#[test]
fn tile_rect_takes_the_image_size() {
    let assets = table(1, 16);
    let layout = Layout::from_rows(vec![vec![0]]).unwrap();
    let group = TileGroupBuilder::new(&assets, 16).build(&layout, &mut SpriteIds::new()).unwrap();
    let tile = group.iter().next().unwrap();
    assert_eq!((tile.rect().w, tile.rect().h), (16, 16));
    assert_eq!(tile.hitbox(), tile.rect());
}

#[test]
fn all_sentinel_layout_builds_nothing() {
    let assets = table(1, 8);
    let layout = Layout::from_rows(vec![vec![-1; 5]; 4]).unwrap();
    let group = TileGroupBuilder::new(&assets, 8).build(&layout, &mut SpriteIds::new()).unwrap();
    assert!(group.is_empty());
}

#[test]
fn out_of_range_index_fails_fast() {
    let assets = table(2, 8);
    let layout = Layout::from_rows(vec![vec![0, 1, 2]]).unwrap();
    let err = TileGroupBuilder::new(&assets, 8).build(&layout, &mut SpriteIds::new()).unwrap_err();
    assert!(matches!(err, GameError::AssetIndexOutOfRange { index: 2, available: 2 }), "{err}");
}

#[test]
fn negative_index_other_than_sentinel_fails() {
    let assets = table(2, 8);
    let layout = Layout::from_rows(vec![vec![-2]]).unwrap();
    let err = TileGroupBuilder::new(&assets, 8).build(&layout, &mut SpriteIds::new()).unwrap_err();
    assert!(matches!(err, GameError::AssetIndexOutOfRange { index: -2, .. }), "{err}");
}

#[test]
fn several_layouts_merge_into_one_group() {
    let assets = table(3, 8);
    let ground = Layout::from_rows(vec![vec![0, 0]]).unwrap();
    let rocks = Layout::from_rows(vec![vec![-1, 2]]).unwrap();
    let builder = TileGroupBuilder::new(&assets, 8);
    let mut ids = SpriteIds::new();
    let mut terrain: SpriteGroup<Tile> = SpriteGroup::new();

    assert_eq!(builder.build_into(&ground, &mut ids, &mut terrain).unwrap(), 2);
    assert_eq!(builder.build_into(&rocks, &mut ids, &mut terrain).unwrap(), 1);
    assert_eq!(terrain.len(), 3);
}
