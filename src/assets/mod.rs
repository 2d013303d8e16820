pub mod sprite_sheet;

pub use sprite_sheet::{Animations, CharacterArt, SpriteSheet};

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::{GameError, Result};
use crate::settings::COLOR_KEY;

// ── Image loading ────────────────────────────────────────────────────────────

/// Open a PNG (or any format `image` decodes) as RGBA8.
///
/// A missing file is `MissingResource`; a file that exists but fails to
/// decode is `InvalidImage`.
pub fn open_rgba(path: &Path) -> Result<RgbaImage> {
    if !path.is_file() {
        return Err(GameError::missing(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such image"),
        ));
    }
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| GameError::InvalidImage { path: path.to_path_buf(), source })
}

/// Make every pixel matching the colour key fully transparent.
pub fn apply_color_key(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        if px.0[..3] == COLOR_KEY {
            *px = Rgba([0, 0, 0, 0]);
        }
    }
}

// ── AssetTable ───────────────────────────────────────────────────────────────

/// Tileset cut into equally sized images, indexed row-major.
///
/// Tiles refer to entries by index; the table outlives every tile built from
/// it.
#[derive(Default)]
pub struct AssetTable {
    images: Vec<RgbaImage>,
    tile_size: u32,
}

impl AssetTable {
    pub fn from_images(images: Vec<RgbaImage>, tile_size: u32) -> Self {
        Self { images, tile_size }
    }

    /// Cut `sheet` into `tile_size` squares, left to right then top to
    /// bottom. Partial tiles on the right/bottom edge are dropped.
    pub fn cut_graphic(sheet: &RgbaImage, tile_size: u32) -> Self {
        if tile_size == 0 {
            return Self::default();
        }
        let cols = sheet.width() / tile_size;
        let rows = sheet.height() / tile_size;

        let mut images = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let mut tile = image::imageops::crop_imm(
                    sheet,
                    col * tile_size,
                    row * tile_size,
                    tile_size,
                    tile_size,
                )
                .to_image();
                apply_color_key(&mut tile);
                images.push(tile);
            }
        }
        Self { images, tile_size }
    }

    pub fn load_tileset(path: &Path, tile_size: u32) -> Result<Self> {
        let sheet = open_rgba(path)?;
        let table = Self::cut_graphic(&sheet, tile_size);
        log::info!("[assets] {}: {} tiles", path.display(), table.len());
        Ok(table)
    }

    /// Look up an asset by layout cell value.
    pub fn get(&self, index: i32) -> Result<&RgbaImage> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.images.get(i))
            .ok_or(GameError::AssetIndexOutOfRange { index, available: self.images.len() })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }
}

// ── Art ──────────────────────────────────────────────────────────────────────

/// Everything that draws reads pixels from here.
#[derive(Default)]
pub struct Art {
    pub tiles: AssetTable,
    pub characters: CharacterArt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cut_graphic_is_row_major() {
        let mut sheet = RgbaImage::new(4, 4);
        // Mark each 2x2 tile with its index in the red channel.
        for (i, (x, y)) in [(0, 0), (2, 0), (0, 2), (2, 2)].into_iter().enumerate() {
            for dy in 0..2 {
                for dx in 0..2 {
                    sheet.put_pixel(x + dx, y + dy, Rgba([10 + i as u8, 0, 0, 255]));
                }
            }
        }
        let table = AssetTable::cut_graphic(&sheet, 2);
        assert_eq!(table.len(), 4);
        for i in 0..4 {
            assert_eq!(table.get(i).unwrap().get_pixel(0, 0).0[0], 10 + i as u8);
        }
    }

    #[test]
    fn color_key_becomes_transparent() {
        let mut sheet = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        sheet.put_pixel(1, 1, Rgba([5, 5, 5, 255]));
        let table = AssetTable::cut_graphic(&sheet, 2);
        let tile = table.get(0).unwrap();
        assert_eq!(tile.get_pixel(0, 0).0[3], 0);
        assert_eq!(tile.get_pixel(1, 1).0, [5, 5, 5, 255]);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let table = AssetTable::from_images(vec![RgbaImage::new(1, 1)], 1);
        assert!(table.get(0).is_ok());
        assert!(matches!(
            table.get(1),
            Err(GameError::AssetIndexOutOfRange { index: 1, available: 1 })
        ));
        assert!(matches!(table.get(-2), Err(GameError::AssetIndexOutOfRange { index: -2, .. })));
    }

    #[test]
    fn missing_image_is_missing_resource() {
        let err = open_rgba(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, GameError::MissingResource { .. }));
    }
}
