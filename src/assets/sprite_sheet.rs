use std::collections::HashMap;
use std::path::Path;

use image::{RgbaImage, imageops};

use super::{apply_color_key, open_rgba};
use crate::entity::{EntityKind, Facing};
use crate::error::{GameError, Result};
use crate::geometry::Rect;
use crate::settings::{ENTITY_HEIGHT, ENTITY_WIDTH, WALKING_IMAGE_COUNT};

/// A character sheet: one walking strip per row.
pub struct SpriteSheet {
    sheet: RgbaImage,
}

impl SpriteSheet {
    pub fn new(sheet: RgbaImage) -> Self {
        Self { sheet }
    }

    pub fn load(path: &Path) -> Result<Self> {
        open_rgba(path).map(Self::new)
    }

    /// Copy `rect` out of the sheet with the colour key applied. The part of
    /// `rect` outside the sheet stays transparent.
    pub fn image_at(&self, rect: Rect) -> RgbaImage {
        let mut out = RgbaImage::new(rect.w.max(0) as u32, rect.h.max(0) as u32);
        let (x0, y0) = (rect.x.max(0), rect.y.max(0));
        let (w, h) = ((rect.right() - x0).max(0) as u32, (rect.bottom() - y0).max(0) as u32);
        let part = imageops::crop_imm(&self.sheet, x0 as u32, y0 as u32, w, h);
        imageops::replace(&mut out, &*part, (x0 - rect.x).into(), (y0 - rect.y).into());
        apply_color_key(&mut out);
        out
    }

    /// `count` frames starting at `rect`, stepping right by `rect.w`.
    pub fn load_strip(&self, rect: Rect, count: usize) -> Vec<RgbaImage> {
        (0..count)
            .map(|i| self.image_at(Rect::new(rect.x + rect.w * i as i32, rect.y, rect.w, rect.h)))
            .collect()
    }
}

/// Directional walking strips cut from one sheet.
///
/// Rows are down, left, right, up; every frame is `ENTITY_WIDTH` x
/// `ENTITY_HEIGHT`.
#[derive(Clone, Default)]
pub struct Animations {
    pub down: Vec<RgbaImage>,
    pub left: Vec<RgbaImage>,
    pub right: Vec<RgbaImage>,
    pub up: Vec<RgbaImage>,
}

impl Animations {
    pub fn from_sheet(sheet: &SpriteSheet) -> Self {
        let (w, h) = (ENTITY_WIDTH as i32, ENTITY_HEIGHT as i32);
        let strip = |row: i32| sheet.load_strip(Rect::new(0, row * h, w, h), WALKING_IMAGE_COUNT);
        Self { down: strip(0), left: strip(1), right: strip(2), up: strip(3) }
    }

    pub fn frames(&self, facing: Facing) -> &[RgbaImage] {
        match facing {
            Facing::Down => &self.down,
            Facing::Left => &self.left,
            Facing::Right => &self.right,
            Facing::Up => &self.up,
        }
    }

    /// Frame for `facing` at a fractional animation index (wraps).
    pub fn frame(&self, facing: Facing, index: f32) -> Option<&RgbaImage> {
        let frames = self.frames(facing);
        if frames.is_empty() {
            return None;
        }
        frames.get(index.max(0.0) as usize % frames.len())
    }
}

/// Animations for every character sheet found in a folder, keyed by file stem.
#[derive(Default)]
pub struct CharacterArt {
    sheets: HashMap<String, Animations>,
}

impl CharacterArt {
    pub fn insert(&mut self, name: impl Into<String>, animations: Animations) {
        self.sheets.insert(name.into(), animations);
    }

    /// Scan `dir` recursively for `.png` sheets.
    pub fn load_folder(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(GameError::missing(
                dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
            ));
        }

        let mut art = Self::default();
        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("png") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else { continue };
            if art.sheets.contains_key(name) {
                log::warn!("[assets] duplicate sheet '{name}' at {}; skipping", path.display());
                continue;
            }
            let sheet = SpriteSheet::load(path)?;
            art.insert(name, Animations::from_sheet(&sheet));
            log::debug!("[assets] sheet '{name}' from {}", path.display());
        }
        Ok(art)
    }

    pub fn get(&self, name: &str) -> Result<&Animations> {
        self.sheets.get(name).ok_or_else(|| GameError::MissingSpriteSheet(name.to_string()))
    }

    pub fn for_kind(&self, kind: EntityKind) -> Option<&Animations> {
        self.sheets.get(kind.sheet_name())
    }

    /// Fail unless every character kind has a sheet.
    pub fn require_all(&self) -> Result<()> {
        for kind in EntityKind::ALL {
            self.get(kind.sheet_name())?;
        }
        Ok(())
    }
}
