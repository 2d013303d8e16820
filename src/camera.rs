use glam::IVec2;

use crate::assets::Art;
use crate::surface::Surface;

/// Sprite layers the camera can draw, in no particular order. Draw order is
/// registration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Terrain,
    Plants,
    Fence,
    Extra,
    Good,
    Bad,
}

/// Whatever owns the sprite groups behind each layer.
pub trait LayerSource {
    fn draw_layer(&self, layer: Layer, surface: &mut Surface, art: &Art, offset: IVec2);
}

/// Scrolling camera: keeps the player centred by drawing every registered
/// layer shifted by `offset`.
#[derive(Clone, Debug)]
pub struct Camera {
    offset: IVec2,
    viewport: IVec2,
    half: IVec2,
    layers: Vec<Layer>,
    /// Level size in pixels, when clamping is on.
    bounds: Option<IVec2>,
}

impl Camera {
    pub fn new(viewport: IVec2) -> Self {
        Self {
            offset: IVec2::ZERO,
            viewport,
            half: IVec2::new(viewport.x.div_euclid(2), viewport.y.div_euclid(2)),
            layers: Vec::new(),
            bounds: None,
        }
    }

    /// Keep the view inside a level of `level_size` pixels on every axis
    /// where the level is larger than the viewport.
    pub fn with_bounds(mut self, level_size: IVec2) -> Self {
        self.bounds = Some(level_size);
        self
    }

    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    pub fn viewport(&self) -> IVec2 {
        self.viewport
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Add a layer to the draw list. Registering twice is ignored.
    pub fn register(&mut self, layer: Layer) -> bool {
        if self.layers.contains(&layer) {
            return false;
        }
        self.layers.push(layer);
        true
    }

    /// Recompute the offset so `player_center` lands mid-viewport.
    pub fn update(&mut self, player_center: IVec2) {
        let mut offset = player_center - self.half;
        if let Some(level) = self.bounds {
            if level.x > self.viewport.x {
                offset.x = offset.x.clamp(0, level.x - self.viewport.x);
            }
            if level.y > self.viewport.y {
                offset.y = offset.y.clamp(0, level.y - self.viewport.y);
            }
        }
        self.offset = offset;
    }

    pub fn draw(&self, source: &impl LayerSource, surface: &mut Surface, art: &Art) {
        for &layer in &self.layers {
            source.draw_layer(layer, surface, art, self.offset);
        }
    }

    pub fn world_to_screen(&self, world: IVec2) -> IVec2 {
        world - self.offset
    }

    pub fn screen_to_world(&self, screen: IVec2) -> IVec2 {
        screen + self.offset
    }
}
