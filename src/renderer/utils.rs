// ── Letterboxing ─────────────────────────────────────────────────────────────
//
// The game draws at a fixed logical resolution. The present pass scales that
// frame uniformly to the largest size the window can hold and centres it,
// leaving black bars on whichever axis has room to spare.

use bytemuck::{Pod, Zeroable};

use crate::window::WindowConfig;

/// Where the frame lands inside the window, in physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fit the logical frame of `config` into its physical window.
///
/// A zero logical dimension yields an empty viewport at the origin.
pub fn letterbox_viewport(config: &WindowConfig) -> Viewport {
    if config.logical_width == 0 || config.logical_height == 0 {
        return Viewport::default();
    }

    let (win_w, win_h) = (config.physical_width as f32, config.physical_height as f32);
    let (frame_w, frame_h) = (config.logical_width as f32, config.logical_height as f32);
    let fit = f32::min(win_w / frame_w, win_h / frame_h);

    let width = frame_w * fit;
    let height = frame_h * fit;
    Viewport { x: (win_w - width) * 0.5, y: (win_h - height) * 0.5, width, height }
}

/// Where the present shader puts the frame quad, in normalised device
/// coordinates: `scale` is the quad's half-extent, `offset` its centre.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LetterboxUniform {
    pub scale: [f32; 2],
    pub offset: [f32; 2],
}

impl LetterboxUniform {
    /// Convert a viewport inside a `physical_width` x `physical_height`
    /// window into NDC. A zero-sized window collapses the quad.
    pub fn from_viewport(v: &Viewport, physical_width: u32, physical_height: u32) -> Self {
        if physical_width == 0 || physical_height == 0 {
            return Self::zeroed();
        }
        let (pw, ph) = (physical_width as f32, physical_height as f32);
        let cx = v.x + v.width * 0.5;
        let cy = v.y + v.height * 0.5;
        Self {
            scale: [v.width / pw, v.height / ph],
            offset: [cx / pw * 2.0 - 1.0, 1.0 - cy / ph * 2.0],
        }
    }
}
