// =============================================================================
// SURFACE.RS: CPU framebuffer every sprite is composited into
//
// Once per frame the renderer uploads the finished surface to the GPU as a
// single texture. Game code and tests only ever see this module, so no
// graphics device is needed to exercise drawing.
// =============================================================================

use glam::IVec2;
use image::{Rgba, RgbaImage, imageops};

/// Straight-alpha RGBA colour.
pub type Color = [u8; 4];

pub const BLACK: Color = [0, 0, 0, 255];

/// The display surface: a fixed-size RGBA image.
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, Rgba(BLACK)) }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width() as i32, self.height() as i32)
    }

    pub fn fill(&mut self, color: Color) {
        for px in self.image.pixels_mut() {
            *px = Rgba(color);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width() && y < self.height()).then(|| self.image.get_pixel(x, y).0)
    }

    /// Raw RGBA8 bytes, row-major, `4 * width` bytes per row.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Draw `src` with its top-left corner at `pos`.
    ///
    /// Fully transparent source pixels are skipped, partially transparent ones
    /// are blended. Anything outside the surface is clipped.
    pub fn blit(&mut self, src: &RgbaImage, pos: IVec2) {
        imageops::overlay(&mut self.image, src, pos.x.into(), pos.y.into());
    }

    /// Darken the whole surface by blending `color` over it.
    pub fn overlay(&mut self, color: Color) {
        let veil = RgbaImage::from_pixel(self.width(), self.height(), Rgba(color));
        imageops::overlay(&mut self.image, &veil, 0, 0);
    }
}

/// Rotate `src` counter-clockwise by `degrees` around its centre.
///
/// The result is grown to hold the whole rotated image (like an expanding
/// rotate), sampled nearest-neighbour, with uncovered pixels left transparent.
/// Right-angle multiples, including zero, are exact.
pub fn rotate_image(src: &RgbaImage, degrees: f32) -> RgbaImage {
    if degrees.rem_euclid(360.0) == 0.0 {
        return src.clone();
    }

    let (sin, cos) = degrees.to_radians().sin_cos();
    let (w, h) = (src.width() as f32, src.height() as f32);
    let out_w = (w * cos.abs() + h * sin.abs()).round().max(1.0) as u32;
    let out_h = (w * sin.abs() + h * cos.abs()).round().max(1.0) as u32;

    let (scx, scy) = (w / 2.0, h / 2.0);
    let (dcx, dcy) = (out_w as f32 / 2.0, out_h as f32 / 2.0);

    let mut out = RgbaImage::new(out_w, out_h);
    for oy in 0..out_h {
        for ox in 0..out_w {
            // Inverse-map the destination pixel centre into the source image.
            // Screen y grows downward, so a counter-clockwise turn on screen is
            // a clockwise turn in these coordinates.
            let dx = ox as f32 + 0.5 - dcx;
            let dy = oy as f32 + 0.5 - dcy;
            let sx = cos * dx - sin * dy + scx;
            let sy = sin * dx + cos * dy + scy;
            if sx < 0.0 || sy < 0.0 || sx >= w || sy >= h {
                continue;
            }
            out.put_pixel(ox, oy, *src.get_pixel(sx as u32, sy as u32));
        }
    }
    out
}
