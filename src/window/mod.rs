pub mod config;

pub use config::{WindowConfig, WindowMode};

use winit::dpi::PhysicalSize;
use winit::monitor::MonitorHandle;
use winit::window::{Fullscreen, Window};

/// Switch `window` into the mode `config` asks for.
pub fn apply_window_settings(window: &Window, config: &WindowConfig) {
    let requested = PhysicalSize::new(config.physical_width, config.physical_height);
    match config.mode {
        WindowMode::Windowed => {
            window.set_fullscreen(None);
            window.set_decorations(true);
            // Some platforms resize asynchronously and report back via Resized.
            let _ = window.request_inner_size(requested);
        }
        WindowMode::Fullscreen => {
            let fullscreen = window
                .current_monitor()
                .map(|monitor| exclusive_or_borderless(monitor, requested))
                .unwrap_or(Fullscreen::Borderless(None));
            window.set_fullscreen(Some(fullscreen));
        }
        WindowMode::Borderless => window.set_fullscreen(Some(Fullscreen::Borderless(None))),
    }
    log::debug!("[window] {:?} at {}x{}", config.mode, requested.width, requested.height);
}

/// The monitor's video mode nearest in area to `size`, or borderless when it
/// lists none.
fn exclusive_or_borderless(monitor: MonitorHandle, size: PhysicalSize<u32>) -> Fullscreen {
    let area = |s: PhysicalSize<u32>| u64::from(s.width) * u64::from(s.height);
    let target = area(size);
    let nearest = monitor.video_modes().min_by_key(|m| area(m.size()).abs_diff(target));
    match nearest {
        Some(mode) => Fullscreen::Exclusive(mode),
        None => Fullscreen::Borderless(Some(monitor)),
    }
}
