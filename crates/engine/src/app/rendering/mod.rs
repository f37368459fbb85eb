mod renderer;
mod surface;
mod text;
mod transform;

pub use renderer::Renderer;
pub use surface::{FrameSurface, RectPx, Surface};
pub use transform::{tile_to_screen_px, Viewport};

/// Side length of one grid cell on screen.
pub const TILE_SIZE_PX: i32 = 32;
