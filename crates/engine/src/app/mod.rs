mod camera;
mod input;
mod loop_runner;
mod metrics;
pub mod rendering;
mod scene;

pub use camera::SideCamera;
pub use input::{InputAction, InputSnapshot};
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{
    tile_to_screen_px, FrameSurface, RectPx, Renderer, Surface, Viewport, TILE_SIZE_PX,
};
pub use scene::{Scene, SceneCommand};
