use std::collections::HashSet;
use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::content::SpriteCatalog;

use super::{FrameSurface, Viewport};

const CLEAR_COLOR: [u8; 4] = [93, 148, 251, 255];

/// Owns the window-backed framebuffer and the sprite catalog. Each frame is
/// drawn through a [`FrameSurface`] borrowed from `begin_frame` and pushed
/// to the window with `present`.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
    catalog: SpriteCatalog,
    warned_missing_sprite_keys: HashSet<String>,
}

impl Renderer {
    pub fn new(window: Arc<Window>, catalog: SpriteCatalog) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
            catalog,
            warned_missing_sprite_keys: HashSet::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub fn begin_frame(&mut self) -> FrameSurface<'_> {
        let mut surface = FrameSurface::new(
            self.pixels.frame_mut(),
            self.viewport.width,
            self.viewport.height,
            &self.catalog,
            &mut self.warned_missing_sprite_keys,
        );
        surface.clear(CLEAR_COLOR);
        surface
    }

    pub fn present(&mut self) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }
        self.pixels.render()
    }
}
