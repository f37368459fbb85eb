use super::TILE_SIZE_PX;
use crate::app::SideCamera;

#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Screen-space pixel position of a tile cell under the camera's horizontal
/// offset. Rows never shift; the view has no vertical scroll.
pub fn tile_to_screen_px(camera: &SideCamera, col: f32, row: f32) -> (i32, i32) {
    let x = (col + camera.offset_x) * TILE_SIZE_PX as f32;
    let y = row * TILE_SIZE_PX as f32;
    (x.round() as i32, y.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_offset_maps_columns_directly() {
        let camera = SideCamera::default();
        assert_eq!(tile_to_screen_px(&camera, 0.0, 0.0), (0, 0));
        assert_eq!(tile_to_screen_px(&camera, 3.0, 2.0), (96, 64));
    }

    #[test]
    fn camera_offset_shifts_columns_left() {
        let camera = SideCamera::new(-2.0);
        assert_eq!(tile_to_screen_px(&camera, 5.0, 1.0), (96, 32));
    }

    #[test]
    fn fractional_positions_round_to_nearest_pixel() {
        let camera = SideCamera::new(-0.25);
        let (x, y) = tile_to_screen_px(&camera, 1.5, 0.5);
        assert_eq!(x, 40);
        assert_eq!(y, 16);
    }

    #[test]
    fn rows_ignore_the_camera() {
        let near = SideCamera::default();
        let far = SideCamera::new(-12.0);
        let (_, y_near) = tile_to_screen_px(&near, 0.0, 7.0);
        let (_, y_far) = tile_to_screen_px(&far, 0.0, 7.0);
        assert_eq!(y_near, y_far);
    }
}
