use std::path::Path;

use engine::{
    tile_to_screen_px, InputAction, InputSnapshot, RectPx, Scene, SceneCommand, SideCamera,
    Surface, TILE_SIZE_PX,
};
use serde::Deserialize;
use tracing::{info, warn};

const VISIBLE_ROWS: i32 = 15;
const VISIBLE_COLS: i32 = 20;

const QUIZ_INTERVAL_TICKS: u32 = 5 * 60;
const QUIZ_PANEL: RectPx = RectPx::new(40, 50, 560, 240);
const QUIZ_PANEL_BORDER_PX: i32 = 3;
const QUIZ_PROMPT_X: i32 = 55;
const QUIZ_PROMPT_Y: i32 = 65;
const QUIZ_OPTION_X: i32 = 60;
const QUIZ_OPTION_TOP_Y: i32 = 110;
const QUIZ_OPTION_WIDTH: i32 = 520;
const QUIZ_OPTION_HEIGHT: i32 = 30;
const QUIZ_OPTION_STRIDE_Y: i32 = 40;
const QUIZ_OPTION_TEXT_INSET_X: i32 = 10;
const QUIZ_OPTION_TEXT_INSET_Y: i32 = 5;
const QUIZ_PANEL_BG_COLOR: [u8; 4] = [0, 0, 0, 255];
const QUIZ_PANEL_BORDER_COLOR: [u8; 4] = [255, 255, 255, 255];
const QUIZ_OPTION_BG_COLOR: [u8; 4] = [60, 60, 60, 255];
const QUIZ_TEXT_COLOR: [u8; 4] = [255, 255, 255, 255];

const SKY_SPRITE: &str = "sky";
const GROUND_SPRITE: &str = "ground";
const BUSH_SPRITES: [&str; 3] = ["bush_1", "bush_2", "bush_3"];
const CLOUD_SPRITE_GRID: [[&str; 3]; 2] = [
    ["cloud1_1", "cloud1_2", "cloud1_3"],
    ["cloud2_1", "cloud2_2", "cloud2_3"],
];
const PIPE_HEAD_LEFT_SPRITE: &str = "pipe_head_l";
const PIPE_HEAD_RIGHT_SPRITE: &str = "pipe_head_r";
const PIPE_BODY_LEFT_SPRITE: &str = "pipe_body_l";
const PIPE_BODY_RIGHT_SPRITE: &str = "pipe_body_r";
const COIN_SPRITE: &str = "coin";
const COIN_BOX_SPRITE: &str = "coin_box";
const COIN_BRICK_SPRITE: &str = "coin_brick";
const RANDOM_BOX_SPRITE: &str = "random_box";
const BOX_EMPTY_SPRITE: &str = "box_empty";
const GOOMBA_SPRITE: &str = "goomba";
const KOOPA_SPRITE: &str = "koopa";
const KOOPA_SHELL_SPRITE: &str = "koopa_shell";
const RED_MUSHROOM_SPRITE: &str = "red_mushroom";
const PLAYER_SPRITE: &str = "player";

const COIN_BOX_COIN_COUNT: u32 = 1;
const COIN_BRICK_COIN_COUNT: u32 = 5;
const COIN_BOB_CYCLES_PER_TICK: f32 = 0.05;
const COIN_BOB_AMPLITUDE_TILES: f32 = 0.08;
const GOOMBA_SPEED_COLS_PER_TICK: f32 = 0.03;
const KOOPA_SPEED_COLS_PER_TICK: f32 = 0.045;
const MUSHROOM_SPEED_COLS_PER_TICK: f32 = 0.04;
const KOOPA_SHELL_LINGER_TICKS: u32 = 180;

const CAMERA_SCROLL_COLS_PER_TICK: f32 = 0.1;
const BOOST_SCROLL_MULTIPLIER: f32 = 2.0;
const PLAYER_SCREEN_COL: f32 = 9.0;
const PLAYER_STAND_ROW: f32 = 12.0;
const PLAYER_JUMP_IMPULSE_PX: f32 = 9.0;
const PLAYER_GRAVITY_PX_PER_TICK: f32 = 0.6;
const PLAYER_BOB_AMPLITUDE_PX: f32 = 1.5;
const PLAYER_BOB_CYCLES_PER_TICK: f32 = 0.0125;

include!("types.rs");
include!("grid.rs");
include!("registry.rs");
include!("entities.rs");
include!("quiz.rs");
include!("level.rs");
include!("scene_impl.rs");

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
