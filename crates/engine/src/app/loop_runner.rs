use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::content::{ContentError, SpriteCatalog};
use crate::{resolve_app_paths, StartupError};

use super::metrics::MetricsAccumulator;
use super::{InputAction, InputSnapshot, Renderer, Scene, SceneCommand};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Sidequest".to_string(),
            window_width: 640,
            window_height: 480,
            target_fps: 60,
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("failed to load sprite catalog: {0}")]
    Content(#[from] ContentError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Runs the scene at one logical tick per rendered frame until it quits or
/// the window closes. A `Restart` command reloads the scene in place; the
/// tick counter keeps increasing across reloads.
pub fn run_app(config: LoopConfig, mut scene: Box<dyn Scene>) -> Result<(), AppError> {
    let app_paths = resolve_app_paths()?;
    info!(
        root = %app_paths.root.display(),
        assets_dir = %app_paths.assets_dir.display(),
        "startup"
    );
    let catalog = SpriteCatalog::load(&app_paths)?;

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = std::sync::Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let window_for_loop = std::sync::Arc::clone(&window);
    let mut renderer = Renderer::new(window, catalog).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let frame_target = target_frame_duration(config.target_fps);
    let mut input_collector = InputCollector::new(config.window_width, config.window_height);
    scene.load();
    info!(target_fps = config.target_fps, "loop_config");

    let mut tick: u64 = 0;
    let mut last_present_instant = Instant::now();
    let mut last_frame_instant = Instant::now();
    let mut metrics_accumulator =
        MetricsAccumulator::new(config.metrics_log_interval, Instant::now());
    let mut last_applied_title: Option<String> = None;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window_for_loop.id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        info!(reason = "window_close", "shutdown_requested");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        input_collector.set_window_size(new_size.width, new_size.height);
                        if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                    }
                    WindowEvent::ScaleFactorChanged { .. } => {
                        let size = window_for_loop.inner_size();
                        input_collector.set_window_size(size.width, size.height);
                        if let Err(error) = renderer.resize(size.width, size.height) {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input_collector
                            .set_cursor_position_px(position.x as f32, position.y as f32);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input_collector.clear_cursor_position();
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        input_collector.handle_mouse_input(button, state);
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        input_collector.handle_keyboard_input(&event);
                        if input_collector.quit_requested {
                            info!(reason = "escape_key", "shutdown_requested");
                            window_target.exit();
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        let frame_dt = now.saturating_duration_since(last_frame_instant);
                        last_frame_instant = now;

                        let snapshot = input_collector.snapshot_for_tick();
                        let mut surface = renderer.begin_frame();
                        let command = scene.frame(tick, &snapshot, &mut surface);
                        drop(surface);
                        tick = tick.saturating_add(1);

                        if let Err(error) = renderer.present() {
                            warn!(error = %error, "renderer_present_failed");
                            window_target.exit();
                        }

                        match command {
                            SceneCommand::Restart => {
                                info!(tick, "scene_restart");
                                scene.load();
                            }
                            SceneCommand::Quit => {
                                info!(reason = "scene_quit", "shutdown_requested");
                                window_target.exit();
                            }
                            SceneCommand::None => {}
                        }

                        let elapsed_since_last_present =
                            Instant::now().saturating_duration_since(last_present_instant);
                        let cap_sleep = compute_cap_sleep(elapsed_since_last_present, frame_target);
                        if cap_sleep > Duration::ZERO {
                            thread::sleep(cap_sleep);
                        }
                        last_present_instant = Instant::now();

                        if metrics_accumulator
                            .record_frame(Instant::now(), frame_dt)
                            .is_some()
                        {
                            let snapshot = metrics_accumulator.last_snapshot();
                            let next_title = scene.debug_title().map(|title| {
                                format!("{title} | {:.0} FPS", snapshot.fps)
                            });
                            if next_title != last_applied_title {
                                match &next_title {
                                    Some(title) => window_for_loop.set_title(title),
                                    None => window_for_loop.set_title(&config.window_title),
                                }
                                last_applied_title = next_title;
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                window_for_loop.request_redraw();
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    action_states: super::input::ActionStates,
    cursor_position_px: Option<(f32, f32)>,
    left_mouse_is_down: bool,
    left_click_pressed_edge: bool,
    right_mouse_is_down: bool,
    right_click_pressed_edge: bool,
    window_width: u32,
    window_height: u32,
}

impl InputCollector {
    fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            window_width,
            window_height,
            ..Self::default()
        }
    }

    fn handle_keyboard_input(&mut self, key_event: &winit::event::KeyEvent) {
        let is_pressed = key_event.state == ElementState::Pressed;
        if let PhysicalKey::Code(code) = key_event.physical_key {
            if let Some(action) = action_for_key(code) {
                self.action_states.set(action, is_pressed);
            }
            if code == KeyCode::Escape && is_pressed {
                self.quit_requested = true;
            }
        }
    }

    fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        match button {
            MouseButton::Left => match state {
                ElementState::Pressed => {
                    if !self.left_mouse_is_down {
                        self.left_click_pressed_edge = true;
                    }
                    self.left_mouse_is_down = true;
                }
                ElementState::Released => self.left_mouse_is_down = false,
            },
            MouseButton::Right => match state {
                ElementState::Pressed => {
                    if !self.right_mouse_is_down {
                        self.right_click_pressed_edge = true;
                    }
                    self.right_mouse_is_down = true;
                }
                ElementState::Released => self.right_mouse_is_down = false,
            },
            _ => {}
        }
    }

    fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    fn set_cursor_position_px(&mut self, x: f32, y: f32) {
        self.cursor_position_px = Some((x, y));
    }

    fn clear_cursor_position(&mut self) {
        self.cursor_position_px = None;
    }

    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot::new(
            self.quit_requested,
            self.action_states,
            self.cursor_position_px,
            self.left_click_pressed_edge,
            self.right_click_pressed_edge,
            self.window_width,
            self.window_height,
        );
        self.left_click_pressed_edge = false;
        self.right_click_pressed_edge = false;
        snapshot
    }
}

fn action_for_key(code: KeyCode) -> Option<InputAction> {
    match code {
        KeyCode::ArrowLeft | KeyCode::KeyH => Some(InputAction::MoveLeft),
        KeyCode::ArrowRight | KeyCode::KeyL => Some(InputAction::MoveRight),
        KeyCode::Space | KeyCode::ArrowUp | KeyCode::KeyK => Some(InputAction::Jump),
        KeyCode::ShiftLeft => Some(InputAction::Boost),
        _ => None,
    }
}

fn target_frame_duration(target_fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / target_fps.max(1) as f64)
}

fn compute_cap_sleep(elapsed: Duration, frame_target: Duration) -> Duration {
    if elapsed < frame_target {
        frame_target - elapsed
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_frame_duration_for_60hz_is_expected() {
        let duration = target_frame_duration(60);
        assert!((duration.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn target_frame_duration_survives_zero_fps() {
        assert_eq!(target_frame_duration(0), Duration::from_secs(1));
    }

    #[test]
    fn compute_cap_sleep_zero_when_over_budget() {
        let sleep = compute_cap_sleep(Duration::from_millis(20), Duration::from_millis(16));
        assert_eq!(sleep, Duration::ZERO);
    }

    #[test]
    fn compute_cap_sleep_positive_when_under_budget() {
        let sleep = compute_cap_sleep(Duration::from_millis(4), Duration::from_millis(16));
        assert_eq!(sleep, Duration::from_millis(12));
    }

    #[test]
    fn movement_keys_map_to_actions() {
        assert_eq!(
            action_for_key(KeyCode::ArrowLeft),
            Some(InputAction::MoveLeft)
        );
        assert_eq!(action_for_key(KeyCode::KeyH), Some(InputAction::MoveLeft));
        assert_eq!(
            action_for_key(KeyCode::ArrowRight),
            Some(InputAction::MoveRight)
        );
        assert_eq!(action_for_key(KeyCode::Space), Some(InputAction::Jump));
        assert_eq!(action_for_key(KeyCode::ShiftLeft), Some(InputAction::Boost));
        assert_eq!(action_for_key(KeyCode::KeyZ), None);
    }

    #[test]
    fn click_edges_reset_after_snapshot() {
        let mut collector = InputCollector::new(640, 480);
        collector.handle_mouse_input(MouseButton::Left, ElementState::Pressed);
        collector.handle_mouse_input(MouseButton::Right, ElementState::Pressed);

        let first = collector.snapshot_for_tick();
        assert!(first.left_click_pressed());
        assert!(first.right_click_pressed());

        let second = collector.snapshot_for_tick();
        assert!(!second.left_click_pressed());
        assert!(!second.right_click_pressed());
    }

    #[test]
    fn held_button_does_not_retrigger_edge() {
        let mut collector = InputCollector::new(640, 480);
        collector.handle_mouse_input(MouseButton::Left, ElementState::Pressed);
        let _ = collector.snapshot_for_tick();
        collector.handle_mouse_input(MouseButton::Left, ElementState::Pressed);
        assert!(!collector.snapshot_for_tick().left_click_pressed());

        collector.handle_mouse_input(MouseButton::Left, ElementState::Released);
        collector.handle_mouse_input(MouseButton::Left, ElementState::Pressed);
        assert!(collector.snapshot_for_tick().left_click_pressed());
    }
}
