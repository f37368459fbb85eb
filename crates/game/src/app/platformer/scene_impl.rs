/// Stand-in for the player collaborator: receives restart requests from
/// the quiz path and keeps the on-screen marker's jump state. Real
/// movement and physics live outside this crate's scope.
#[derive(Debug, Default)]
struct PlayerRig {
    restart_requested: bool,
    jump_offset_px: f32,
    jump_velocity_px: f32,
}

impl PlayerRig {
    fn request_restart(&mut self) {
        self.restart_requested = true;
    }

    fn take_restart_request(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }

    fn is_grounded(&self) -> bool {
        self.jump_offset_px == 0.0 && self.jump_velocity_px == 0.0
    }

    fn step_jump(&mut self, jump_held: bool) {
        if jump_held && self.is_grounded() {
            self.jump_velocity_px = -PLAYER_JUMP_IMPULSE_PX;
        }
        if !self.is_grounded() {
            self.jump_velocity_px += PLAYER_GRAVITY_PX_PER_TICK;
            self.jump_offset_px += self.jump_velocity_px;
            if self.jump_offset_px >= 0.0 {
                self.jump_offset_px = 0.0;
                self.jump_velocity_px = 0.0;
            }
        }
    }
}

/// Frame-loop caller of the level core: translates input intents, routes
/// control to the quiz path while a question is up, and owns the
/// session-wide quiz progress so it survives restarts.
pub(crate) struct PlatformerScene {
    document: LevelDocument,
    bank: QuizBank,
    level: Level,
    progress: QuizProgress,
    camera: SideCamera,
    player: PlayerRig,
}

impl PlatformerScene {
    pub(crate) fn new(document: LevelDocument, bank: QuizBank) -> Self {
        if bank.is_empty() {
            warn!("quiz_bank_empty_no_interrupts_will_fire");
        }
        let level = Level::from_document(&document);
        Self {
            document,
            bank,
            level,
            progress: QuizProgress::default(),
            camera: SideCamera::default(),
            player: PlayerRig::default(),
        }
    }

    fn handle_quiz_input(&mut self, input: &InputSnapshot) {
        if !input.left_click_pressed() {
            return;
        }
        let Some((x_px, y_px)) = input.cursor_position_px() else {
            return;
        };
        let answer = self.level.resolve_quiz_click(
            x_px.round() as i32,
            y_px.round() as i32,
            &mut self.progress,
            &self.bank,
        );
        if answer == QuizAnswer::Failed {
            self.player.request_restart();
        }
    }

    fn apply_gameplay_intents(&mut self, input: &InputSnapshot) {
        let boost = if input.is_down(InputAction::Boost) {
            BOOST_SCROLL_MULTIPLIER
        } else {
            1.0
        };
        let max_scroll = (self.level.grid().width() as f32 - VISIBLE_COLS as f32).max(0.0);
        let moving_right = input.is_down(InputAction::MoveRight);
        let moving_left = input.is_down(InputAction::MoveLeft);
        if moving_right && !moving_left {
            self.camera
                .scroll_by(CAMERA_SCROLL_COLS_PER_TICK * boost, max_scroll);
        } else if moving_left && !moving_right {
            self.camera
                .scroll_by(-CAMERA_SCROLL_COLS_PER_TICK * boost, max_scroll);
        }
        self.player.step_jump(input.is_down(InputAction::Jump));

        if input.right_click_pressed() {
            if let Some((col, row)) = self.cursor_world_tile(input) {
                self.level.add_koopa(col, row);
                self.level.add_goomba(col, row);
                self.level.add_red_mushroom(col, row);
            }
        }
        if input.left_click_pressed() {
            if let Some((col, row)) = self.cursor_world_tile(input) {
                self.level.add_coin(col, row);
            }
        }
    }

    fn cursor_world_tile(&self, input: &InputSnapshot) -> Option<(f32, f32)> {
        let (x_px, y_px) = input.cursor_position_px()?;
        Some(cursor_to_world_tile(&self.camera, x_px, y_px))
    }

    /// The playable character itself is outside this core; the scene keeps
    /// a marker on screen so scrolling and jumping stay visible.
    fn draw_player_marker(&self, tick: u64, surface: &mut dyn Surface) {
        let bob = if self.player.is_grounded() {
            (std::f32::consts::TAU * tick as f32 * PLAYER_BOB_CYCLES_PER_TICK).sin()
                * PLAYER_BOB_AMPLITUDE_PX
        } else {
            0.0
        };
        let (x_px, y_px) = tile_to_screen_px(
            &SideCamera::default(),
            PLAYER_SCREEN_COL,
            PLAYER_STAND_ROW,
        );
        let y_px = y_px + (self.player.jump_offset_px + bob).round() as i32;
        surface.blit_sprite(PLAYER_SPRITE, x_px, y_px);
    }
}

impl Scene for PlatformerScene {
    fn load(&mut self) {
        self.level = Level::from_document(&self.document);
        self.camera = SideCamera::default();
        self.player = PlayerRig::default();
        info!(
            questions_answered = self.progress.questions_answered(),
            "level_loaded"
        );
    }

    fn frame(
        &mut self,
        tick: u64,
        input: &InputSnapshot,
        surface: &mut dyn Surface,
    ) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Quit;
        }

        if self.level.quiz_active() {
            self.handle_quiz_input(input);
            self.level
                .draw(&self.camera, surface, &self.progress, &self.bank);
        } else {
            self.apply_gameplay_intents(input);
            self.level
                .draw(&self.camera, surface, &self.progress, &self.bank);
            if !self.level.quiz_active() {
                self.draw_player_marker(tick, surface);
            }
        }

        if self.player.take_restart_request() {
            return SceneCommand::Restart;
        }
        SceneCommand::None
    }

    fn debug_title(&self) -> Option<String> {
        let quiz_state = match self.level.quiz().bound_question() {
            Some(index) if self.level.quiz_active() => format!("q{index} open"),
            _ => format!(
                "{}/{}",
                self.progress.questions_answered(),
                self.bank.len()
            ),
        };
        Some(format!(
            "Sidequest | entities: {} | quiz {}",
            self.level.entity_count(),
            quiz_state
        ))
    }
}

/// Inverse of the camera translation for pointer input: screen pixels to
/// fractional world tile coordinates.
fn cursor_to_world_tile(camera: &SideCamera, x_px: f32, y_px: f32) -> (f32, f32) {
    (
        x_px / TILE_SIZE_PX as f32 - camera.offset_x,
        y_px / TILE_SIZE_PX as f32,
    )
}
