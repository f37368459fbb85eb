/// The level core: static tile grid, dynamic entity registry, and the quiz
/// interrupt that gates both. One `draw` call is one logical tick.
pub(crate) struct Level {
    grid: TileGrid,
    entities: EntityRegistry,
    quiz: QuizInterrupt,
}

impl Level {
    pub(crate) fn from_document(document: &LevelDocument) -> Self {
        let mut level = Self {
            grid: TileGrid::build(document),
            entities: EntityRegistry::default(),
            quiz: QuizInterrupt::new(QUIZ_INTERVAL_TICKS),
        };
        level.spawn_document_entities(document);
        info!(
            width = level.grid.width(),
            height = level.grid.height(),
            entities = level.entities.len(),
            "level_built"
        );
        level
    }

    fn spawn_document_entities(&mut self, document: &LevelDocument) {
        let Some(entities) = document.level.entities.as_ref() else {
            info!("level_has_no_entity_section");
            return;
        };
        for &(x, y) in &entities.coin_box {
            self.add_coin_box(x, y);
        }
        for &(x, y) in &entities.goomba {
            self.add_goomba(x as f32, y as f32);
        }
        for &(x, y) in &entities.koopa {
            self.add_koopa(x as f32, y as f32);
        }
        for &(x, y) in &entities.coin {
            self.add_coin(x as f32, y as f32);
        }
        for &(x, y) in &entities.coin_brick {
            self.add_coin_brick(x, y);
        }
        for (x, y, item) in &entities.random_box {
            self.add_random_box(*x, *y, RandomBoxItem::from_document_id(item));
        }
    }

    pub(crate) fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub(crate) fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub(crate) fn quiz(&self) -> &QuizInterrupt {
        &self.quiz
    }

    pub(crate) fn quiz_active(&self) -> bool {
        self.quiz.is_active()
    }

    pub(crate) fn add_coin(&mut self, col: f32, row: f32) {
        self.entities.spawn(Box::new(Coin::new(col, row)));
    }

    pub(crate) fn add_coin_box(&mut self, col: i32, row: i32) {
        self.grid
            .place(row, col, Tile::collider_only(box_anchor_rect_px(col, row)));
        self.entities.spawn(Box::new(CoinBox::new(col, row)));
    }

    pub(crate) fn add_coin_brick(&mut self, col: i32, row: i32) {
        self.grid
            .place(row, col, Tile::collider_only(box_anchor_rect_px(col, row)));
        self.entities.spawn(Box::new(CoinBrick::new(col, row)));
    }

    pub(crate) fn add_random_box(&mut self, col: i32, row: i32, item: RandomBoxItem) {
        self.grid
            .place(row, col, Tile::collider_only(box_anchor_rect_px(col, row)));
        self.entities.spawn(Box::new(RandomBox::new(col, row, item)));
    }

    pub(crate) fn add_goomba(&mut self, col: f32, row: f32) {
        self.entities.spawn(Box::new(Goomba::new(col, row)));
    }

    pub(crate) fn add_koopa(&mut self, col: f32, row: f32) {
        self.entities.spawn(Box::new(Koopa::new(col, row)));
    }

    pub(crate) fn add_red_mushroom(&mut self, col: f32, row: f32) {
        self.entities.spawn(Box::new(RedMushroom::new(col, row)));
    }

    pub(crate) fn resolve_quiz_click(
        &mut self,
        x_px: i32,
        y_px: i32,
        progress: &mut QuizProgress,
        bank: &QuizBank,
    ) -> QuizAnswer {
        self.quiz.resolve_pointer_down(x_px, y_px, progress, bank)
    }

    /// One tick of the world: tile scan, then either the quiz overlay (when
    /// a question is up, the entity/tile update path stays suspended) or
    /// the entity pass followed by the quiz trigger.
    pub(crate) fn draw(
        &mut self,
        camera: &SideCamera,
        surface: &mut dyn Surface,
        progress: &QuizProgress,
        bank: &QuizBank,
    ) {
        if !self.draw_tiles(camera, surface) {
            return;
        }
        if self.quiz.is_active() {
            self.quiz.draw_overlay(surface, bank);
            return;
        }

        let Self { grid, entities, .. } = self;
        entities.update_all(camera, surface, grid);
        entities.remove_dead();

        self.quiz.tick_trigger(progress, bank);
        if self.quiz.is_active() {
            self.quiz.draw_overlay(surface, bank);
        }
    }

    /// Scans the fixed 15-row window across the camera-shifted column
    /// range. Returns false when the scan leaves the grid; the caller
    /// abandons the rest of this frame and resumes on the next one, since
    /// the visible window may legitimately overhang the level edges.
    fn draw_tiles(&self, camera: &SideCamera, surface: &mut dyn Surface) -> bool {
        let (first_col, last_col) = visible_column_range(camera);
        for row in 0..VISIBLE_ROWS {
            for col in first_col.max(0)..last_col {
                let Some(tile) = self.grid.get(row, col) else {
                    return false;
                };
                let Some(key) = tile.sprite() else {
                    continue;
                };
                let (x_px, y_px) = tile_to_screen_px(camera, col as f32, row as f32);
                if surface.sprite_needs_backdrop(key) {
                    surface.blit_sprite(SKY_SPRITE, x_px, y_px);
                }
                surface.blit_sprite(key, x_px, y_px);
            }
        }
        true
    }
}

/// Camera-shifted visible column window, one guard column wider than the
/// screen on each side. Truncation (not flooring) of the fractional offset
/// matches the level coordinate convention.
fn visible_column_range(camera: &SideCamera) -> (i32, i32) {
    let first = 0 - (camera.offset_x + 1.0) as i32;
    let last = VISIBLE_COLS - (camera.offset_x - 1.0) as i32;
    (first, last)
}
