#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkDirection {
    Left,
    Right,
}

impl WalkDirection {
    fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Advances a one-tile-wide patroller and reverses it at solid tiles and
/// level edges. Returns the new column and facing.
fn step_patrol(
    grid: &TileGrid,
    col: f32,
    row: f32,
    direction: WalkDirection,
    speed: f32,
) -> (f32, WalkDirection) {
    let (next_col, probe_col) = match direction {
        WalkDirection::Left => {
            let next = col - speed;
            (next, next.floor() as i32)
        }
        WalkDirection::Right => {
            let next = col + speed;
            (next, next.floor() as i32 + 1)
        }
    };
    let out_of_level = probe_col < 0 || probe_col >= grid.width() as i32;
    if out_of_level || grid.is_solid(row as i32, probe_col) {
        (col, direction.reversed())
    } else {
        (next_col, direction)
    }
}

pub(crate) struct Coin {
    col: f32,
    row: f32,
    age_ticks: u32,
    alive: bool,
}

impl Coin {
    pub(crate) fn new(col: f32, row: f32) -> Self {
        Self {
            col,
            row,
            age_ticks: 0,
            alive: true,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn collect(&mut self) {
        self.alive = false;
    }
}

impl Entity for Coin {
    fn update(&mut self, ctx: &mut EntityCtx<'_>) {
        self.age_ticks = self.age_ticks.wrapping_add(1);
        let bob = (std::f32::consts::TAU * self.age_ticks as f32 * COIN_BOB_CYCLES_PER_TICK)
            .sin()
            * COIN_BOB_AMPLITUDE_TILES;
        let (x_px, y_px) = tile_to_screen_px(ctx.camera, self.col, self.row - bob);
        ctx.surface.blit_sprite(COIN_SPRITE, x_px, y_px);
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Shared behavior of the three container variants: sit still, and on the
/// first update after a bump release the configured content into the
/// registry's next pass.
pub(crate) struct CoinBox {
    col: i32,
    row: i32,
    coins_left: u32,
    bump_pending: bool,
}

impl CoinBox {
    pub(crate) fn new(col: i32, row: i32) -> Self {
        Self {
            col,
            row,
            coins_left: COIN_BOX_COIN_COUNT,
            bump_pending: false,
        }
    }

    pub(crate) fn with_coin_count(col: i32, row: i32, coins: u32) -> Self {
        Self {
            col,
            row,
            coins_left: coins,
            bump_pending: false,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn bump(&mut self) {
        if self.coins_left > 0 {
            self.bump_pending = true;
        }
    }

    fn sprite_key(&self, full_key: &'static str) -> &'static str {
        if self.coins_left == 0 {
            BOX_EMPTY_SPRITE
        } else {
            full_key
        }
    }
}

impl Entity for CoinBox {
    fn update(&mut self, ctx: &mut EntityCtx<'_>) {
        if self.bump_pending && self.coins_left > 0 {
            self.coins_left -= 1;
            ctx.spawn_next_pass(Box::new(Coin::new(self.col as f32, self.row as f32 - 1.0)));
        }
        self.bump_pending = false;
        let (x_px, y_px) = tile_to_screen_px(ctx.camera, self.col as f32, self.row as f32);
        ctx.surface.blit_sprite(self.sprite_key(COIN_BOX_SPRITE), x_px, y_px);
    }

    fn is_alive(&self) -> bool {
        true
    }
}

pub(crate) struct CoinBrick {
    inner: CoinBox,
}

impl CoinBrick {
    pub(crate) fn new(col: i32, row: i32) -> Self {
        Self {
            inner: CoinBox::with_coin_count(col, row, COIN_BRICK_COIN_COUNT),
        }
    }

    #[allow(dead_code)]
    pub(crate) fn bump(&mut self) {
        self.inner.bump();
    }
}

impl Entity for CoinBrick {
    fn update(&mut self, ctx: &mut EntityCtx<'_>) {
        if self.inner.bump_pending && self.inner.coins_left > 0 {
            self.inner.coins_left -= 1;
            ctx.spawn_next_pass(Box::new(Coin::new(
                self.inner.col as f32,
                self.inner.row as f32 - 1.0,
            )));
        }
        self.inner.bump_pending = false;
        let (x_px, y_px) =
            tile_to_screen_px(ctx.camera, self.inner.col as f32, self.inner.row as f32);
        ctx.surface
            .blit_sprite(self.inner.sprite_key(COIN_BRICK_SPRITE), x_px, y_px);
    }

    fn is_alive(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RandomBoxItem {
    Coin,
    RedMushroom,
}

impl RandomBoxItem {
    pub(crate) fn from_document_id(id: &str) -> Self {
        match id {
            "RedMushroom" => Self::RedMushroom,
            "coin" => Self::Coin,
            other => {
                warn!(item = other, "unknown_random_box_item_defaulting_to_coin");
                Self::Coin
            }
        }
    }
}

pub(crate) struct RandomBox {
    col: i32,
    row: i32,
    item: RandomBoxItem,
    opened: bool,
    bump_pending: bool,
}

impl RandomBox {
    pub(crate) fn new(col: i32, row: i32, item: RandomBoxItem) -> Self {
        Self {
            col,
            row,
            item,
            opened: false,
            bump_pending: false,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn bump(&mut self) {
        if !self.opened {
            self.bump_pending = true;
        }
    }
}

impl Entity for RandomBox {
    fn update(&mut self, ctx: &mut EntityCtx<'_>) {
        if self.bump_pending && !self.opened {
            self.opened = true;
            let col = self.col as f32;
            let row = self.row as f32 - 1.0;
            match self.item {
                RandomBoxItem::Coin => ctx.spawn_next_pass(Box::new(Coin::new(col, row))),
                RandomBoxItem::RedMushroom => {
                    ctx.spawn_next_pass(Box::new(RedMushroom::new(col, row)))
                }
            }
        }
        self.bump_pending = false;
        let key = if self.opened {
            BOX_EMPTY_SPRITE
        } else {
            RANDOM_BOX_SPRITE
        };
        let (x_px, y_px) = tile_to_screen_px(ctx.camera, self.col as f32, self.row as f32);
        ctx.surface.blit_sprite(key, x_px, y_px);
    }

    fn is_alive(&self) -> bool {
        true
    }
}

pub(crate) struct Goomba {
    col: f32,
    row: f32,
    direction: WalkDirection,
    alive: bool,
}

impl Goomba {
    pub(crate) fn new(col: f32, row: f32) -> Self {
        Self {
            col,
            row,
            direction: WalkDirection::Left,
            alive: true,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn stomp(&mut self) {
        self.alive = false;
    }
}

impl Entity for Goomba {
    fn update(&mut self, ctx: &mut EntityCtx<'_>) {
        let (col, direction) = step_patrol(
            ctx.grid,
            self.col,
            self.row,
            self.direction,
            GOOMBA_SPEED_COLS_PER_TICK,
        );
        self.col = col;
        self.direction = direction;
        let (x_px, y_px) = tile_to_screen_px(ctx.camera, self.col, self.row);
        ctx.surface.blit_sprite(GOOMBA_SPRITE, x_px, y_px);
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KoopaState {
    Walking,
    /// Withdrawn into the shell; expires after the linger window.
    Shell { ticks_left: u32 },
}

pub(crate) struct Koopa {
    col: f32,
    row: f32,
    direction: WalkDirection,
    state: KoopaState,
    alive: bool,
}

impl Koopa {
    pub(crate) fn new(col: f32, row: f32) -> Self {
        Self {
            col,
            row,
            direction: WalkDirection::Left,
            state: KoopaState::Walking,
            alive: true,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn stomp(&mut self) {
        if matches!(self.state, KoopaState::Walking) {
            self.state = KoopaState::Shell {
                ticks_left: KOOPA_SHELL_LINGER_TICKS,
            };
        }
    }
}

impl Entity for Koopa {
    fn update(&mut self, ctx: &mut EntityCtx<'_>) {
        let key = match self.state {
            KoopaState::Walking => {
                let (col, direction) = step_patrol(
                    ctx.grid,
                    self.col,
                    self.row,
                    self.direction,
                    KOOPA_SPEED_COLS_PER_TICK,
                );
                self.col = col;
                self.direction = direction;
                KOOPA_SPRITE
            }
            KoopaState::Shell { ticks_left } => {
                if ticks_left == 0 {
                    self.alive = false;
                } else {
                    self.state = KoopaState::Shell {
                        ticks_left: ticks_left - 1,
                    };
                }
                KOOPA_SHELL_SPRITE
            }
        };
        let (x_px, y_px) = tile_to_screen_px(ctx.camera, self.col, self.row);
        ctx.surface.blit_sprite(key, x_px, y_px);
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

pub(crate) struct RedMushroom {
    col: f32,
    row: f32,
    direction: WalkDirection,
    alive: bool,
}

impl RedMushroom {
    pub(crate) fn new(col: f32, row: f32) -> Self {
        Self {
            col,
            row,
            direction: WalkDirection::Right,
            alive: true,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn collect(&mut self) {
        self.alive = false;
    }
}

impl Entity for RedMushroom {
    fn update(&mut self, ctx: &mut EntityCtx<'_>) {
        let (col, direction) = step_patrol(
            ctx.grid,
            self.col,
            self.row,
            self.direction,
            MUSHROOM_SPEED_COLS_PER_TICK,
        );
        self.col = col;
        self.direction = direction;
        let (x_px, y_px) = tile_to_screen_px(ctx.camera, self.col, self.row);
        ctx.surface.blit_sprite(RED_MUSHROOM_SPRITE, x_px, y_px);
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
