/// Row-major static tile grid, `[row][col]`. Built once per level load;
/// rectangular by construction and kept that way because cells are only
/// ever replaced, never added or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TileGrid {
    rows: Vec<Vec<Tile>>,
}

impl TileGrid {
    pub(crate) fn build(document: &LevelDocument) -> Self {
        let layers = &document.level.layers;
        let mut columns: Vec<Vec<Tile>> = Vec::new();
        for x in layers.sky.x.0..layers.sky.x.1 {
            let mut column: Vec<Tile> = Vec::new();
            for _y in layers.sky.y.0..layers.sky.y.1 {
                column.push(Tile::sprite_only(SKY_SPRITE));
            }
            for y in layers.ground.y.0..layers.ground.y.1 {
                column.push(Tile::solid(GROUND_SPRITE, tile_rect_px(x, y - 1)));
            }
            columns.push(column);
        }
        if columns.len() as u32 != document.length {
            warn!(
                declared = document.length,
                built = columns.len(),
                "level_width_mismatch"
            );
        }

        let mut grid = Self {
            rows: transpose_columns(columns),
        };
        grid.apply_objects(&document.level.objects);
        grid
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<Tile>>) -> Self {
        Self { rows }
    }

    pub(crate) fn width(&self) -> u32 {
        self.rows.first().map(Vec::len).unwrap_or(0) as u32
    }

    pub(crate) fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    #[cfg(test)]
    pub(crate) fn row_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(Vec::len)
    }

    /// `None` marks an index outside the grid; callers treat it as a
    /// boundary, never a failure.
    pub(crate) fn get(&self, row: i32, col: i32) -> Option<&Tile> {
        if row < 0 || col < 0 {
            return None;
        }
        self.rows
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
    }

    /// Replaces one cell. Out-of-bounds writes are dropped, not errors:
    /// decorative objects near level edges are expected to clip.
    pub(crate) fn place(&mut self, row: i32, col: i32, tile: Tile) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        match self
            .rows
            .get_mut(row as usize)
            .and_then(|cells| cells.get_mut(col as usize))
        {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }

    fn apply_objects(&mut self, objects: &ObjectSection) {
        for &(x, y) in &objects.bush {
            self.place_bush(x, y);
        }
        for &(x, y) in &objects.cloud {
            self.place_cloud(x, y);
        }
        for &(x, y, length) in &objects.pipe {
            self.place_pipe(x, y, length);
        }
        for &(x, y) in &objects.sky {
            self.place(y, x, Tile::sprite_only(SKY_SPRITE));
        }
        for &(x, y) in &objects.ground {
            self.place(y, x, Tile::solid(GROUND_SPRITE, tile_rect_px(x, y)));
        }
    }

    pub(crate) fn place_bush(&mut self, col: i32, row: i32) {
        for (offset, key) in BUSH_SPRITES.iter().enumerate() {
            self.place(row, col + offset as i32, Tile::sprite_only(key));
        }
    }

    pub(crate) fn place_cloud(&mut self, col: i32, row: i32) {
        for (row_offset, sprite_row) in CLOUD_SPRITE_GRID.iter().enumerate() {
            for (col_offset, key) in sprite_row.iter().enumerate() {
                self.place(
                    row + row_offset as i32,
                    col + col_offset as i32,
                    Tile::sprite_only(key),
                );
            }
        }
    }

    pub(crate) fn place_pipe(&mut self, col: i32, row: i32, length: i32) {
        self.place(
            row,
            col,
            Tile::solid(PIPE_HEAD_LEFT_SPRITE, tile_rect_px(col, row)),
        );
        self.place(
            row,
            col + 1,
            Tile::solid(PIPE_HEAD_RIGHT_SPRITE, tile_rect_px(col + 1, row)),
        );
        // TODO: the body runs length + 20 rows, which matches the shipped
        // level data but makes every pipe reach the bottom of the grid;
        // confirm whether shorter pipes were ever intended before
        // tightening this.
        for body_row in row + 1..row + length + 20 {
            self.place(
                body_row,
                col,
                Tile::solid(PIPE_BODY_LEFT_SPRITE, tile_rect_px(col, body_row)),
            );
            self.place(
                body_row,
                col + 1,
                Tile::solid(PIPE_BODY_RIGHT_SPRITE, tile_rect_px(col + 1, body_row)),
            );
        }
    }

    pub(crate) fn is_solid(&self, row: i32, col: i32) -> bool {
        self.get(row, col)
            .map(|tile| tile.collider().is_some())
            .unwrap_or(false)
    }
}

fn transpose_columns(columns: Vec<Vec<Tile>>) -> Vec<Vec<Tile>> {
    let height = columns.first().map(Vec::len).unwrap_or(0);
    let mut rows = Vec::with_capacity(height);
    for row_index in 0..height {
        rows.push(
            columns
                .iter()
                .map(|column| column[row_index])
                .collect::<Vec<_>>(),
        );
    }
    rows
}

fn tile_rect_px(col: i32, row: i32) -> RectPx {
    RectPx::new(
        col * TILE_SIZE_PX,
        row * TILE_SIZE_PX,
        TILE_SIZE_PX,
        TILE_SIZE_PX,
    )
}

/// Box-style entities anchor their cell's collider one pixel high so a rise
/// from below registers before overlap.
fn box_anchor_rect_px(col: i32, row: i32) -> RectPx {
    RectPx::new(
        col * TILE_SIZE_PX,
        row * TILE_SIZE_PX - 1,
        TILE_SIZE_PX,
        TILE_SIZE_PX,
    )
}
