/// Everything an entity may touch during its once-per-frame update: the
/// read-only camera and grid, the draw surface, and the queue for spawns
/// that join the registry on the next pass.
pub(crate) struct EntityCtx<'a> {
    pub(crate) camera: &'a SideCamera,
    pub(crate) surface: &'a mut dyn Surface,
    pub(crate) grid: &'a TileGrid,
    spawns: &'a mut Vec<Box<dyn Entity>>,
}

impl EntityCtx<'_> {
    pub(crate) fn spawn_next_pass(&mut self, entity: Box<dyn Entity>) {
        self.spawns.push(entity);
    }
}

/// Uniform per-entity contract: one update (which also draws) per frame,
/// plus an aliveness flag the registry polls after each update.
pub(crate) trait Entity {
    fn update(&mut self, ctx: &mut EntityCtx<'_>);
    fn is_alive(&self) -> bool;
}

/// Ordered, mutation-safe entity collection. Update and render order follow
/// spawn order; removal never happens mid-iteration.
#[derive(Default)]
pub(crate) struct EntityRegistry {
    entities: Vec<Box<dyn Entity>>,
    queued_spawns: Vec<Box<dyn Entity>>,
    dead_this_pass: Vec<usize>,
}

impl EntityRegistry {
    pub(crate) fn spawn(&mut self, entity: Box<dyn Entity>) {
        self.entities.push(entity);
    }

    pub(crate) fn len(&self) -> usize {
        self.entities.len()
    }

    /// Updates every entity exactly once, in spawn order. Deaths observed
    /// during the pass are only recorded here; `remove_dead` applies them
    /// so the collection is never mutated while it is being walked.
    pub(crate) fn update_all(
        &mut self,
        camera: &SideCamera,
        surface: &mut dyn Surface,
        grid: &TileGrid,
    ) {
        let Self {
            entities,
            queued_spawns,
            dead_this_pass,
        } = self;
        dead_this_pass.clear();
        for (index, entity) in entities.iter_mut().enumerate() {
            let mut ctx = EntityCtx {
                camera,
                surface,
                grid,
                spawns: queued_spawns,
            };
            entity.update(&mut ctx);
            if !entity.is_alive() {
                dead_this_pass.push(index);
            }
        }
    }

    /// Evicts the entities observed dead by the last pass (each exactly
    /// once, survivors keep their relative order) and admits the spawns
    /// queued during that pass for the next one.
    pub(crate) fn remove_dead(&mut self) -> usize {
        let removed = self.dead_this_pass.len();
        for index in self.dead_this_pass.drain(..).rev() {
            self.entities.remove(index);
        }
        self.entities.append(&mut self.queued_spawns);
        removed
    }
}
