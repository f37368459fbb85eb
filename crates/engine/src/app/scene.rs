use super::rendering::Surface;
use super::InputSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    /// The scene wants a fresh run of its world; the loop calls `load`
    /// again and keeps ticking.
    Restart,
    Quit,
}

/// A scene is stepped exactly once per rendered frame. `tick` is the loop's
/// monotonically increasing frame counter; it keeps counting across
/// restarts.
pub trait Scene {
    fn load(&mut self);
    fn frame(
        &mut self,
        tick: u64,
        input: &InputSnapshot,
        surface: &mut dyn Surface,
    ) -> SceneCommand;
    fn debug_title(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingScene {
        loads: u32,
    }

    impl Scene for CountingScene {
        fn load(&mut self) {
            self.loads += 1;
        }

        fn frame(
            &mut self,
            _tick: u64,
            _input: &InputSnapshot,
            _surface: &mut dyn Surface,
        ) -> SceneCommand {
            SceneCommand::None
        }
    }

    #[test]
    fn debug_title_defaults_to_none() {
        let mut scene = CountingScene::default();
        scene.load();
        assert_eq!(scene.loads, 1);
        assert!(scene.debug_title().is_none());
    }
}
