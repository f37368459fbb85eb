use engine::{resolve_app_paths, LoopConfig, Scene};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::platformer;

const LEVEL_FILE: &str = "levels/level_1_1.json";
const QUIZ_FILE: &str = "quiz/questions.json";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> Result<AppWiring, String> {
    init_tracing();
    info!("=== Sidequest Startup ===");

    let paths = resolve_app_paths().map_err(|error| error.to_string())?;
    let level_path = paths.assets_dir.join(LEVEL_FILE);
    let quiz_path = paths.assets_dir.join(QUIZ_FILE);
    let document = platformer::load_level_document(&level_path)?;
    let bank = platformer::load_quiz_bank(&quiz_path)?;
    info!(
        level = %level_path.display(),
        level_length = document.length(),
        questions = bank.len(),
        "content_loaded"
    );

    let scene = Box::new(platformer::PlatformerScene::new(document, bank));
    Ok(AppWiring {
        config: LoopConfig {
            window_title: "Sidequest".to_string(),
            ..LoopConfig::default()
        },
        scene,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
