use tracing::error;

mod app;

fn main() {
    let wiring = match app::build_app() {
        Ok(wiring) => wiring,
        Err(message) => {
            error!(error = %message, "startup_failed");
            std::process::exit(1);
        }
    };
    if let Err(error) = engine::run_app(wiring.config, wiring.scene) {
        error!(error = %error, "app_failed");
        std::process::exit(1);
    }
}
