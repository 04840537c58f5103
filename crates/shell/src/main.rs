use tracing::error;

mod bootstrap;
mod scenes;

fn main() {
    let wiring = match bootstrap::build_app() {
        Ok(wiring) => wiring,
        Err(build_error) => {
            eprintln!("startup failed: {build_error}");
            std::process::exit(1);
        }
    };

    if let Err(run_error) = overlay::run_app(wiring.config, wiring.scene_a, wiring.scene_b) {
        error!(error = %run_error, "app_failed");
        std::process::exit(1);
    }
}
