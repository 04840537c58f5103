use overlay::{load_chat_config, resolve_config_path, ConfigError, HostScene, LoopConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::scenes;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene_a: Box<dyn HostScene>,
    pub(crate) scene_b: Box<dyn HostScene>,
}

pub(crate) fn build_app() -> Result<AppWiring, ConfigError> {
    init_tracing();
    info!("=== Chatterbox Startup ===");

    let config_path = resolve_config_path();
    let chat = load_chat_config(&config_path)?;
    let (scene_a, scene_b) = scenes::build_scene_pair();
    let config = LoopConfig {
        chat,
        ..LoopConfig::default()
    };

    Ok(AppWiring {
        config,
        scene_a,
        scene_b,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
