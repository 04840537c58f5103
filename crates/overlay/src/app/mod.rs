mod effects;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use effects::{RevertTimer, ScreenEffects, DAMAGE_FLASH_COLOR};
pub use input::HostInputSnapshot;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::Renderer;
pub use scene::{HostScene, HostView, Marker, SceneCommand, SceneKey};
