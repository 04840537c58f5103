pub mod app;
pub mod chat;
pub mod config;

pub use app::{
    run_app, AppError, HostInputSnapshot, HostScene, HostView, LoopConfig, LoopMetricsSnapshot,
    Marker, Renderer, RevertTimer, SceneCommand, SceneKey, ScreenEffects, DAMAGE_FLASH_COLOR,
};
pub use chat::{
    ChatOverlay, ChatVisibility, IndexSource, InputField, MessageKind, SlotPool, SlotRecord,
    ThreadRngIndexSource, CLOSED_PLACEHOLDER, OPEN_PLACEHOLDER,
};
pub use config::{
    load_chat_config, resolve_config_path, ChatConfig, ChatConfigError, ConfigError,
    CONFIG_PATH_ENV_VAR, DEFAULT_CONFIG_PATH,
};
