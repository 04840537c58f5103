use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

pub const CONFIG_PATH_ENV_VAR: &str = "CHATTERBOX_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "assets/chat.json";

const DEFAULT_MESSAGE_SPACING_PX: i32 = 8;
const DEFAULT_SLOT_HEIGHT_PX: i32 = 21;
const DEFAULT_MAX_MESSAGES: usize = 10;
const DEFAULT_IDLE_HIDE_SECONDS: f32 = 5.0;

/// Immutable chat tuning, fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    pub message_spacing_px: i32,
    pub slot_height_px: i32,
    pub max_messages: usize,
    pub idle_hide_seconds: f32,
    pub pool_capacity: usize,
    pub reply_script: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            message_spacing_px: DEFAULT_MESSAGE_SPACING_PX,
            slot_height_px: DEFAULT_SLOT_HEIGHT_PX,
            max_messages: DEFAULT_MAX_MESSAGES,
            idle_hide_seconds: DEFAULT_IDLE_HIDE_SECONDS,
            // One spare slot keeps steady-state eviction off the growth path.
            pool_capacity: DEFAULT_MAX_MESSAGES + 1,
            reply_script: Vec::new(),
        }
    }
}

impl ChatConfig {
    /// Falls back to the default threshold when the configured value is
    /// unusable, so a hand-built config cannot panic the timer math.
    pub fn idle_hide(&self) -> Duration {
        Duration::try_from_secs_f32(self.idle_hide_seconds)
            .unwrap_or(Duration::from_millis((DEFAULT_IDLE_HIDE_SECONDS * 1000.0) as u64))
    }

    /// Vertical distance between consecutive log entries.
    pub fn shift_px(&self) -> i32 {
        self.slot_height_px + self.message_spacing_px
    }

    pub fn validate(&self) -> Result<(), ChatConfigError> {
        if self.max_messages == 0 {
            return Err(ChatConfigError::ZeroMaxMessages);
        }
        if !self.idle_hide_seconds.is_finite() || self.idle_hide_seconds <= 0.0 {
            return Err(ChatConfigError::InvalidIdleHide {
                seconds: self.idle_hide_seconds,
            });
        }
        if self.slot_height_px <= 0 {
            return Err(ChatConfigError::NonPositiveSlotHeight {
                pixels: self.slot_height_px,
            });
        }
        if self.message_spacing_px < 0 {
            return Err(ChatConfigError::NegativeSpacing {
                pixels: self.message_spacing_px,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ChatConfigError {
    #[error("max_messages must be at least 1")]
    ZeroMaxMessages,
    #[error("idle_hide_seconds must be a positive finite number, got {seconds}")]
    InvalidIdleHide { seconds: f32 },
    #[error("slot_height_px must be positive, got {pixels}")]
    NonPositiveSlotHeight { pixels: i32 },
    #[error("message_spacing_px must not be negative, got {pixels}")]
    NegativeSpacing { pixels: i32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read chat config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse chat config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_path_to_error::Error<serde_json::Error>,
    },
    #[error(transparent)]
    Invalid(#[from] ChatConfigError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChatConfigFile {
    #[serde(default = "default_message_spacing_px")]
    message_spacing_px: i32,
    #[serde(default = "default_slot_height_px")]
    slot_height_px: i32,
    #[serde(default = "default_max_messages")]
    max_messages: usize,
    #[serde(default = "default_idle_hide_seconds")]
    idle_hide_seconds: f32,
    #[serde(default)]
    pool_capacity: Option<usize>,
    #[serde(default)]
    reply_script: Vec<String>,
}

fn default_message_spacing_px() -> i32 {
    DEFAULT_MESSAGE_SPACING_PX
}

fn default_slot_height_px() -> i32 {
    DEFAULT_SLOT_HEIGHT_PX
}

fn default_max_messages() -> usize {
    DEFAULT_MAX_MESSAGES
}

fn default_idle_hide_seconds() -> f32 {
    DEFAULT_IDLE_HIDE_SECONDS
}

impl ChatConfigFile {
    fn into_config(self) -> ChatConfig {
        let pool_capacity = self
            .pool_capacity
            .unwrap_or(self.max_messages.saturating_add(1));
        ChatConfig {
            message_spacing_px: self.message_spacing_px,
            slot_height_px: self.slot_height_px,
            max_messages: self.max_messages,
            idle_hide_seconds: self.idle_hide_seconds,
            pool_capacity,
            reply_script: self.reply_script,
        }
    }
}

pub fn resolve_config_path() -> PathBuf {
    match env::var_os(CONFIG_PATH_ENV_VAR) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_CONFIG_PATH),
    }
}

/// Loads the chat config, treating a missing file as a degraded-but-valid
/// startup (defaults, no reply script). A present-but-broken file is a
/// hard error.
pub fn load_chat_config(path: &Path) -> Result<ChatConfig, ConfigError> {
    if !path.exists() {
        warn!(path = %path.display(), "chat config missing; using defaults");
        return Ok(ChatConfig::default());
    }

    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let file: ChatConfigFile =
        serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

    let config = file.into_config();
    config.validate()?;
    info!(
        path = %path.display(),
        max_messages = config.max_messages,
        idle_hide_seconds = config.idle_hide_seconds,
        reply_lines = config.reply_script.len(),
        "chat_config_loaded"
    );
    Ok(config)
}
