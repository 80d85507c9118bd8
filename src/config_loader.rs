use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_VOICE_ID: &str = "en-UK-Hazel";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    /// Voice sent when the picker holds no usable id.
    pub default_voice_id: String,
    // Optional synthesis parameters, forwarded only when set
    pub audio_format: Option<String>,
    pub voice_style: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_voice_id: DEFAULT_VOICE_ID.to_string(),
            audio_format: None,
            voice_style: None,
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?
            // Merge with local config file (if exists)
            .add_source(File::with_name("RecipeNarrator").required(false));

        if let Some(dir) = dirs::config_dir() {
            let user_file = dir.join("recipe-narrator").join("RecipeNarrator");
            builder = builder.add_source(
                File::with_name(&user_file.to_string_lossy()).required(false),
            );
        }

        // Merge with environment variables (e.g. RECIPE_NARRATOR_BASE_URL)
        let settings: Settings = builder
            .add_source(config::Environment::with_prefix("RECIPE_NARRATOR"))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads defaults overlaid with a single explicit file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = Self::defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("default_voice_id", DEFAULT_VOICE_ID)?
            .set_default("request_timeout_secs", 30)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Message("base_url must not be empty".to_string()));
        }
        if self.default_voice_id.trim().is_empty() {
            return Err(ConfigError::Message(
                "default_voice_id must not be empty".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
