// Fishing tuning loaded from RON (assets/config/fishing.ron) with CLI overrides.
use bevy::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
use std::path::Path;

use crate::fishing::config::FishingConfig;

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/fishing.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("failed to parse fishing config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FishingSettings(pub FishingConfig);

pub struct SettingsPlugin {
    pub path: String,
    pub seed_override: Option<u64>,
}
impl Default for SettingsPlugin {
    fn default() -> Self {
        Self { path: DEFAULT_CONFIG_PATH.to_string(), seed_override: None }
    }
}

#[derive(Resource, Clone)]
pub(crate) struct SettingsSource {
    path: String,
    seed_override: Option<u64>,
}

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SettingsSource { path: self.path.clone(), seed_override: self.seed_override })
            .add_systems(Startup, load_settings);
    }
}

pub fn parse_config(data: &str) -> Result<FishingConfig, ConfigError> {
    Ok(ron::from_str::<FishingConfig>(data)?)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config(path: impl AsRef<Path>) -> Result<FishingConfig, ConfigError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
    parse_config(&data)
}

#[cfg(target_arch = "wasm32")]
pub fn load_config(_path: impl AsRef<Path>) -> Result<FishingConfig, ConfigError> {
    // No filesystem in the browser; the config is embedded at compile time.
    parse_config(include_str!("../../assets/config/fishing.ron"))
}

pub(crate) fn load_settings(
    mut commands: Commands,
    source: Res<SettingsSource>,
    existing: Option<Res<FishingSettings>>,
) {
    // pre-inserted settings (tests, tools) win over the file
    let mut cfg = match existing {
        Some(settings) => settings.0,
        None => match load_config(&source.path) {
            Ok(cfg) => {
                info!("CONFIG loaded {}", source.path);
                cfg
            }
            Err(e) => {
                error!("{e}; using built-in fishing defaults");
                FishingConfig::default()
            }
        },
    };
    if let Some(seed) = source.seed_override {
        if let Some(file_seed) = cfg.rng_seed.filter(|s| *s != seed) {
            warn!("--seed {seed} overrides config seed {file_seed}");
        }
        cfg.rng_seed = Some(seed);
    }
    commands.insert_resource(FishingSettings(cfg));
}
