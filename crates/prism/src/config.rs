use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use turnstile::item::MediaSource;
use turnstile::{CarouselConfig, CarouselItem};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub items: Vec<CarouselItem>,
}

impl Config {
    /// Makes relative media paths relative to `base` instead of the working directory.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        for item in &mut self.items {
            item.src = resolve_source(&item.src, base);
            item.poster = item.poster.as_ref().map(|p| resolve_source(p, base));
        }
        self
    }
}

fn resolve_source(source: &MediaSource, base: &Path) -> MediaSource {
    let path = Path::new(source.as_str());
    if source.contains("://") || path.is_absolute() || source.is_empty() {
        return source.clone();
    }
    MediaSource::new(base.join(path).to_string_lossy())
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "turnstile", "prism").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn finish(config: Config, base: Option<&Path>) -> Config {
    let config = Config {
        carousel: config.carousel.sanitized(),
        ..config
    };
    match base {
        Some(base) => config.resolve_paths(base),
        None => config,
    }
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path.clone()).required(false))
        .add_source(turnstile::config::env_overrides("PRISM"))
        .build()?;

    Ok(finish(s.try_deserialize()?, config_path.parent()))
}

pub fn parse_config(source: &str, base: Option<&Path>) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(source, config::FileFormat::Toml))
        .build()?;
    Ok(finish(s.try_deserialize()?, base))
}

pub fn default_config() -> Config {
    let base = get_config_path().ok();
    parse_config(DEFAULT_CONFIG, base.as_deref().and_then(Path::parent)).unwrap_or_else(|e| {
        log::error!("Built-in config is invalid: {}", e);
        Config::default()
    })
}

pub fn load_or_default() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        log::info!("No config at {}, using built-in defaults", path.display());
        return default_config();
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            default_config()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
