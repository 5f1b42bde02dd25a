use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use ringdial::SliderSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_SIZE: i32 = 400;

fn default_size() -> i32 {
    DEFAULT_SIZE
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_size")]
    pub width: i32,
    #[serde(default = "default_size")]
    pub height: i32,
    #[serde(default)]
    pub sliders: Vec<SliderSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            sliders: Vec::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "ringdial", "ringdial").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("RINGDIAL"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_toml(text: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(text, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// The config shipped with the binary.
pub fn builtin_config() -> Config {
    parse_toml(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!("Built-in config is broken: {}", e);
        Config::default()
    })
}

pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Failed to write default config: {}", e),
        }
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using built-in defaults: {}", e);
            builtin_config()
        }
    }
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Whether `event` rewrote, created or removed the file at `path`.
fn touches(event: &notify::Event, path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == path)
}

async fn watch_config(tx: Sender<AppEvent>) -> Result<(), ConfigError> {
    let config_path = get_config_path()?;
    let config_dir = config_path
        .parent()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .to_path_buf();
    fs_err::create_dir_all(&config_dir)?;

    // notify calls back on its own thread
    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(&config_dir, RecursiveMode::NonRecursive)?;
    log::debug!("Watching {}", config_dir.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if touches(&event, &config_path) => {
                log::debug!("Config file changed ({:?})", event.kind);
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
    Ok(())
}

/// Sends [`AppEvent::ConfigReload`] whenever the config file changes, until the receiver
/// goes away.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_config(tx).await {
        log::error!("Config watcher stopped: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_is_valid() {
        let config = parse_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.width, 520);
        assert_eq!(config.sliders.len(), 4);
        for spec in &config.sliders {
            assert!(spec.validate().is_ok(), "{spec:?}");
        }
        assert_eq!(config.sliders[2].color.as_str(), "gold");
    }

    #[test]
    fn test_slider_fields() {
        let config = parse_toml(
            r##"
            [[sliders]]
            color = "#123456"
            min = 10.0
            max = 20.0
            step = 2.0
            radius = 40.0
            start_angle = 0.0
            "##,
        )
        .unwrap();

        assert_eq!(config.width, DEFAULT_SIZE);
        let spec = &config.sliders[0];
        assert_eq!(spec.start_angle, 0.0);
        assert_eq!(spec.validate().map(|r| r.step_count()).ok(), Some(5));
    }

    #[test]
    fn test_bad_color_is_a_config_error() {
        let result = parse_toml(
            r#"
            [[sliders]]
            color = "ultraviolet"
            min = 0.0
            max = 1.0
            step = 1.0
            radius = 40.0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Config(_))));
    }

    #[test]
    fn test_watcher_filters_other_files() {
        use notify::event::{AccessKind, ModifyKind};

        let path = PathBuf::from("/tmp/ringdial/config.toml");
        let modify = notify::Event::new(EventKind::Modify(ModifyKind::Any));
        assert!(touches(&modify.clone().add_path(path.clone()), &path));
        assert!(!touches(
            &modify.add_path(PathBuf::from("/tmp/ringdial/config.toml.swp")),
            &path
        ));

        let access = notify::Event::new(EventKind::Access(AccessKind::Any)).add_path(path.clone());
        assert!(!touches(&access, &path));
    }

    #[test]
    fn test_json_defaults() {
        let config: Config = serde_json::from_str(r#"{"sliders": []}"#).unwrap();
        assert_eq!((config.width, config.height), (DEFAULT_SIZE, DEFAULT_SIZE));
        assert!(config.sliders.is_empty());
    }
}
