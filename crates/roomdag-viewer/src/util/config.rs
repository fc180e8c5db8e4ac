use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::graph::layout;

pub const SAMPLE_ROOM_ID: &str = "!cURbafjkfsMDVwdRDQ:matrix.org";

/// Persisted viewer preferences (toml under the platform config dir).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub base_url: String,
    pub default_room_id: String,
    pub show_edges: bool,
    pub row_spacing: f32,
    pub col_spacing: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:12345".to_string(),
            default_room_id: SAMPLE_ROOM_ID.to_string(),
            show_edges: true,
            row_spacing: layout::ROW_SPACING,
            col_spacing: layout::COL_SPACING,
        }
    }
}

/// The request the viewer was started with, fixed once at startup from
/// config defaults plus CLI flags. The panel's form issues further
/// fetches but never mutates this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub base_url: String,
    pub room_id: String,
    pub max_stream: Option<u64>,
}

impl RequestConfig {
    pub fn from_viewer_config(cfg: &ViewerConfig) -> Self {
        Self {
            base_url: cfg.base_url.clone(),
            room_id: cfg.default_room_id.clone(),
            max_stream: None,
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "roomdag")?;
    Some(proj.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> ViewerConfig {
    let Some(path) = config_file_path() else {
        return ViewerConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> ViewerConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return ViewerConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|_| ViewerConfig::default())
}

pub fn save(cfg: &ViewerConfig) -> anyhow::Result<()> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)
}

fn save_to_path(cfg: &ViewerConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize viewer config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write viewer config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn viewer_config_roundtrip_save_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        let cfg = ViewerConfig {
            default_room_id: "!other:example.org".to_string(),
            ..ViewerConfig::default()
        };

        save_to_path(&cfg, &path).expect("save config");
        let loaded = load_or_default_from_path(&path);

        assert_eq!(cfg, loaded);
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        fs::write(&path, "not = [valid").expect("write garbage");

        assert_eq!(load_or_default_from_path(&path), ViewerConfig::default());
    }

    #[test]
    fn partial_config_fills_missing_fields() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        fs::write(&path, "base_url = \"http://dbg.example.org:9999\"\n").expect("write partial");

        let loaded = load_or_default_from_path(&path);
        assert_eq!(loaded.base_url, "http://dbg.example.org:9999");
        assert_eq!(loaded.default_room_id, SAMPLE_ROOM_ID);
        assert!(loaded.show_edges);
    }
}
