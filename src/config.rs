//! Configuration of default store geometry and header markers.
//!
//! Geometry flags on the command line always win; the config file and
//! `LEASEDUMP_`-prefixed environment variables supply defaults for the
//! common case of one storage pool with one sector size. Marker overrides
//! exist for forks of the lease format that renumber their magics.

use std::{
   fs,
   path::{Path, PathBuf},
   sync::OnceLock,
};

use directories::BaseDirs;
use figment::{
   Figment,
   providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::{
   layout::HeaderLayout,
   scan::{ALIGNMENT_1M, SECTOR_SIZE_512},
};

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Application configuration loaded from config file and environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
   /// Default sector size when `--block-size` is not given.
   pub block_size: u64,

   /// Default slot stride when `--align` is not given.
   pub alignment: u64,

   pub lockspace_magic:   Option<u32>,
   pub lockspace_version: Option<u32>,
   pub resource_magic:    Option<u32>,
   pub resource_version:  Option<u32>,
}

impl Default for Config {
   fn default() -> Self {
      Self {
         block_size: SECTOR_SIZE_512,
         alignment: ALIGNMENT_1M,
         lockspace_magic: None,
         lockspace_version: None,
         resource_magic: None,
         resource_version: None,
      }
   }
}

impl Config {
   pub fn load() -> Self {
      let config_path = ensure_global_config();

      Figment::from(Serialized::defaults(Self::default()))
         .merge(Toml::file(config_path))
         .merge(Env::prefixed("LEASEDUMP_").lowercase(true))
         .extract()
         .inspect_err(|e| tracing::warn!("failed to parse config: {e}"))
         .unwrap_or_default()
   }

   fn create_default_config(path: &Path) {
      if let Some(parent) = path.parent() {
         let _ = fs::create_dir_all(parent);
      }
      let default_config = Self::default();
      if let Ok(toml) = toml::to_string_pretty(&default_config) {
         let _ = fs::write(path, toml);
      }
   }

   /// Lockspace-store layout with any configured marker overrides applied.
   pub fn lockspace_layout(&self) -> HeaderLayout {
      HeaderLayout::lockspace().with_marker(self.lockspace_magic, self.lockspace_version)
   }

   /// Resource-store layout with any configured marker overrides applied.
   pub fn resource_layout(&self) -> HeaderLayout {
      HeaderLayout::resource().with_marker(self.resource_magic, self.resource_version)
   }
}

/// Returns the global configuration instance
pub fn get() -> &'static Config {
   CONFIG.get_or_init(Config::load)
}

/// Returns the base directory for leasedump configuration
pub fn base_dir() -> &'static PathBuf {
   static ONCE: OnceLock<PathBuf> = OnceLock::new();
   ONCE.get_or_init(|| resolve_base_dir(".leasedump"))
}

pub fn config_file_path() -> &'static PathBuf {
   static ONCE: OnceLock<PathBuf> = OnceLock::new();
   ONCE.get_or_init(|| base_dir().join("config.toml"))
}

fn ensure_global_config() -> PathBuf {
   let config_path = config_file_path();
   if !config_path.exists() {
      Config::create_default_config(config_path);
   }
   config_path.to_path_buf()
}

fn resolve_base_dir(dir_name: &str) -> PathBuf {
   BaseDirs::new()
      .map(|d| d.home_dir().join(dir_name))
      .or_else(|| {
         std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join(dir_name))
      })
      .unwrap_or_else(|| {
         std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(dir_name)
      })
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::layout::{LOCKSPACE_MAGIC, RESOURCE_VERSION};

   #[test]
   fn default_layouts_match_the_presets() {
      let config = Config::default();
      assert_eq!(config.lockspace_layout(), HeaderLayout::lockspace());
      assert_eq!(config.resource_layout(), HeaderLayout::resource());
   }

   #[test]
   fn marker_overrides_reach_the_layouts() {
      let config = Config {
         resource_magic: Some(0x4242_4242),
         ..Config::default()
      };
      let layout = config.resource_layout();
      assert_eq!(layout.magic, 0x4242_4242);
      assert_eq!(layout.version, RESOURCE_VERSION);
      assert_eq!(config.lockspace_layout().magic, LOCKSPACE_MAGIC);
   }
}
