// SPDX-License-Identifier: GPL-3.0

//! Persistent user settings.
//!
//! A flat JSON object whose keys are `Group/key` paths. Reads and writes
//! happen on the GUI thread; the file is rewritten atomically on `sync`
//! and when the store is dropped.

use crate::constants::{SETTINGS_FILENAME, XDG_PREFIX};
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct Settings {
    path: Option<PathBuf>,
    values: BTreeMap<String, Value>,
    group: Option<String>,
    dirty: bool,
}

impl Settings {
    /// Open the user's settings file, falling back to an in-memory store.
    pub fn load() -> Self {
        let dirs = xdg::BaseDirectories::with_prefix(XDG_PREFIX);
        match dirs.place_config_file(SETTINGS_FILENAME) {
            Ok(path) => match Self::open(&path) {
                Ok(settings) => settings,
                Err(err) => {
                    log::warn!("errors loading settings {}: {err:#}", path.display());
                    Self::empty_at(path)
                }
            },
            Err(err) => {
                log::error!("failed to locate settings file: {err}");
                Self::in_memory()
            }
        }
    }

    /// Open a settings file at `path`. A missing file yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: Some(path),
            values,
            group: None,
            dirty: false,
        })
    }

    /// An empty store that replaces whatever is at `path` on the next sync.
    fn empty_at(path: PathBuf) -> Self {
        let mut settings = Self::default();
        settings.path = Some(path);
        settings
    }

    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn begin_group(&mut self, name: &str) {
        if let Some(current) = &self.group {
            log::warn!("settings group {current:?} still open while entering {name:?}");
        }
        self.group = Some(name.to_string());
    }

    pub fn end_group(&mut self) {
        if self.group.take().is_none() {
            log::warn!("end_group called without an open settings group");
        }
    }

    fn full_key(&self, key: &str) -> String {
        match &self.group {
            Some(group) => format!("{group}/{key}"),
            None => key.to_string(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(&self.full_key(key))
    }

    /// Raw JSON value stored under `key`.
    pub fn raw_value(&self, key: &str) -> Option<&Value> {
        self.values.get(&self.full_key(key))
    }

    /// Typed read. Absent keys and values of the wrong type yield `default`.
    pub fn value<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let full_key = self.full_key(key);
        match self.values.get(&full_key) {
            Some(value) => match T::deserialize(value) {
                Ok(v) => v,
                Err(err) => {
                    log::warn!("ignoring setting {full_key:?}: {err}");
                    default
                }
            },
            None => default,
        }
    }

    pub fn set_value<T: Serialize>(&mut self, key: &str, value: T) {
        let full_key = self.full_key(key);
        match serde_json::to_value(value) {
            Ok(value) => {
                if self.values.get(&full_key) != Some(&value) {
                    self.values.insert(full_key, value);
                    self.dirty = true;
                }
            }
            Err(err) => log::warn!("failed to save setting {full_key:?}: {err}"),
        }
    }

    pub fn remove(&mut self, key: &str) {
        if self.values.remove(&self.full_key(key)).is_some() {
            self.dirty = true;
        }
    }

    /// Write pending changes to disk.
    pub fn sync(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let Some(path) = &self.path else {
            self.dirty = false;
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp_path)
                .with_context(|| format!("creating {}", tmp_path.display()))?;
            serde_json::to_writer_pretty(&mut file, &self.values)?;
            file.flush()?;
        }
        fs::rename(&tmp_path, path).with_context(|| format!("replacing {}", path.display()))?;

        self.dirty = false;
        Ok(())
    }
}

impl Drop for Settings {
    fn drop(&mut self) {
        if let Err(err) = self.sync() {
            log::error!("failed to save settings: {err:#}");
        }
    }
}
