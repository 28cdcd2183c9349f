//! On-disk layout: one app directory holding the storage file, its lock,
//! and `config.toml`.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "countdown-timers";
const APP_DIR: &str = ".countdown-timers";
const LOCK_FILE: &str = "storage.lock";
const STORAGE_FILE: &str = "storage.json";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    dir: PathBuf,
}

impl AppPaths {
    pub fn at<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The override when given, else the first usable default location.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = override_dir {
            prepare(dir).with_context(|| {
                format!("storage.state_dir_override {} is not usable", dir.display())
            })?;
            return Ok(Self::at(dir));
        }

        first_usable(&candidates()).map(Self::at).context(
            "No writable location for timer storage. \
             Set storage.state_dir_override in config.",
        )
    }

    /// Where the config lives. Always under the home directory, so it can
    /// be found before storage overrides are known.
    pub fn home() -> Result<Self> {
        let home = home::home_dir().context("Could not find home directory")?;
        Ok(Self::at(home.join(APP_DIR)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn lock_file(&self) -> PathBuf {
        self.dir.join(LOCK_FILE)
    }

    pub fn storage_file(&self) -> PathBuf {
        self.dir.join(STORAGE_FILE)
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }
}

/// Default locations in preference order: `~/.countdown-timers`, the
/// platform data dir, then `./.countdown-timers`.
pub fn candidates() -> Vec<PathBuf> {
    let mut dirs = Vec::with_capacity(3);
    if let Some(home) = home::home_dir() {
        dirs.push(home.join(APP_DIR));
    }
    if let Some(data) = dirs::data_local_dir() {
        dirs.push(data.join(APP_NAME));
    }
    dirs.push(PathBuf::from(APP_DIR));
    dirs
}

pub fn first_usable(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .find(|dir| match prepare(dir) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Skipping {}: {:#}", dir.display(), err);
                false
            }
        })
        .cloned()
}

/// Create `dir` and open its lock file, which every command needs anyway.
fn prepare(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOCK_FILE))
        .with_context(|| format!("{} is not writable", dir.display()))?;
    Ok(())
}
