//! Local game data
//!
//! Champion and item files are kept on disk per game version:
//!
//! ```text
//! <root>/metadata.json                    {"version": "14.1.1"}
//! <root>/versions/<version>/champion.json
//! <root>/versions/<version>/item.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::backend::ItemSource;
use crate::champion::{Champion, ChampionData};
use crate::item::{Item, ItemData};

const METADATA_FILENAME: &str = "metadata.json";
const CHAMPION_FILENAME: &str = "champion.json";
const ITEM_FILENAME: &str = "item.json";

/// What the data directory currently holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStatus {
    pub current_version: Option<String>,
}

impl DataStatus {
    pub fn has_data(&self) -> bool {
        self.current_version.is_some()
    }
}

/// Check that `version` is usable as a single directory name.
///
/// Accepts ASCII letters, digits, `.`, `-` and `_`, starting with a letter
/// or digit, and never `..`.
pub fn validate_version(version: &str) -> Result<()> {
    if version.is_empty() {
        bail!("Data version must not be empty");
    }
    let valid_chars = version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    let valid_start = version.starts_with(|c: char| c.is_ascii_alphanumeric());
    if !valid_chars || !valid_start || version.contains("..") {
        bail!("Invalid data version: {:?}", version);
    }
    Ok(())
}

/// Champion and item source backed by a local data directory
#[derive(Debug, Clone)]
pub struct LocalDataSource {
    root: PathBuf,
}

impl LocalDataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn version_dir(&self, version: &str) -> Result<PathBuf> {
        validate_version(version)?;
        Ok(self.root.join("versions").join(version))
    }

    /// Version recorded in the metadata file, if any
    pub fn local_version(&self) -> Result<Option<String>> {
        let path = self.root.join(METADATA_FILENAME);
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path).context("Failed to read data metadata")?;
        let metadata: serde_json::Value =
            serde_json::from_str(&data).context("Failed to parse data metadata")?;
        Ok(metadata["version"].as_str().map(str::to_string))
    }

    pub fn status(&self) -> Result<DataStatus> {
        Ok(DataStatus {
            current_version: self.local_version()?,
        })
    }

    fn read_current<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        let version = self
            .local_version()?
            .context("No local data found. Please import champion data first.")?;
        let path = self.version_dir(&version)?.join(filename);
        if !path.exists() {
            bail!("No {} for version {}", filename, version);
        }

        debug!("Loading {}", path.display());
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("Failed to parse {}", filename))
    }

    /// Champion file of the recorded version
    pub fn load_champions(&self) -> Result<ChampionData> {
        self.read_current(CHAMPION_FILENAME)
    }

    /// Item file of the recorded version
    pub fn load_items(&self) -> Result<ItemData> {
        self.read_current(ITEM_FILENAME)
    }

    /// Copy a `champion.json` (and optionally an `item.json`) into the data
    /// directory and make that version current.
    ///
    /// Every file is parsed and the version checked before anything is
    /// written, so a broken download never replaces good data. The version
    /// defaults to the one inside the champion file.
    pub fn import(
        &self,
        champions: &Path,
        items: Option<&Path>,
        version: Option<&str>,
    ) -> Result<DataStatus> {
        let (champion_raw, champion_data) = read_validated::<ChampionData>(champions)
            .context("File is not valid champion data")?;
        let item_file = match items {
            Some(path) => Some(
                read_validated::<ItemData>(path).context("File is not valid item data")?,
            ),
            None => None,
        };

        let version = version.unwrap_or(champion_data.version.as_str()).to_string();
        let dir = self.version_dir(&version)?;

        if let Some((_, ref item_data)) = item_file {
            if item_data.version != champion_data.version {
                warn!(
                    "Item data is version {}, champion data is version {}",
                    item_data.version, champion_data.version
                );
            }
        }

        fs::create_dir_all(&dir).context("Failed to create version directory")?;
        fs::write(dir.join(CHAMPION_FILENAME), &champion_raw)
            .context("Failed to write champion data")?;
        if let Some((ref item_raw, ref item_data)) = item_file {
            fs::write(dir.join(ITEM_FILENAME), item_raw).context("Failed to write item data")?;
            info!("Imported {} items", item_data.data.len());
        }

        let metadata = serde_json::json!({ "version": version });
        let metadata = serde_json::to_string_pretty(&metadata)
            .context("Failed to serialize data metadata")?;
        fs::write(self.root.join(METADATA_FILENAME), metadata)
            .context("Failed to write data metadata")?;

        info!(
            "Imported {} champions for version {}",
            champion_data.data.len(),
            version
        );
        Ok(DataStatus {
            current_version: Some(version),
        })
    }
}

fn read_validated<T: DeserializeOwned>(path: &Path) -> Result<(String, T)> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed = serde_json::from_str(&raw)?;
    Ok((raw, parsed))
}

impl ItemSource<Champion> for LocalDataSource {
    fn fetch_all(&self) -> Result<Vec<Champion>> {
        Ok(self.load_champions()?.data.into_values().collect())
    }
}

impl ItemSource<Item> for LocalDataSource {
    fn fetch_all(&self) -> Result<Vec<Item>> {
        Ok(self.load_items()?.into_items())
    }
}
