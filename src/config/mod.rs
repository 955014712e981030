use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{errors::EngineError, utils};

const CONFIG_FILE: &str = "engine.json";
const TMP_SUFFIX: &str = "tmp";

/// Longest note kept on a ledger entry, in characters.
pub const DEFAULT_MAX_NOTE_CHARS: usize = 2047;

/// Range accepted for longitude input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LongitudeBounds {
    /// Longitude is checked against the latitude range [-90, 90].
    #[default]
    Legacy,
    /// Longitude is checked against [-180, 180].
    Conventional,
}

impl LongitudeBounds {
    pub fn limit(self) -> f64 {
        match self {
            LongitudeBounds::Legacy => 90.0,
            LongitudeBounds::Conventional => 180.0,
        }
    }

    pub fn accepts(self, longitude: f64) -> bool {
        (-self.limit()..=self.limit()).contains(&longitude)
    }
}

/// How transfer entries take part in account aggregates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransferTreatment {
    /// Transfers contribute nothing to either account.
    #[default]
    Excluded,
    /// Transfers count as expense on the sender and income on the receiver.
    Directional,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default = "default_max_note_chars")]
    pub max_note_chars: usize,
    #[serde(default)]
    pub longitude_bounds: LongitudeBounds,
    #[serde(default)]
    pub transfer_treatment: TransferTreatment,
}

fn default_max_note_chars() -> usize {
    DEFAULT_MAX_NOTE_CHARS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_note_chars: DEFAULT_MAX_NOTE_CHARS,
            longitude_bounds: LongitudeBounds::default(),
            transfer_treatment: TransferTreatment::default(),
        }
    }
}

/// Loads and stores `EngineConfig` as JSON beneath the engine's data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, EngineError> {
        Self::with_base_dir(utils::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, EngineError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Reads the stored configuration, falling back to defaults when no file exists.
    pub fn load(&self) -> Result<EngineConfig, EngineError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config = serde_json::from_str(&data)?;
            tracing::debug!(path = %self.path.display(), "loaded engine config");
            Ok(config)
        } else {
            tracing::debug!(path = %self.path.display(), "no engine config, using defaults");
            Ok(EngineConfig::default())
        }
    }

    pub fn save(&self, config: &EngineConfig) -> Result<(), EngineError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), EngineError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
