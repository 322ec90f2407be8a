//! Input format and output configuration (optional `config.toml`)

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::types::{PageTallyError, Result};

const CONFIG_FILE: &str = "config.toml";

/// Text encoding of the source log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// ISO-8859-1, one byte per character (printer fleet exports)
    #[default]
    Latin1,
    Utf8,
}

impl Encoding {
    /// Decode one field. Latin-1 maps every byte to the code point of the same value.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Where and how to read the print log
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub delimiter: char,
    pub encoding: Encoding,
    pub name_column: String,
    pub color_column: String,
    pub mono_column: String,
    pub date_column: String,
    /// chrono format of the print timestamp
    pub timestamp_format: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            encoding: Encoding::Latin1,
            name_column: "Nome_Completo".into(),
            color_column: "Paginas_Color".into(),
            mono_column: "Paginas_Mono".into(),
            date_column: "Data_de_Impressão".into(),
            timestamp_format: "%d/%m/%Y %H:%M".into(),
        }
    }
}

impl InputConfig {
    /// Delimiter as the single byte the CSV reader wants
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                PageTallyError::Config(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    self.delimiter
                ))
            })
    }
}

/// Spreadsheet output settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub sheet_name: String,
    /// Destination used when the CLI does not get `--output`
    pub default_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".into(),
            default_path: PathBuf::from("salvos").join("resultado.xlsx"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PageTallyError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            PageTallyError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.input.delimiter_byte()?;
        Ok(config)
    }

    /// Resolve the active configuration.
    ///
    /// An explicit path must exist. Otherwise the per-user config file is used
    /// when present, falling back to built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            info!("loading config from {}", path.display());
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                info!("loading config from {}", path.display());
                Self::load(&path)
            }
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// `<platform config dir>/pagetally/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "pagetally").map(|d| d.config_dir().join(CONFIG_FILE))
}
