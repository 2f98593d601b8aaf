use std::fs;
use std::path::Path;
use log::warn;
use serde::Deserialize;

/// Dashboard configuration, loaded from an optional toml file.
#[derive(Deserialize, Debug, Default, Clone)]
pub(crate) struct Config {
    /// Starting monthly salary. Runtime changes are session-only.
    pub(crate) salary: Option<f32>,

    #[serde(default)]
    pub(crate) amount_policy: AmountPolicy,

    #[serde(default)]
    pub(crate) columns: ColumnMap,
}

/// What to do with a row whose amount does not parse.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum AmountPolicy {
    /// Keep the row, substituting 0.0 for the amount.
    #[default]
    ZeroFill,
    /// Drop the row.
    Reject,
}

/// Maps canonical field names to the column names of a source spreadsheet,
/// for files whose headers don't match the common spellings.
#[derive(Deserialize, Debug, Default, Clone)]
pub(crate) struct ColumnMap {
    pub(crate) date: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) amount: Option<String>,
}

impl Config {
    pub(crate) fn load_from_file(file_path: Option<&str>) -> Config {
        let Some(file_path) = file_path else {
            return Config::default();
        };

        let path = Path::new(file_path);
        if path.exists() && path.is_file() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<Config>(&content) {
                    Ok(config) => config,
                    Err(e) => {
                        warn!("Invalid config file {}: {}. Using defaults.", file_path, e);
                        Config::default()
                    }
                },
                Err(e) => {
                    warn!("Unable to read config file {}: {}. Using defaults.", file_path, e);
                    Config::default()
                }
            }
        } else {
            warn!("Config file {} not found. Using defaults.", file_path);
            Config::default()
        }
    }
}
