use chrono::{
    format::{Item, StrftimeItems},
    NaiveDate,
};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::LedgerError,
    utils::{
        paths::{self, ensure_dir},
        persistence::write_atomic,
    },
};

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "College Fee",
    "Food",
    "Rent",
    "Transport",
    "Utilities",
    "Health",
    "Shopping",
    "Entertainment",
    "Other",
];
pub const DEFAULT_CATEGORY: &str = "College Fee";
pub const DEFAULT_CURRENCY_PREFIX: &str = "₹";
pub const DEFAULT_STORAGE_KEY: &str = "expenses";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// User-tunable settings for the ledger and its display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub categories: Vec<String>,
    pub default_category: String,
    pub currency_prefix: String,
    pub storage_key: String,
    /// `chrono` format string that entered dates must match.
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|name| name.to_string()).collect(),
            default_category: DEFAULT_CATEGORY.into(),
            currency_prefix: DEFAULT_CURRENCY_PREFIX.into(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.categories.iter().all(|name| name.trim().is_empty()) {
            return Err(LedgerError::Config(
                "at least one category must be configured".into(),
            ));
        }
        if !self.has_category(&self.default_category) {
            return Err(LedgerError::Config(format!(
                "default category `{}` is not in the category list",
                self.default_category
            )));
        }
        if self.storage_key.trim().is_empty() {
            return Err(LedgerError::Config("storage key must not be empty".into()));
        }
        if !date_format_round_trips(&self.date_format) {
            return Err(LedgerError::Config(format!(
                "invalid date format `{}`",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Case-sensitive membership test against the configured categories.
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|candidate| candidate == name)
    }

    /// Resolves user input to the configured spelling of a category.
    pub fn resolve_category(&self, input: &str) -> Option<&str> {
        let trimmed = input.trim();
        self.categories
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(trimmed))
            .map(String::as_str)
    }
}

/// Loads and saves `config.json` in the application data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A usable date format must render a full date that parses back unchanged.
fn date_format_round_trips(format: &str) -> bool {
    if format.trim().is_empty() {
        return false;
    }
    let items = StrftimeItems::new(format);
    if items.clone().any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let Some(sample) = NaiveDate::from_ymd_opt(2024, 3, 15) else {
        return false;
    };
    let mut rendered = String::new();
    // Time fields have nothing to render for a bare date and fail here.
    if write!(rendered, "{}", sample.format_with_items(items)).is_err() {
        return false;
    }
    NaiveDate::parse_from_str(&rendered, format).is_ok_and(|parsed| parsed == sample)
}
