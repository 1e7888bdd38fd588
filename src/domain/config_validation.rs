//! Configuration reading and validation.
//!
//! Everything is checked once, before any prices are read. Failures are fatal and carry the
//! offending section and key.

use crate::domain::error::TaEventsError;
use crate::domain::strategy::PRESETS;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::path::PathBuf;

const DATA_SECTION: &str = "data";
const EVENTS_SECTION: &str = "events";

/// The `[data]` section, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct DataConfig {
    pub path: PathBuf,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Empty means every instrument the data source lists.
    pub osids: Vec<String>,
}

/// Integer option with a default; a present but non-integer value is an error.
pub fn read_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: i64,
) -> Result<i64, TaEventsError> {
    config
        .try_get_int(section, key)
        .map(|v| v.unwrap_or(default))
        .map_err(|reason| TaEventsError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason,
        })
}

pub fn validate_min(
    section: &str,
    key: &str,
    value: i64,
    min: i64,
) -> Result<usize, TaEventsError> {
    if value < min {
        return Err(TaEventsError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{key} must be at least {min}, got {value}"),
        });
    }
    usize::try_from(value).map_err(|e| TaEventsError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: e.to_string(),
    })
}

pub fn validate_threshold(section: &str, key: &str, value: i64) -> Result<i64, TaEventsError> {
    if !(0..=100).contains(&value) {
        return Err(TaEventsError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{key} must be between 0 and 100, got {value}"),
        });
    }
    Ok(value)
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<DataConfig, TaEventsError> {
    let path = config
        .get_string(DATA_SECTION, "path")
        .ok_or_else(|| TaEventsError::ConfigMissing {
            section: DATA_SECTION.to_string(),
            key: "path".to_string(),
        })?;

    let start_date = parse_date(config, "start_date")?;
    let end_date = parse_date(config, "end_date")?;
    if start_date >= end_date {
        return Err(TaEventsError::ConfigInvalid {
            section: DATA_SECTION.to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }

    Ok(DataConfig {
        path: PathBuf::from(path),
        start_date,
        end_date,
        osids: split_list(config.get_string(DATA_SECTION, "osids").as_deref()),
    })
}

fn parse_date(config: &dyn ConfigPort, field: &str) -> Result<NaiveDate, TaEventsError> {
    match config.get_string(DATA_SECTION, field) {
        None => Err(TaEventsError::ConfigMissing {
            section: DATA_SECTION.to_string(),
            key: field.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            TaEventsError::ConfigInvalid {
                section: DATA_SECTION.to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            }
        }),
    }
}

/// Instance section names listed under `[events] instances`, lowercased and de-duplicated in
/// order. Without the key every preset runs.
pub fn instance_names(config: &dyn ConfigPort) -> Result<Vec<String>, TaEventsError> {
    let Some(raw) = config.get_string(EVENTS_SECTION, "instances") else {
        return Ok(PRESETS.iter().map(|p| p.name.to_string()).collect());
    };

    let mut names: Vec<String> = Vec::new();
    for name in split_list(Some(&raw)) {
        let name = name.to_lowercase();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    if names.is_empty() {
        return Err(TaEventsError::ConfigInvalid {
            section: EVENTS_SECTION.to_string(),
            key: "instances".to_string(),
            reason: "instances lists no sections".to_string(),
        });
    }
    Ok(names)
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
