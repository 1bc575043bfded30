use std::path::PathBuf;

use chrono_tz::Tz;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use taskdeck_core::error::CoreError;
use taskdeck_core::models::{Priority, Status};
use taskdeck_core::timezone::{detect_system_timezone, parse_timezone};
use taskdeck_core::view::{SortDirection, SortKey, SortState, TaskListFilter};

const CONFIG_FILE: &str = "taskdeck.toml";
const ENV_PREFIX: &str = "TASKDECK_";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// IANA timezone for calendar-day comparisons; detected when unset
    pub timezone: Option<String>,
    /// Load the sample projects, tags and tasks at startup
    pub seed: bool,
    pub log_level: String,
    pub list: ListConfig,
}

/// Defaults for every task list the CLI renders
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ListConfig {
    pub sort: SortKey,
    pub direction: SortDirection,
    pub statuses: Vec<Status>,
    pub priorities: Vec<Priority>,
    pub title_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: None,
            seed: true,
            log_level: "warn".to_string(),
            list: ListConfig::default(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        let sort = SortState::default();
        Self {
            sort: sort.key,
            direction: sort.direction,
            statuses: Status::ALL.to_vec(),
            priorities: Priority::ALL.to_vec(),
            title_width: 40,
        }
    }
}

impl Config {
    /// Defaults, then `taskdeck.toml` (or `$TASKDECK_CONFIG`), then
    /// `TASKDECK_*` variables; nested keys use `__` (`TASKDECK_LIST__SORT`).
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment(config_path()).extract()
    }

    pub fn figment(path: PathBuf) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn resolve_timezone(&self, override_tz: Option<&str>) -> Result<Tz, CoreError> {
        match override_tz.or(self.timezone.as_deref()) {
            Some(name) => parse_timezone(name),
            None => Ok(detect_system_timezone()),
        }
    }
}

impl ListConfig {
    pub fn sort_state(&self) -> SortState {
        SortState::new(self.sort, self.direction)
    }

    pub fn filter(&self) -> TaskListFilter {
        TaskListFilter::new(self.statuses.iter().copied(), self.priorities.iter().copied())
    }
}

fn config_path() -> PathBuf {
    std::env::var_os("TASKDECK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}
