//! # Engine Configuration Module
//!
//! Loads engine settings from environment variables, with defaults that mirror
//! the behaviour of the hosted booking application.
//!
//! ## Environment Variables
//!
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `SLOTBOOK_CONFLICT_PROBABILITY`: Chance of a simulated booking race, 0.0-1.0 (default: 0.05)
//! - `SLOTBOOK_BOOK_LATENCY_MS`: Simulated latency of a booking (default: 500)
//! - `SLOTBOOK_CANCEL_LATENCY_MS`: Simulated latency of a cancellation (default: 300)
//! - `SLOTBOOK_RESCHEDULE_LATENCY_MS`: Simulated latency of a reschedule (default: 500)
//! - `SLOTBOOK_SETTINGS_FILE`: JSON file with the initial interviewer settings (optional)

use std::{env, fs, path::PathBuf, time::Duration};

use eyre::{Result, WrapErr, eyre};
use slotbook_core::models::settings::InterviewerSettings;
use tracing::Level;

use crate::fault::DEFAULT_CONFLICT_PROBABILITY;

/// Simulated round-trip time of each mutating operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub book: Duration,
    pub cancel: Duration,
    pub reschedule: Duration,
}

impl Latency {
    /// No simulated delay at all.
    pub fn none() -> Self {
        Self {
            book: Duration::ZERO,
            cancel: Duration::ZERO,
            reschedule: Duration::ZERO,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            book: Duration::from_millis(500),
            cancel: Duration::from_millis(300),
            reschedule: Duration::from_millis(500),
        }
    }
}

/// Configuration for the scheduling engine
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_engine::config::EngineConfig;
///
/// fn example() -> Result<()> {
///     let config = EngineConfig::from_env()?;
///     let settings = config.initial_settings()?;
///     println!("Booking for {} (max {}/week)", settings.name, settings.max_interviews_per_week);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Log level for the application
    pub log_level: Level,

    /// Probability that a booking attempt hits a simulated conflict
    pub conflict_probability: f64,

    /// Simulated latency per operation
    pub latency: Latency,

    /// Optional JSON document holding the initial interviewer settings
    pub settings_file: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            conflict_probability: DEFAULT_CONFLICT_PROBABILITY,
            latency: Latency::default(),
            settings_file: None,
        }
    }
}

impl EngineConfig {
    /// Creates a new EngineConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `LOG_LEVEL` is not one of trace, debug, info, warn or error
    /// - A latency value cannot be parsed as milliseconds
    /// - The conflict probability is not a number between 0 and 1
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // Logging settings
        let log_level = match var("LOG_LEVEL") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "trace" => Level::TRACE,
                "debug" => Level::DEBUG,
                "info" => Level::INFO,
                "warn" => Level::WARN,
                "error" => Level::ERROR,
                other => {
                    return Err(eyre!(
                        "Invalid LOG_LEVEL value {:?}, expected trace|debug|info|warn|error",
                        other
                    ));
                }
            },
            None => defaults.log_level,
        };

        // Fault simulation
        let conflict_probability = match var("SLOTBOOK_CONFLICT_PROBABILITY") {
            Some(raw) => {
                let value: f64 = raw
                    .trim()
                    .parse()
                    .wrap_err("Invalid SLOTBOOK_CONFLICT_PROBABILITY value")?;
                if !(0.0..=1.0).contains(&value) {
                    return Err(eyre!(
                        "SLOTBOOK_CONFLICT_PROBABILITY must be between 0 and 1, got {}",
                        value
                    ));
                }
                value
            }
            None => defaults.conflict_probability,
        };

        // Simulated latency
        let millis = |key: &str, default: Duration| -> Result<Duration> {
            match var(key) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .wrap_err_with(|| format!("Invalid {} value", key)),
                None => Ok(default),
            }
        };
        let latency = Latency {
            book: millis("SLOTBOOK_BOOK_LATENCY_MS", defaults.latency.book)?,
            cancel: millis("SLOTBOOK_CANCEL_LATENCY_MS", defaults.latency.cancel)?,
            reschedule: millis("SLOTBOOK_RESCHEDULE_LATENCY_MS", defaults.latency.reschedule)?,
        };

        let settings_file = var("SLOTBOOK_SETTINGS_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            log_level,
            conflict_probability,
            latency,
            settings_file,
        })
    }

    /// Settings the engine starts with: the configured file, or the built-in defaults.
    pub fn initial_settings(&self) -> Result<InterviewerSettings> {
        match &self.settings_file {
            Some(path) => load_settings(path),
            None => Ok(InterviewerSettings::default()),
        }
    }
}

/// Reads and validates an `InterviewerSettings` JSON document.
pub fn load_settings(path: &std::path::Path) -> Result<InterviewerSettings> {
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read settings file {}", path.display()))?;
    let settings: InterviewerSettings = serde_json::from_str(&raw)
        .wrap_err_with(|| format!("Failed to parse settings file {}", path.display()))?;

    settings
        .validate()
        .map_err(|e| eyre!("Invalid settings in {}: {}", path.display(), e))?;

    Ok(settings)
}
