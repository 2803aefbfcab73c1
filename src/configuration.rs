//! Config for the pairing engine behaviors
//!
//! Configuration can be created programmatically using [`Configuration::new()`] or by reading
//! environment variables using [`Configuration::from_env()`] (lenient) or
//! [`Configuration::try_from_env()`] (strict).
//!
//! # Environment Variables
//!
//! All values are optional and case-insensitive.
//!
//! - `SWISS_BYE_POLICY` — `last` or `searched`, see [`ByePolicy`] (default: `last`)
//! - `SWISS_MAX_SEARCH_STEPS` — maximum number of tentative pairings before giving up (default: unlimited)
//! - `SWISS_LOG` — set to `"true"` to log to a file (default: `false`)

use std::env;

use anyhow::Context;

use crate::bye::ByePolicy;

/// Configuration for the pairing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) bye_policy: ByePolicy,
    pub(crate) max_search_steps: Option<u64>,
    pub(crate) log: bool,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - The last listed player receives the bye.
    /// - The search is exhaustive.
    /// - Logging to file is disabled.
    pub fn new() -> Self {
        Self {
            bye_policy: ByePolicy::LastListed,
            max_search_steps: None,
            log: false,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the default value.
    pub fn from_env() -> Self {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        Self {
            bye_policy: env::var("SWISS_BYE_POLICY")
                .ok()
                .and_then(|val| val.parse().ok())
                .unwrap_or_default(),
            max_search_steps: env::var("SWISS_MAX_SEARCH_STEPS")
                .ok()
                .and_then(|val| val.trim().parse().ok()),
            log: get_env_flag("SWISS_LOG", false),
        }
    }

    /// Same as [`from_env`](Self::from_env), but a set variable with a malformed value is an
    /// error instead of being ignored.
    ///
    /// # Errors
    /// Returns an error naming the variable that could not be parsed.
    pub fn try_from_env() -> anyhow::Result<Self> {
        let mut config = Self::new();
        if let Ok(val) = env::var("SWISS_BYE_POLICY") {
            config.bye_policy = val.parse::<ByePolicy>().context("SWISS_BYE_POLICY")?;
        }
        if let Ok(val) = env::var("SWISS_MAX_SEARCH_STEPS") {
            let steps = val
                .trim()
                .parse::<u64>()
                .with_context(|| format!("SWISS_MAX_SEARCH_STEPS: '{val}' is not a step count"))?;
            config.max_search_steps = Some(steps);
        }
        if let Ok(val) = env::var("SWISS_LOG") {
            config.log = match val.to_ascii_lowercase().as_str() {
                "true" => true,
                "false" => false,
                _ => anyhow::bail!("SWISS_LOG: expected 'true' or 'false', got '{val}'"),
            };
        }
        Ok(config)
    }

    /// Set how the bye player is chosen.
    pub fn with_bye_policy(mut self, value: ByePolicy) -> Self {
        self.bye_policy = value;
        self
    }

    /// Bound the search to `value` tentative pairings. Running out is reported as
    /// [`PairingError::SearchBudgetExceeded`](crate::error::PairingError::SearchBudgetExceeded).
    pub fn with_max_search_steps(mut self, value: u64) -> Self {
        self.max_search_steps = Some(value);
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// The bye policy in use.
    pub fn bye_policy(&self) -> ByePolicy {
        self.bye_policy
    }

    /// The search budget, if any.
    pub fn max_search_steps(&self) -> Option<u64> {
        self.max_search_steps
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
