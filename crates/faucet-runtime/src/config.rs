//! # Runtime Configuration
//!
//! Faucet settings plus process-level options, read from environment
//! variables. Unparsable values keep their default and are reported through
//! [`RuntimeConfig::warnings`] once logging is up.

use shared_types::{AppInfo, FaucetConfig, FeedbackChannel, ResolutionStrategy};
use std::env;

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub faucet: FaucetConfig,
    /// Descriptor presented to the authorization provider.
    pub app: AppInfo,
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub json_logs: bool,
    /// Values that were ignored while loading.
    pub warnings: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            faucet: FaucetConfig::default(),
            app: AppInfo::default(),
            log_level: "info".to_string(),
            json_logs: false,
            warnings: Vec::new(),
        }
    }
}

impl RuntimeConfig {
    /// Load from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `FAUCET_REWARD_COUNT`: tokens per submission (default: 6)
    /// - `FAUCET_MINT_CONCURRENCY`: token creations in flight (default: 1)
    /// - `FAUCET_FEEDBACK_CHANNEL`: mailbox channel id (default: safewalletfeedback)
    /// - `FAUCET_FEEDBACK_TARGET` + `FAUCET_FEEDBACK_SENDER`: post feedback to
    ///   this profile's outbox instead, attributed to the sender
    /// - `FAUCET_RESOLUTION`: `profile` or `raw_key` (default: profile)
    /// - `FAUCET_APP_ID`: application id presented at authorization
    /// - `FAUCET_LOG_LEVEL` or `RUST_LOG`: log filter (default: info)
    /// - `FAUCET_JSON_LOGS`: JSON log output (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load using `lookup` to read variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("FAUCET_REWARD_COUNT") {
            match raw.trim().parse() {
                Ok(count) => config.faucet.reward_count = count,
                Err(_) => config.reject("FAUCET_REWARD_COUNT", &raw),
            }
        }

        if let Some(raw) = lookup("FAUCET_MINT_CONCURRENCY") {
            match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => config.faucet.mint_concurrency = limit,
                _ => config.reject("FAUCET_MINT_CONCURRENCY", &raw),
            }
        }

        match (lookup("FAUCET_FEEDBACK_TARGET"), lookup("FAUCET_FEEDBACK_SENDER")) {
            (Some(target_uri), Some(sender_uri)) => {
                config.faucet.feedback = FeedbackChannel::SocialPost {
                    target_uri,
                    sender_uri,
                };
            }
            (Some(target), None) => config.reject("FAUCET_FEEDBACK_TARGET (no sender)", &target),
            _ => {
                if let Some(channel_id) = lookup("FAUCET_FEEDBACK_CHANNEL") {
                    if channel_id.trim().is_empty() {
                        config.reject("FAUCET_FEEDBACK_CHANNEL", &channel_id);
                    } else {
                        config.faucet.feedback = FeedbackChannel::Mailbox { channel_id };
                    }
                }
            }
        }

        if let Some(raw) = lookup("FAUCET_RESOLUTION") {
            match raw.trim().to_lowercase().as_str() {
                "profile" => config.faucet.resolution = ResolutionStrategy::Profile,
                "raw_key" | "raw-key" | "rawkey" => {
                    config.faucet.resolution = ResolutionStrategy::RawKey
                }
                _ => config.reject("FAUCET_RESOLUTION", &raw),
            }
        }

        if let Some(app_id) = lookup("FAUCET_APP_ID") {
            config.app.id = app_id;
        }

        if let Some(level) = lookup("FAUCET_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.log_level = level;
        }

        if let Some(raw) = lookup("FAUCET_JSON_LOGS") {
            config.json_logs = raw.to_lowercase() == "true" || raw == "1";
        }

        config
    }

    fn reject(&mut self, variable: &str, value: &str) {
        self.warnings
            .push(format!("ignoring {}={:?}, keeping default", variable, value));
    }
}
