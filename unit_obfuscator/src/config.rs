use serde::Deserialize;
use config as config_rs;
use thiserror::Error;

use crate::obfuscator::{Matching, ObfuscatorOptions, OutputFormat};
use crate::parse::AmountPolicy;

pub const ENV_PREFIX: &str = "UNIT_OBFUSCATOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub matching: Matching,
    pub amounts: AmountPolicy,
    pub output: OutputFormat,
}

impl AppConfig {
    pub fn obfuscator_options(&self) -> ObfuscatorOptions {
        ObfuscatorOptions {
            matching: self.matching,
            amounts: self.amounts,
        }
    }
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub matching: Option<String>,
    pub amounts: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    matching: String,
    amounts: String,
    output: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Config(#[from] config_rs::ConfigError),
    #[error("invalid value: {0}")]
    Invalid(String),
}

pub fn load_config(path: Option<&str>, overrides: &CliOverrides) -> Result<AppConfig, ConfigError> {
    let mut builder = config_rs::Config::builder()
        .set_default("matching", Matching::default().to_string())?
        .set_default("amounts", AmountPolicy::default().to_string())?
        .set_default("output", "text")?;

    if let Some(path) = path {
        builder = builder.add_source(config_rs::File::with_name(path));
    }
    builder = builder.add_source(config_rs::Environment::with_prefix(ENV_PREFIX));

    // CLI flags take precedence
    if let Some(matching) = &overrides.matching {
        builder = builder.set_override("matching", matching.as_str())?;
    }
    if let Some(amounts) = &overrides.amounts {
        builder = builder.set_override("amounts", amounts.as_str())?;
    }
    if let Some(output) = &overrides.output {
        builder = builder.set_override("output", output.as_str())?;
    }

    let raw: RawConfig = builder.build()?.try_deserialize()?;

    Ok(AppConfig {
        matching: raw.matching.parse().map_err(ConfigError::Invalid)?,
        amounts: raw.amounts.parse().map_err(ConfigError::Invalid)?,
        output: raw.output.parse().map_err(ConfigError::Invalid)?,
    })
}
