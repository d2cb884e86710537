use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Reads, parses and validates a TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - The validated configuration
/// * `Err(ConfigError)` - The file could not be read, parsed, or validated
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    parse_config(&fs::read_to_string(path)?)
}

/// Parses and validates configuration from TOML text
///
/// Missing sections and keys take their defaults, so `""` is a valid input.
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Hex-encoded SHA-256 of a configuration file's bytes
///
/// Logged at startup and written into the summary so a run can be matched to
/// the configuration it used.
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    Ok(hash_text(&fs::read_to_string(path)?))
}

/// Loads a configuration together with the hash of the exact text that was parsed
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let text = fs::read_to_string(path)?;
    let config = parse_config(&text)?;
    Ok((config, hash_text(&text)))
}

fn hash_text(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
