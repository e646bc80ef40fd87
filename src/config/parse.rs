//! Configuration parsing from YAML text

use crate::config::types::CommandConfig;
use crate::error::RoastError;

/// Parse a command tree from YAML text
///
/// Handlers, validators and formatters cannot be expressed in YAML; attach
/// them afterwards with [`CommandConfig::bind`] and friends.
pub fn parse_config(yaml: &str) -> Result<CommandConfig, RoastError> {
    if yaml.trim().is_empty() {
        return Ok(CommandConfig::default());
    }

    let config: CommandConfig = serde_yaml::from_str(yaml)?;
    Ok(config)
}
