use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use subsite_mapper::config::load_config;
///
/// let config = load_config(Path::new("subsite-mapper.toml")).unwrap();
/// println!("Max depth: {}", config.crawl.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
///
/// # Example
///
/// ```
/// use subsite_mapper::config::parse_config;
///
/// let config = parse_config("[crawl]\nmax-depth = 2\n").unwrap();
/// assert_eq!(config.crawl.max_depth, 2);
/// assert_eq!(config.output.separator, "- ");
/// ```
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    // Parse TOML
    let config: Config = toml::from_str(content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}
