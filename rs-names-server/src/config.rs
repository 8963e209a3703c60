use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
	#[error("invalid value '{value}' for {key}")]
	Invalid { key: &'static str, value: String },
}

/// Server settings, read from `NAMES_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
	/// Postcard model artifact (`NAMES_MODEL_PATH`).
	pub model_path: PathBuf,
	/// Bind address (`NAMES_HOST`).
	pub host: String,
	/// Bind port (`NAMES_PORT`).
	pub port: u16,
	/// Maximum characters per generated name part (`NAMES_MAX_LENGTH`).
	pub max_length: usize,
	/// Actix worker threads (`NAMES_WORKERS`).
	pub workers: usize,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			model_path: PathBuf::from("./models/rnn_layer.bin"),
			host: "0.0.0.0".to_owned(),
			port: 9000,
			max_length: 50,
			workers: num_cpus::get(),
		}
	}
}

impl ServerConfig {
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Builds a configuration from any key lookup, falling back to defaults
	/// for missing keys.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut config = Self::default();
		if let Some(path) = lookup("NAMES_MODEL_PATH") {
			config.model_path = PathBuf::from(path);
		}
		if let Some(host) = lookup("NAMES_HOST") {
			config.host = host;
		}
		config.port = parse(&lookup, "NAMES_PORT", config.port)?;
		config.max_length = parse(&lookup, "NAMES_MAX_LENGTH", config.max_length)?;
		config.workers = parse(&lookup, "NAMES_WORKERS", config.workers)?;

		if config.max_length == 0 {
			return Err(ConfigError::Invalid { key: "NAMES_MAX_LENGTH", value: "0".to_owned() });
		}
		if config.workers == 0 {
			return Err(ConfigError::Invalid { key: "NAMES_WORKERS", value: "0".to_owned() });
		}
		Ok(config)
	}
}

fn parse<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
	T: FromStr,
	F: Fn(&str) -> Option<String>,
{
	match lookup(key) {
		None => Ok(default),
		Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
	}
}
