mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Service, Storage, Weights};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	for (label, weight) in [
		("weights.tag", cfg.weights.tag),
		("weights.annotation", cfg.weights.annotation),
		("weights.removed_tag", cfg.weights.removed_tag),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
	}

	if cfg.weights.tag < 0.0 {
		return Err(Error::Validation {
			message: "weights.tag must be zero or greater.".to_string(),
		});
	}
	if cfg.weights.annotation < 0.0 {
		return Err(Error::Validation {
			message: "weights.annotation must be zero or greater.".to_string(),
		});
	}
	if cfg.weights.removed_tag > 0.0 {
		return Err(Error::Validation {
			message: "weights.removed_tag must be zero or less.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.service.log_level.trim();

	cfg.service.log_level =
		if trimmed.is_empty() { types::default_log_level() } else { trimmed.to_string() };
}
