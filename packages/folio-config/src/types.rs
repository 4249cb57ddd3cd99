use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub service: Service,
	pub storage: Storage,
	pub weights: Weights,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: default_log_level() }
	}
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

/// Scaling factors applied to each contribution type before terms are merged by name.
///
/// Every term type needs an entry. Removed tags are expected to carry a non-positive weight so
/// that user flags cancel machine-extracted tags.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Weights {
	pub tag: f64,
	pub annotation: f64,
	pub removed_tag: f64,
}

pub(crate) fn default_log_level() -> String {
	"info".to_string()
}
