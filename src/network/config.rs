use super::filter::{DEFAULT_CONFIDENCE, PathLengthMode};
use super::merge::CONFIRMATION_THRESHOLD;

/// Node count from which the counter is shown as a warning.
pub const NODE_COUNT_WARNING: usize = 150;
/// How long a transient error banner stays up.
pub const ERROR_DISMISS_MS: u64 = 2000;

/// Tunables for an explorer session.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplorerConfig {
	/// Initial confidence slider value.
	pub confidence_threshold: f64,
	/// Initial state of the two-hop interaction toggle.
	pub path_length_mode: PathLengthMode,
	/// Fragments with at least this many nodes need confirmation.
	pub confirmation_threshold: usize,
	pub node_count_warning: usize,
	pub error_dismiss_ms: u64,
	/// Prefix for backend requests; empty means same origin.
	pub api_base: String,
}

impl Default for ExplorerConfig {
	fn default() -> Self {
		Self {
			confidence_threshold: DEFAULT_CONFIDENCE,
			path_length_mode: PathLengthMode::Hide,
			confirmation_threshold: CONFIRMATION_THRESHOLD,
			node_count_warning: NODE_COUNT_WARNING,
			error_dismiss_ms: ERROR_DISMISS_MS,
			api_base: String::new(),
		}
	}
}

impl ExplorerConfig {
	pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
		self.confidence_threshold = clamp_unit(threshold);
		self
	}

	pub fn with_path_length_mode(mut self, mode: PathLengthMode) -> Self {
		self.path_length_mode = mode;
		self
	}

	pub fn with_confirmation_threshold(mut self, nodes: usize) -> Self {
		self.confirmation_threshold = nodes;
		self
	}

	pub fn with_node_count_warning(mut self, nodes: usize) -> Self {
		self.node_count_warning = nodes;
		self
	}

	pub fn with_error_dismiss_ms(mut self, ms: u64) -> Self {
		self.error_dismiss_ms = ms;
		self
	}

	pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
		self.api_base = base.into().trim_end_matches('/').to_string();
		self
	}
}

/// Clamp a threshold into [0, 1]; NaN falls back to the default.
pub fn clamp_unit(value: f64) -> f64 {
	if value.is_nan() {
		DEFAULT_CONFIDENCE
	} else {
		value.clamp(0.0, 1.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_the_explorer_page() {
		let config = ExplorerConfig::default();
		assert_eq!(config.confidence_threshold, 0.6);
		assert_eq!(config.path_length_mode, PathLengthMode::Hide);
		assert_eq!(config.confirmation_threshold, 100);
		assert_eq!(config.node_count_warning, 150);
		assert_eq!(config.error_dismiss_ms, 2000);
	}

	#[test]
	fn builders_clamp_and_normalize() {
		let config = ExplorerConfig::default()
			.with_confidence_threshold(1.7)
			.with_api_base("https://planarian.example/");
		assert_eq!(config.confidence_threshold, 1.0);
		assert_eq!(config.api_base, "https://planarian.example");
		assert_eq!(clamp_unit(-0.2), 0.0);
		assert_eq!(clamp_unit(f64::NAN), DEFAULT_CONFIDENCE);
	}
}
