//! Page-level orb configuration.
//!
//! The host page may embed a JSON block:
//!
//! ```html
//! <script type="application/json" id="orb-config">
//!   { "dense_threshold": 120, "avatar_size": 32 }
//! </script>
//! ```
//!
//! Every field is optional and falls back to [`OrbConfig::default`].

use serde::Deserialize;

use super::preset::MoodPreset;
use super::state::Density;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbConfig {
	pub main_container_id: String,
	pub main_fallback_size: f64,
	pub mini_container_id: String,
	pub mini_size: f64,
	pub chat_header_container_id: String,
	pub chat_header_size: f64,
	pub nav_container_id: String,
	pub nav_size: f64,
	pub avatar_size: f64,
	/// Instances larger than this many px get `dense_particles`.
	pub dense_threshold: f64,
	pub dense_particles: usize,
	pub sparse_particles: usize,
	/// Detached instances animated at once; older ones are frozen.
	pub max_detached: usize,
	/// Preset key active at startup. Unknown keys fall back to vibrant.
	pub initial_preset: String,
}

impl Default for OrbConfig {
	fn default() -> Self {
		Self {
			main_container_id: "orb-container".into(),
			main_fallback_size: 220.0,
			mini_container_id: "orb-container-mini".into(),
			mini_size: 56.0,
			chat_header_container_id: "chat-header-orb".into(),
			chat_header_size: 40.0,
			nav_container_id: "nav-orb".into(),
			nav_size: 32.0,
			avatar_size: 28.0,
			dense_threshold: 100.0,
			dense_particles: 200,
			sparse_particles: 80,
			max_detached: 64,
			initial_preset: MoodPreset::Vibrant.key().into(),
		}
	}
}

impl OrbConfig {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	pub fn density(&self) -> Density {
		Density {
			threshold: self.dense_threshold,
			dense: self.dense_particles,
			sparse: self.sparse_particles,
		}
	}

	pub fn initial_preset(&self) -> MoodPreset {
		self.initial_preset.parse().unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_gives_defaults() {
		assert_eq!(OrbConfig::from_json("{}").ok(), Some(OrbConfig::default()));
	}

	#[test]
	fn partial_override_keeps_other_defaults() {
		let config = OrbConfig::from_json(r#"{ "dense_threshold": 120, "sparse_particles": 60 }"#)
			.expect("valid config");
		let density = config.density();
		assert_eq!(density.threshold, 120.0);
		assert_eq!(density.sparse, 60);
		assert_eq!(density.dense, 200);
		assert_eq!(config.main_container_id, "orb-container");
	}

	#[test]
	fn initial_preset_accepts_letter_keys_and_ignores_garbage() {
		let calm = OrbConfig::from_json(r#"{ "initial_preset": "a" }"#).expect("valid config");
		assert_eq!(calm.initial_preset(), MoodPreset::Calm);
		let junk = OrbConfig::from_json(r#"{ "initial_preset": "zzz" }"#).expect("valid config");
		assert_eq!(junk.initial_preset(), MoodPreset::Vibrant);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(OrbConfig::from_json("{ not json").is_err());
	}
}
