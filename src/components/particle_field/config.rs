//! Tunable constants for particle generation and link rendering.
//!
//! Every number that shapes the field lives here rather than in the engine, so
//! hosts can swap presets or load overrides from JSON. Keys are camelCase and
//! any key may be omitted; missing keys take the [`FieldConfig::default`] value.
//!
//! ```json
//! { "divisor": 10, "maxCount": 100, "linkDistance": 100 }
//! ```

use serde::Deserialize;
use thiserror::Error;

/// Inclusive-exclusive band `[min, max)` that random values are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Band {
	/// Lowest value, inclusive.
	pub min: f64,
	/// Upper bound, exclusive.
	pub max: f64,
}

impl Band {
	/// Band from `min` up to `max`.
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Map a unit sample `t` in `[0, 1)` into the band.
	pub fn lerp(self, t: f64) -> f64 {
		self.min + t * (self.max - self.min)
	}

	fn is_ordered(self) -> bool {
		self.min.is_finite() && self.max.is_finite() && self.min <= self.max
	}
}

/// How connections between particles are found each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkStrategy {
	/// Check every unordered pair.
	AllPairs,
	/// Bucket particles into a grid with cells of the link distance.
	Grid,
	/// All pairs for small fields, grid from `grid_min_count` particles up.
	#[default]
	Auto,
}

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
	/// The text was not valid config JSON.
	#[error("invalid config JSON: {0}")]
	Parse(String),
	/// `divisor` was zero, negative or not finite.
	#[error("divisor must be positive, got {0}")]
	Divisor(f64),
	/// `maxCount` was zero.
	#[error("maxCount must be at least 1")]
	MaxCount,
	/// A random band was inverted, negative or out of range.
	#[error("{name} band is invalid: [{min}, {max})")]
	Band {
		/// Which band.
		name: &'static str,
		/// Its lower bound.
		min: f64,
		/// Its upper bound.
		max: f64,
	},
	/// `linkDistance` was zero, negative or not finite.
	#[error("linkDistance must be positive, got {0}")]
	LinkDistance(f64),
	/// `linkAlpha` was outside `[0, 1]`.
	#[error("linkAlpha must be within [0, 1], got {0}")]
	LinkAlpha(f64),
}

/// Particle field parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
	/// Surface width divided by this gives the particle count.
	pub divisor: f64,
	/// Upper bound on the particle count.
	pub max_count: usize,
	/// Disc radius band.
	pub radius: Band,
	/// Speed band in units per frame.
	pub speed: Band,
	/// Particle fill opacity band.
	pub alpha: Band,
	/// Connection threshold `T`. Pairs at or beyond it are not linked.
	pub link_distance: f64,
	/// Stroke opacity of a link between two coincident particles.
	pub link_alpha: f64,
	/// Link stroke width.
	pub link_width: f64,
	/// How links are searched for.
	pub link_strategy: LinkStrategy,
	/// Particle count at which [`LinkStrategy::Auto`] switches to the grid.
	pub grid_min_count: usize,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self::dense()
	}
}

impl FieldConfig {
	/// Many larger, brighter particles with long links.
	pub fn dense() -> Self {
		Self {
			divisor: 7.0,
			max_count: 180,
			radius: Band::new(1.0, 4.5),
			speed: Band::new(0.4, 1.2),
			alpha: Band::new(0.2, 0.5),
			link_distance: 140.0,
			link_alpha: 0.18,
			link_width: 1.0,
			link_strategy: LinkStrategy::Auto,
			grid_min_count: 400,
		}
	}

	/// Middle ground between [`dense`](Self::dense) and [`sparse`](Self::sparse).
	pub fn balanced() -> Self {
		Self {
			divisor: 8.0,
			max_count: 150,
			speed: Band::new(0.3, 1.0),
			alpha: Band::new(0.15, 0.45),
			link_distance: 120.0,
			link_alpha: 0.15,
			..Self::dense()
		}
	}

	/// Fewer, fainter, slower particles.
	pub fn sparse() -> Self {
		Self {
			divisor: 10.0,
			max_count: 100,
			radius: Band::new(1.0, 4.0),
			speed: Band::new(0.2, 0.7),
			alpha: Band::new(0.1, 0.4),
			link_distance: 100.0,
			link_alpha: 0.1,
			..Self::dense()
		}
	}

	/// Parse a JSON override and check it.
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		let config: Self =
			serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// `clamp(floor(width / divisor), 1, max_count)`.
	pub fn particle_count(&self, width: f64) -> usize {
		let raw = (width / self.divisor).floor();
		let raw = if raw.is_finite() && raw > 0.0 {
			raw as usize
		} else {
			0
		};
		raw.clamp(1, self.max_count.max(1))
	}

	/// Check every field is usable.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(self.divisor.is_finite() && self.divisor > 0.0) {
			return Err(ConfigError::Divisor(self.divisor));
		}
		if self.max_count == 0 {
			return Err(ConfigError::MaxCount);
		}
		for (name, band) in [
			("radius", self.radius),
			("speed", self.speed),
			("alpha", self.alpha),
		] {
			if !band.is_ordered() || band.min < 0.0 {
				return Err(ConfigError::Band {
					name,
					min: band.min,
					max: band.max,
				});
			}
		}
		if self.alpha.max > 1.0 {
			return Err(ConfigError::Band {
				name: "alpha",
				min: self.alpha.min,
				max: self.alpha.max,
			});
		}
		if !(self.link_distance.is_finite() && self.link_distance > 0.0) {
			return Err(ConfigError::LinkDistance(self.link_distance));
		}
		if !(0.0..=1.0).contains(&self.link_alpha) {
			return Err(ConfigError::LinkAlpha(self.link_alpha));
		}
		Ok(())
	}

	/// Whether the grid should be used for a field of `count` particles.
	pub fn use_grid(&self, count: usize) -> bool {
		match self.link_strategy {
			LinkStrategy::AllPairs => false,
			LinkStrategy::Grid => true,
			LinkStrategy::Auto => count >= self.grid_min_count,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn count_scenario() {
		let config = FieldConfig::sparse();
		assert_eq!(config.particle_count(700.0), 70);
	}

	#[test]
	fn count_is_clamped() {
		let config = FieldConfig::sparse();
		assert_eq!(config.particle_count(5.0), 1);
		assert_eq!(config.particle_count(0.0), 1);
		assert_eq!(config.particle_count(1009.0), 100);
		assert_eq!(config.particle_count(50_000.0), 100);
	}

	#[test]
	fn count_bound_holds_across_widths() {
		let config = FieldConfig::dense();
		for width in (1..4000).step_by(13) {
			let n = config.particle_count(width as f64);
			assert!(n >= 1 && n <= config.max_count);
			let raw = (width as f64 / config.divisor).floor() as usize;
			if (1..=config.max_count).contains(&raw) {
				assert_eq!(n, raw);
			}
		}
	}

	#[test]
	fn presets_validate() {
		assert!(FieldConfig::dense().validate().is_ok());
		assert!(FieldConfig::balanced().validate().is_ok());
		assert!(FieldConfig::sparse().validate().is_ok());
	}

	#[test]
	fn invalid_values_rejected() {
		let mut config = FieldConfig::default();
		config.divisor = 0.0;
		assert_eq!(config.validate(), Err(ConfigError::Divisor(0.0)));

		let mut config = FieldConfig::default();
		config.speed = Band::new(2.0, 1.0);
		assert!(matches!(
			config.validate(),
			Err(ConfigError::Band { name: "speed", .. })
		));

		let mut config = FieldConfig::default();
		config.alpha = Band::new(0.5, 1.5);
		assert!(matches!(
			config.validate(),
			Err(ConfigError::Band { name: "alpha", .. })
		));

		let mut config = FieldConfig::default();
		config.link_distance = -1.0;
		assert_eq!(config.validate(), Err(ConfigError::LinkDistance(-1.0)));

		let mut config = FieldConfig::default();
		config.max_count = 0;
		assert_eq!(config.validate(), Err(ConfigError::MaxCount));
	}

	#[test]
	fn partial_json_falls_back_to_defaults() {
		let config: FieldConfig =
			serde_json::from_str(r#"{ "divisor": 10, "maxCount": 100, "linkStrategy": "grid" }"#)
				.unwrap();
		assert_eq!(config.divisor, 10.0);
		assert_eq!(config.max_count, 100);
		assert_eq!(config.link_strategy, LinkStrategy::Grid);
		assert_eq!(config.link_distance, FieldConfig::default().link_distance);
	}

	#[test]
	fn from_json_validates() {
		assert!(FieldConfig::from_json("{}").is_ok());
		assert!(matches!(
			FieldConfig::from_json("{ not json"),
			Err(ConfigError::Parse(_))
		));
		assert_eq!(
			FieldConfig::from_json(r#"{ "linkAlpha": 2.0 }"#),
			Err(ConfigError::LinkAlpha(2.0))
		);
	}

	#[test]
	fn auto_strategy_switches_on_count() {
		let config = FieldConfig::default();
		assert!(!config.use_grid(config.grid_min_count - 1));
		assert!(config.use_grid(config.grid_min_count));
	}

	#[test]
	fn band_lerp() {
		let band = Band::new(1.0, 3.0);
		assert_eq!(band.lerp(0.0), 1.0);
		assert_eq!(band.lerp(0.5), 2.0);
	}
}
