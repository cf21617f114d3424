//! Simulation constants for the particle field.
//!
//! The defaults are the values the gallery page ships with. A host page may
//! override any subset of them through embedded JSON (see
//! [`crate::load_field_config`]); unspecified fields keep their defaults.

use serde::Deserialize;
use thiserror::Error;

use super::theme::Palette;

/// Relative odds of each particle shape being picked at spawn time.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShapeWeights {
	pub heart: u32,
	pub star: u32,
	pub dot: u32,
}

impl ShapeWeights {
	pub fn total(&self) -> u64 {
		u64::from(self.heart) + u64::from(self.star) + u64::from(self.dot)
	}
}

impl Default for ShapeWeights {
	fn default() -> Self {
		Self {
			heart: 1,
			star: 1,
			dot: 3,
		}
	}
}

/// Tunables for seeding and stepping the particle field.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Upper bound on the population, regardless of viewport area.
	pub max_particles: usize,
	/// Viewport pixels per particle.
	pub density_divisor: f64,
	/// Pointer influence radius in pixels.
	pub interaction_radius: f64,
	/// Peak impulse applied at the pointer position.
	pub interaction_force: f64,
	/// Per-frame velocity multiplier.
	pub damping: f64,
	/// Fraction of the remaining alpha gap closed each frame.
	pub alpha_easing: f64,
	pub alpha_min: f64,
	pub alpha_max: f64,
	pub size_min: f64,
	pub size_max: f64,
	/// Half-width of the initial velocity range on each axis.
	pub velocity_spread: f64,
	/// Constant added to the initial vertical velocity (negative drifts up).
	pub drift_bias: f64,
	/// Alpha boost applied to particles near the pointer.
	pub brighten_boost: f64,
	/// Half-width of the angular velocity range, in radians per frame.
	pub angular_velocity_spread: f64,
	pub shape_weights: ShapeWeights,
	pub palette: Palette,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			max_particles: 150,
			density_divisor: 8000.0,
			interaction_radius: 200.0,
			interaction_force: 0.02,
			damping: 0.99,
			alpha_easing: 0.05,
			alpha_min: 0.2,
			alpha_max: 0.7,
			size_min: 2.0,
			size_max: 6.0,
			velocity_spread: 0.15,
			drift_bias: -0.1,
			brighten_boost: 0.3,
			angular_velocity_spread: 0.01,
			shape_weights: ShapeWeights::default(),
			palette: Palette::default(),
		}
	}
}

/// Reasons a configuration override is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
	#[error("density divisor must be positive, got {0}")]
	DensityDivisor(f64),
	#[error("size range [{min}, {max}) must be positive and non-empty")]
	SizeRange { min: f64, max: f64 },
	#[error("alpha range [{min}, {max}) must be non-empty and within [0, 1]")]
	AlphaRange { min: f64, max: f64 },
	#[error("damping must lie in (0, 1], got {0}")]
	Damping(f64),
	#[error("alpha easing must lie in (0, 1], got {0}")]
	AlphaEasing(f64),
	#[error("interaction radius must be positive, got {0}")]
	InteractionRadius(f64),
	#[error("velocity spreads must be finite and non-negative")]
	VelocitySpread,
	#[error("palette must contain at least one color")]
	EmptyPalette,
	#[error("at least one shape weight must be non-zero")]
	ShapeWeights,
}

/// Reasons an embedded override could not be used.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("malformed config: {0}")]
	Json(#[from] serde_json::Error),
	#[error("invalid config: {0}")]
	Invalid(#[from] ConfigError),
}

impl FieldConfig {
	/// Parse a JSON override and validate the result.
	pub fn from_json(json: &str) -> Result<Self, LoadError> {
		let config: FieldConfig = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Check every invariant the simulation relies on.
	///
	/// Sampling ranges must be non-empty, or spawning would panic.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(self.density_divisor.is_finite() && self.density_divisor > 0.0) {
			return Err(ConfigError::DensityDivisor(self.density_divisor));
		}
		if !(self.size_min > 0.0 && self.size_min < self.size_max) || !self.size_max.is_finite() {
			return Err(ConfigError::SizeRange {
				min: self.size_min,
				max: self.size_max,
			});
		}
		if !(0.0 <= self.alpha_min && self.alpha_min < self.alpha_max && self.alpha_max <= 1.0) {
			return Err(ConfigError::AlphaRange {
				min: self.alpha_min,
				max: self.alpha_max,
			});
		}
		if !(self.damping > 0.0 && self.damping <= 1.0) {
			return Err(ConfigError::Damping(self.damping));
		}
		if !(self.alpha_easing > 0.0 && self.alpha_easing <= 1.0) {
			return Err(ConfigError::AlphaEasing(self.alpha_easing));
		}
		if !(self.interaction_radius.is_finite() && self.interaction_radius > 0.0) {
			return Err(ConfigError::InteractionRadius(self.interaction_radius));
		}
		let spreads_ok = [self.velocity_spread, self.angular_velocity_spread]
			.iter()
			.all(|s| s.is_finite() && *s >= 0.0)
			&& self.drift_bias.is_finite();
		if !spreads_ok {
			return Err(ConfigError::VelocitySpread);
		}
		if self.palette.is_empty() {
			return Err(ConfigError::EmptyPalette);
		}
		if self.shape_weights.total() == 0 {
			return Err(ConfigError::ShapeWeights);
		}
		Ok(())
	}

	/// Population for a viewport: `min(max_particles, floor(area / divisor))`.
	pub fn particle_count(&self, width: f64, height: f64) -> usize {
		let area = (width * height).max(0.0);
		let by_density = (area / self.density_divisor).floor();
		if by_density.is_finite() {
			(by_density as usize).min(self.max_particles)
		} else {
			0
		}
	}
}
