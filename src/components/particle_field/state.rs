//! Per-mount simulation state and pointer tracking.

use log::warn;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::FieldConfig;
use super::particles::ParticleSystem;

/// Last known pointer position, in viewport pixels.
///
/// `active` flips on with any movement and off when the pointer leaves the
/// window; there is no idle timeout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	pub x: f64,
	pub y: f64,
	pub active: bool,
}

/// Everything one mounted field owns: the population, the pointer, the
/// configuration it was seeded with and its random source.
///
/// Created once when the component mounts and dropped on unmount. The frame
/// loop and the event handlers share it through a single `RefCell`.
pub struct FieldState {
	pub system: ParticleSystem,
	pub pointer: PointerState,
	pub config: FieldConfig,
	rng: SmallRng,
}

impl FieldState {
	/// Seed a field for a `width` x `height` surface.
	///
	/// A config that fails validation is replaced by the defaults.
	pub fn mount(config: FieldConfig, width: f64, height: f64, seed: u64) -> Self {
		let config = match config.validate() {
			Ok(()) => config,
			Err(e) => {
				warn!("particle-field: ignoring config override: {}", e);
				FieldConfig::default()
			}
		};
		let mut rng = SmallRng::seed_from_u64(seed);
		let system = ParticleSystem::seed(&config, width, height, &mut rng);
		Self {
			system,
			pointer: PointerState::default(),
			config,
			rng,
		}
	}

	pub fn width(&self) -> f64 {
		self.system.width()
	}

	pub fn height(&self) -> f64 {
		self.system.height()
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.system.resize(width, height);
	}

	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		self.pointer = PointerState { x, y, active: true };
	}

	pub fn pointer_left(&mut self) {
		self.pointer.active = false;
	}

	/// Advance the simulation by one frame.
	pub fn tick(&mut self) {
		self.system.update(&self.pointer, &self.config, &mut self.rng);
	}
}
