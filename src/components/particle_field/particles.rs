//! Ambient particles drifting behind the page content.
//!
//! Each particle integrates its own velocity, is pulled toward the pointer
//! when it comes close, and twinkles by easing its opacity toward a target
//! that is re-rolled every frame.

use rand::Rng;

use super::config::{FieldConfig, ShapeWeights};
use super::state::PointerState;
use super::theme::Hsl;

/// Silhouette a particle is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
	Heart,
	Star,
	Dot,
}

impl Shape {
	/// Pick a shape with odds proportional to `weights`.
	pub fn sample<R: Rng + ?Sized>(weights: &ShapeWeights, rng: &mut R) -> Self {
		let roll = rng.gen_range(0..weights.total());
		let heart = u64::from(weights.heart);
		if roll < heart {
			Shape::Heart
		} else if roll < heart + u64::from(weights.star) {
			Shape::Star
		} else {
			Shape::Dot
		}
	}
}

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub color: Hsl,
	pub shape: Shape,
	pub alpha: f64,
	pub target_alpha: f64,
	/// Rotation in radians, only visible on stars.
	pub angle: f64,
	pub angular_velocity: f64,
}

/// Uniform sample from `[lo, hi)`; collapses to `lo` on an empty range.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
	if hi <= lo {
		return lo;
	}
	lo + rng.r#gen::<f64>() * (hi - lo)
}

/// Send a coordinate that left `[0, extent)` to the opposite boundary.
///
/// Crossing the low edge lands just under `extent`, keeping the range
/// half-open.
fn wrap(value: f64, extent: f64) -> f64 {
	if extent.is_nan() || extent <= 0.0 {
		return 0.0;
	}
	if value < 0.0 {
		extent - extent * f64::EPSILON
	} else if value >= extent {
		0.0
	} else {
		value
	}
}

impl Particle {
	/// Create a particle at a random position inside `width` x `height`.
	pub fn spawn<R: Rng + ?Sized>(config: &FieldConfig, width: f64, height: f64, rng: &mut R) -> Self {
		let spread = config.velocity_spread;
		let spin = config.angular_velocity_spread;
		let color = config.palette.get(rng.gen_range(0..config.palette.len()));
		Self {
			x: uniform(rng, 0.0, width.max(0.0)),
			y: uniform(rng, 0.0, height.max(0.0)),
			vx: uniform(rng, -spread, spread),
			vy: uniform(rng, -spread, spread) + config.drift_bias,
			size: uniform(rng, config.size_min, config.size_max),
			color,
			shape: Shape::sample(&config.shape_weights, rng),
			alpha: uniform(rng, config.alpha_min, config.alpha_max),
			target_alpha: uniform(rng, config.alpha_min, config.alpha_max),
			angle: uniform(rng, 0.0, std::f64::consts::TAU),
			angular_velocity: uniform(rng, -spin, spin),
		}
	}

	/// Advance one frame.
	///
	/// The proximity boost is written to `target_alpha` before easing and
	/// overwritten by the re-roll right after, so it only shapes this frame's
	/// easing delta.
	pub fn step<R: Rng + ?Sized>(
		&mut self,
		pointer: &PointerState,
		config: &FieldConfig,
		width: f64,
		height: f64,
		rng: &mut R,
	) {
		if pointer.active {
			let (dx, dy) = (pointer.x - self.x, pointer.y - self.y);
			let distance = (dx * dx + dy * dy).sqrt();
			if distance < config.interaction_radius {
				// No direction to pull along when sitting on the pointer
				if distance > 0.0 {
					let force = (1.0 - distance / config.interaction_radius) * config.interaction_force;
					self.vx += dx / distance * force;
					self.vy += dy / distance * force;
				}
				self.target_alpha = (self.alpha + config.brighten_boost).clamp(0.0, 1.0);
			}
		}

		self.x += self.vx;
		self.y += self.vy;
		self.angle += self.angular_velocity;

		self.vx *= config.damping;
		self.vy *= config.damping;

		self.alpha += (self.target_alpha - self.alpha) * config.alpha_easing;
		self.target_alpha = uniform(rng, config.alpha_min, config.alpha_max);

		self.x = wrap(self.x, width);
		self.y = wrap(self.y, height);
	}
}

/// The fixed population of one mounted field.
pub struct ParticleSystem {
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleSystem {
	/// Seed a population sized to the viewport area.
	pub fn seed<R: Rng + ?Sized>(config: &FieldConfig, width: f64, height: f64, rng: &mut R) -> Self {
		let count = config.particle_count(width, height);
		let particles = (0..count)
			.map(|_| Particle::spawn(config, width, height, rng))
			.collect();

		Self {
			particles,
			width,
			height,
		}
	}

	/// Advance every particle by one frame.
	pub fn update<R: Rng + ?Sized>(&mut self, pointer: &PointerState, config: &FieldConfig, rng: &mut R) {
		let (width, height) = (self.width, self.height);
		for p in &mut self.particles {
			p.step(pointer, config, width, height, rng);
		}
	}

	/// Change the wrap bounds. Particles are neither re-seeded nor moved;
	/// any left outside the new bounds wrap on the next update.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn rng() -> SmallRng {
		SmallRng::seed_from_u64(0x5eed)
	}

	fn resting_particle(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			size: 4.0,
			color: Hsl::new(0.0, 0.0, 100.0),
			shape: Shape::Dot,
			alpha: 0.5,
			target_alpha: 0.5,
			angle: 0.0,
			angular_velocity: 0.0,
		}
	}

	fn pointer_at(x: f64, y: f64) -> PointerState {
		PointerState { x, y, active: true }
	}

	#[test]
	fn seed_respects_density_and_cap() {
		let config = FieldConfig::default();
		let mut rng = rng();
		assert_eq!(ParticleSystem::seed(&config, 800.0, 600.0, &mut rng).len(), 60);
		assert_eq!(ParticleSystem::seed(&config, 2560.0, 1440.0, &mut rng).len(), 150);
		assert!(ParticleSystem::seed(&config, 0.0, 0.0, &mut rng).is_empty());
	}

	#[test]
	fn spawned_particles_stay_within_initial_ranges() {
		let config = FieldConfig::default();
		let system = ParticleSystem::seed(&config, 1280.0, 720.0, &mut rng());
		for p in &system.particles {
			assert!((0.0..1280.0).contains(&p.x));
			assert!((0.0..720.0).contains(&p.y));
			assert!((-0.15..0.15).contains(&p.vx));
			assert!((-0.25..0.05).contains(&p.vy), "vy {} lacks upward bias", p.vy);
			assert!((2.0..6.0).contains(&p.size));
			assert!((0.2..0.7).contains(&p.alpha));
			assert!((0.2..0.7).contains(&p.target_alpha));
			assert!((-0.01..0.01).contains(&p.angular_velocity));
			assert!(config.palette.colors.contains(&p.color));
		}
	}

	#[test]
	fn shape_distribution_favours_dots() {
		let config = FieldConfig::default();
		let mut rng = rng();
		let samples = 10_000;
		let (mut hearts, mut stars, mut dots) = (0, 0, 0);
		for _ in 0..samples {
			match Particle::spawn(&config, 100.0, 100.0, &mut rng).shape {
				Shape::Heart => hearts += 1,
				Shape::Star => stars += 1,
				Shape::Dot => dots += 1,
			}
		}
		let frac = |n: i32| n as f64 / samples as f64;
		assert!((frac(dots) - 0.6).abs() < 0.03, "dots {}", frac(dots));
		assert!((frac(hearts) - 0.2).abs() < 0.03, "hearts {}", frac(hearts));
		assert!((frac(stars) - 0.2).abs() < 0.03, "stars {}", frac(stars));
	}

	#[test]
	fn velocity_decays_geometrically_without_pointer() {
		let config = FieldConfig::default();
		let mut rng = rng();
		let mut p = resting_particle(500.0, 500.0);
		p.vx = 0.8;
		let idle = PointerState::default();
		for t in 1..=240 {
			p.step(&idle, &config, 1000.0, 1000.0, &mut rng);
			let expected = 0.8 * 0.99_f64.powi(t);
			assert!((p.vx - expected).abs() < 1e-12, "frame {t}: {} vs {expected}", p.vx);
			assert_eq!(p.vy, 0.0);
		}
	}

	#[test]
	fn nearby_pointer_pulls_particle_toward_it() {
		let config = FieldConfig::default();
		let mut p = resting_particle(100.0, 100.0);
		p.step(&pointer_at(200.0, 100.0), &config, 1000.0, 1000.0, &mut rng());
		// force = (1 - 100/200) * 0.02 = 0.01, damped once after integration
		assert!((p.vx - 0.01 * 0.99).abs() < 1e-12);
		assert!((p.x - 100.01).abs() < 1e-12);
		assert_eq!(p.vy, 0.0);
	}

	#[test]
	fn distant_pointer_has_no_effect() {
		let config = FieldConfig::default();
		let mut p = resting_particle(100.0, 100.0);
		p.step(&pointer_at(400.0, 100.0), &config, 1000.0, 1000.0, &mut rng());
		assert_eq!((p.x, p.vx), (100.0, 0.0));
		assert!((p.alpha - 0.5).abs() < 1e-12);
	}

	#[test]
	fn brightening_only_shapes_the_current_easing_step() {
		let config = FieldConfig::default();
		let mut p = resting_particle(100.0, 100.0);
		p.step(&pointer_at(150.0, 100.0), &config, 1000.0, 1000.0, &mut rng());
		// eased toward min(1, 0.5 + 0.3) = 0.8, then the target is re-rolled
		assert!((p.alpha - (0.5 + 0.3 * 0.05)).abs() < 1e-12);
		assert!((0.2..0.7).contains(&p.target_alpha));
	}

	#[test]
	fn pointer_on_particle_does_not_produce_nan() {
		let config = FieldConfig::default();
		let mut rng = rng();
		let mut p = resting_particle(300.0, 300.0);
		for _ in 0..10 {
			let pointer = pointer_at(p.x, p.y);
			p.step(&pointer, &config, 1000.0, 1000.0, &mut rng);
			assert!(p.x.is_finite() && p.y.is_finite());
			assert!(p.vx.is_finite() && p.vy.is_finite());
			assert!(p.alpha.is_finite());
		}
	}

	#[test]
	fn positions_wrap_into_bounds() {
		let config = FieldConfig::default();
		let mut rng = rng();
		let idle = PointerState::default();

		let mut left = resting_particle(0.1, 50.0);
		left.vx = -0.5;
		left.step(&idle, &config, 200.0, 100.0, &mut rng);
		assert!(left.x < 200.0);
		assert!(200.0 - left.x < 1e-9);

		let mut bottom = resting_particle(50.0, 99.9);
		bottom.vy = 0.5;
		bottom.step(&idle, &config, 200.0, 100.0, &mut rng);
		assert_eq!(bottom.y, 0.0);
	}

	#[test]
	fn shrinking_sends_stranded_particles_to_the_boundary() {
		let config = FieldConfig::default();
		let mut rng = rng();
		let idle = PointerState::default();

		let mut far = resting_particle(1000.0, 50.0);
		far.step(&idle, &config, 640.0, 480.0, &mut rng);
		assert_eq!(far.x, 0.0);

		let mut behind = resting_particle(-3.0, 50.0);
		behind.step(&idle, &config, 640.0, 480.0, &mut rng);
		assert!(behind.x < 640.0 && 640.0 - behind.x < 1e-9, "x {}", behind.x);
	}

	#[test]
	fn wrap_handles_degenerate_inputs() {
		assert_eq!(wrap(5.0, 0.0), 0.0);
		assert_eq!(wrap(5.0, f64::NAN), 0.0);
		assert!(wrap(-1e-20, 800.0) < 800.0);
		assert_eq!(wrap(1600.5, 800.0), 0.0);
		assert_eq!(wrap(800.0, 800.0), 0.0);
	}

	#[test]
	fn uniform_collapses_on_empty_range() {
		let mut rng = rng();
		assert_eq!(uniform(&mut rng, 0.3, 0.3), 0.3);
		assert_eq!(uniform(&mut rng, 0.7, 0.2), 0.7);
	}

	#[test]
	fn positions_and_alpha_hold_invariants_under_load() {
		let config = FieldConfig::default();
		let mut rng = rng();
		let mut system = ParticleSystem::seed(&config, 1024.0, 768.0, &mut rng);
		let mut pointer = pointer_at(512.0, 384.0);
		for frame in 0..600 {
			if frame == 300 {
				system.resize(640.0, 480.0);
			}
			pointer.x = (frame as f64 * 7.0) % 640.0;
			system.update(&pointer, &config, &mut rng);
			for p in &system.particles {
				assert!((0.0..system.width()).contains(&p.x), "x {} escaped", p.x);
				assert!((0.0..system.height()).contains(&p.y), "y {} escaped", p.y);
				assert!((0.0..=1.0).contains(&p.alpha), "alpha {} escaped", p.alpha);
			}
		}
	}

	#[test]
	fn resize_keeps_population_and_positions() {
		let config = FieldConfig::default();
		let mut system = ParticleSystem::seed(&config, 1024.0, 768.0, &mut rng());
		let before = system.particles.clone();
		system.resize(300.0, 200.0);
		system.resize(1920.0, 1080.0);
		assert_eq!(system.particles, before);
		assert_eq!((system.width(), system.height()), (1920.0, 1080.0));
	}
}
