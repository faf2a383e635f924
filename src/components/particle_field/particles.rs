//! Particle state and motion.
//!
//! Particles move in a straight line forever: each one gets a speed and a
//! heading at creation and neither ever changes. Leaving one edge of the
//! surface puts the particle back on the opposite edge.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::FieldConfig;
use super::theme::{Color, ThemeMode};

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	x: f64,
	y: f64,
	radius: f64,
	speed: f64,
	direction: f64,
	shade: [f64; 3],
	alpha: f64,
	color: Color,
}

impl Particle {
	/// Particle colored from `mode`'s palette.
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		x: f64,
		y: f64,
		radius: f64,
		speed: f64,
		direction: f64,
		shade: [f64; 3],
		alpha: f64,
		mode: ThemeMode,
	) -> Self {
		Self {
			x,
			y,
			radius,
			speed,
			direction,
			shade,
			alpha,
			color: mode.palette().particle_color(shade, alpha),
		}
	}

	/// Horizontal position.
	pub fn x(&self) -> f64 {
		self.x
	}

	/// Vertical position.
	pub fn y(&self) -> f64 {
		self.y
	}

	/// Disc radius.
	pub fn radius(&self) -> f64 {
		self.radius
	}

	/// Distance covered per frame.
	pub fn speed(&self) -> f64 {
		self.speed
	}

	/// Heading in radians, `[0, 2π)`.
	pub fn direction(&self) -> f64 {
		self.direction
	}

	/// Fill opacity.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Fill color for the current theme.
	pub fn color(&self) -> Color {
		self.color
	}

	fn advance(&mut self, width: f64, height: f64) {
		self.x += self.direction.cos() * self.speed;
		self.y += self.direction.sin() * self.speed;

		if self.x < 0.0 {
			self.x = width;
		}
		if self.x > width {
			self.x = 0.0;
		}
		if self.y < 0.0 {
			self.y = height;
		}
		if self.y > height {
			self.y = 0.0;
		}
	}

	fn recolor(&mut self, mode: ThemeMode) {
		self.color = mode.palette().particle_color(self.shade, self.alpha);
	}
}

/// The full particle population plus the bounds it wraps within.
#[derive(Clone, Debug)]
pub struct ParticleField {
	particles: Vec<Particle>,
	width: f64,
	height: f64,
	mode: ThemeMode,
}

impl ParticleField {
	/// Generate a fresh population sized for `width`.
	pub fn generate<R: Rng>(
		config: &FieldConfig,
		width: f64,
		height: f64,
		mode: ThemeMode,
		rng: &mut R,
	) -> Self {
		let count = config.particle_count(width);
		let mut particles = Vec::with_capacity(count);

		for _ in 0..count {
			let shade = [
				rng.gen_range(0.0..1.0),
				rng.gen_range(0.0..1.0),
				rng.gen_range(0.0..1.0),
			];
			particles.push(Particle::new(
				rng.gen_range(0.0..1.0) * width,
				rng.gen_range(0.0..1.0) * height,
				config.radius.lerp(rng.gen_range(0.0..1.0)),
				config.speed.lerp(rng.gen_range(0.0..1.0)),
				rng.gen_range(0.0..TAU),
				shade,
				config.alpha.lerp(rng.gen_range(0.0..1.0)),
				mode,
			));
		}

		Self {
			particles,
			width,
			height,
			mode,
		}
	}

	/// Build a field from existing particles.
	pub fn from_particles(particles: Vec<Particle>, width: f64, height: f64, mode: ThemeMode) -> Self {
		Self {
			particles,
			width,
			height,
			mode,
		}
	}

	/// Field with no particles.
	pub fn empty() -> Self {
		Self::from_particles(Vec::new(), 1.0, 1.0, ThemeMode::default())
	}

	/// All particles in draw order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether there are no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Wrap width.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Wrap height.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Theme the colors were derived for.
	pub fn mode(&self) -> ThemeMode {
		self.mode
	}

	/// Advance every particle by one frame.
	pub fn step(&mut self) {
		for p in &mut self.particles {
			p.advance(self.width, self.height);
		}
	}

	/// Visit each particle with its pre-step state, then advance it.
	/// Lets the renderer draw and move in a single pass.
	pub fn step_with<F: FnMut(&Particle)>(&mut self, mut before: F) {
		for p in &mut self.particles {
			before(p);
			p.advance(self.width, self.height);
		}
	}

	/// Change the wrap bounds. Positions are left where they are; anything
	/// outside the new bounds wraps on its next step.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Re-derive every particle's color for `mode`.
	pub fn recolor(&mut self, mode: ThemeMode) {
		if self.mode == mode {
			return;
		}
		for p in &mut self.particles {
			p.recolor(mode);
		}
		self.mode = mode;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	fn field(config: &FieldConfig, w: f64, h: f64, seed: u64) -> ParticleField {
		let mut rng = SmallRng::seed_from_u64(seed);
		ParticleField::generate(config, w, h, ThemeMode::Dark, &mut rng)
	}

	#[test]
	fn generation_respects_bands() {
		let config = FieldConfig::dense();
		let f = field(&config, 1280.0, 720.0, 7);
		assert_eq!(f.len(), 180);
		for p in f.particles() {
			assert!((0.0..1280.0).contains(&p.x()));
			assert!((0.0..720.0).contains(&p.y()));
			assert!(p.radius() >= config.radius.min && p.radius() < config.radius.max);
			assert!(p.speed() >= config.speed.min && p.speed() < config.speed.max);
			assert!(p.alpha() >= config.alpha.min && p.alpha() < config.alpha.max);
			assert!((0.0..TAU).contains(&p.direction()));
			assert_eq!(p.color().a, p.alpha());
		}
	}

	#[test]
	fn same_seed_same_field() {
		let config = FieldConfig::default();
		let a = field(&config, 800.0, 600.0, 42);
		let b = field(&config, 800.0, 600.0, 42);
		assert_eq!(a.particles(), b.particles());
	}

	#[test]
	fn one_frame_scenario() {
		let config = FieldConfig::sparse();
		let mut f = field(&config, 700.0, 500.0, 1234);
		assert_eq!(f.len(), 70);
		let before = f.particles().to_vec();
		f.step();

		for (old, new) in before.iter().zip(f.particles()) {
			let mut x = old.x() + old.direction().cos() * old.speed();
			let mut y = old.y() + old.direction().sin() * old.speed();
			if x < 0.0 {
				x = 700.0;
			} else if x > 700.0 {
				x = 0.0;
			}
			if y < 0.0 {
				y = 500.0;
			} else if y > 500.0 {
				y = 0.0;
			}
			assert_eq!(new.x(), x);
			assert_eq!(new.y(), y);
		}
	}

	#[test]
	fn position_reads_back_from_constructor() {
		let p = Particle::new(12.5, 40.25, 2.0, 1.0, 0.0, [0.5; 3], 0.3, ThemeMode::Light);
		assert_eq!((p.x(), p.y()), (12.5, 40.25));
	}

	#[test]
	fn negative_exit_lands_on_far_edge() {
		let p = Particle::new(0.1, 250.0, 2.0, 1.0, std::f64::consts::PI, [0.5; 3], 0.3, ThemeMode::Dark);
		let mut f = ParticleField::from_particles(vec![p], 700.0, 500.0, ThemeMode::Dark);
		f.step();
		assert_eq!(f.particles()[0].x(), 700.0);

		f.step();
		assert!(f.particles()[0].x() < 700.0);
	}

	#[test]
	fn positive_exit_lands_on_zero() {
		let p = Particle::new(350.0, 499.5, 2.0, 1.0, std::f64::consts::FRAC_PI_2, [0.5; 3], 0.3, ThemeMode::Dark);
		let mut f = ParticleField::from_particles(vec![p], 700.0, 500.0, ThemeMode::Dark);
		f.step();
		assert_eq!(f.particles()[0].y(), 0.0);
	}

	#[test]
	fn particles_never_escape() {
		let config = FieldConfig::dense();
		let mut f = field(&config, 640.0, 360.0, 99);
		for _ in 0..2000 {
			f.step();
			for p in f.particles() {
				assert!(p.x() >= 0.0 && p.x() <= 640.0, "x escaped: {}", p.x());
				assert!(p.y() >= 0.0 && p.y() <= 360.0, "y escaped: {}", p.y());
			}
		}
	}

	#[test]
	fn motion_parameters_are_immutable() {
		let config = FieldConfig::default();
		let mut f = field(&config, 900.0, 600.0, 5);
		let before: Vec<_> = f
			.particles()
			.iter()
			.map(|p| (p.radius(), p.speed(), p.direction()))
			.collect();
		for _ in 0..100 {
			f.step();
		}
		f.recolor(ThemeMode::Light);
		let after: Vec<_> = f
			.particles()
			.iter()
			.map(|p| (p.radius(), p.speed(), p.direction()))
			.collect();
		assert_eq!(before, after);
	}

	#[test]
	fn swapping_themes_makes_twins_match() {
		let twin = |mode| Particle::new(10.0, 20.0, 2.0, 0.5, 1.0, [0.3, 0.6, 0.9], 0.25, mode);
		let mut a = ParticleField::from_particles(vec![twin(ThemeMode::Dark)], 100.0, 100.0, ThemeMode::Dark);
		let mut b = ParticleField::from_particles(vec![twin(ThemeMode::Light)], 100.0, 100.0, ThemeMode::Light);
		let (a_orig, b_orig) = (a.particles()[0].color(), b.particles()[0].color());
		assert_ne!(a_orig, b_orig);

		a.step();
		a.recolor(ThemeMode::Light);
		b.recolor(ThemeMode::Dark);
		b.step();
		b.step();

		assert_eq!(a.particles()[0].color(), b_orig);
		assert_eq!(b.particles()[0].color(), a_orig);
		assert_ne!(a.particles()[0].x(), b.particles()[0].x());
	}

	#[test]
	fn recolor_leaves_positions_alone() {
		let config = FieldConfig::default();
		let mut f = field(&config, 800.0, 600.0, 3);
		let positions: Vec<_> = f.particles().iter().map(|p| (p.x(), p.y())).collect();
		f.recolor(ThemeMode::Light);
		assert_eq!(f.mode(), ThemeMode::Light);
		let after: Vec<_> = f.particles().iter().map(|p| (p.x(), p.y())).collect();
		assert_eq!(positions, after);
	}

	#[test]
	fn resize_preserves_positions() {
		let config = FieldConfig::default();
		let mut f = field(&config, 800.0, 600.0, 11);
		let positions: Vec<_> = f.particles().iter().map(|p| (p.x(), p.y())).collect();
		f.resize(400.0, 300.0);
		assert_eq!(f.width(), 400.0);
		let after: Vec<_> = f.particles().iter().map(|p| (p.x(), p.y())).collect();
		assert_eq!(positions, after);

		f.step();
		for p in f.particles() {
			assert!(p.x() <= 400.0 && p.y() <= 300.0);
		}
	}
}
