//! The particle field engine: lifecycle and the per-frame tick.
//!
//! ```text
//!   Idle --initialize--> Running --teardown--> Stopped
//!                           ^                     |
//!                           +-----initialize------+
//! ```
//!
//! All calls happen on one thread, one at a time. A frame callback that was
//! already queued when `teardown` ran finds the engine `Stopped` and returns
//! without touching the surface.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::FieldConfig;
use super::links;
use super::particles::ParticleField;
use super::surface::{FrameHandle, FrameScheduler, Surface};
use super::theme::ThemeMode;

/// Engine lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
	/// Constructed, never initialized.
	Idle,
	/// Drawing a frame per scheduler callback.
	Running,
	/// Torn down; ticks are ignored until the next `initialize`.
	Stopped,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
	/// False when the frame was skipped.
	pub drawn: bool,
	/// Particles drawn this frame.
	pub particles: usize,
	/// Links stroked this frame.
	pub links: usize,
}

/// Owns the particle field and drives update and render once per frame.
pub struct ParticleFieldEngine<S: Surface, F: FrameScheduler> {
	config: FieldConfig,
	scheduler: F,
	surface: Option<S>,
	field: ParticleField,
	mode: ThemeMode,
	state: EngineState,
	pending: Option<FrameHandle>,
	detached: bool,
	rng: SmallRng,
}

impl<S: Surface, F: FrameScheduler> ParticleFieldEngine<S, F> {
	/// Idle engine seeded from system entropy.
	pub fn new(config: FieldConfig, scheduler: F) -> Self {
		Self::with_rng(config, scheduler, SmallRng::from_entropy())
	}

	/// Engine whose generated fields are reproducible.
	pub fn with_seed(config: FieldConfig, scheduler: F, seed: u64) -> Self {
		Self::with_rng(config, scheduler, SmallRng::seed_from_u64(seed))
	}

	fn with_rng(config: FieldConfig, scheduler: F, rng: SmallRng) -> Self {
		Self {
			config,
			scheduler,
			surface: None,
			field: ParticleField::empty(),
			mode: ThemeMode::default(),
			state: EngineState::Idle,
			pending: None,
			detached: false,
			rng,
		}
	}

	/// Current lifecycle state.
	pub fn state(&self) -> EngineState {
		self.state
	}

	/// Parameters the engine was built with.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Current particle population.
	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	/// Active palette mode.
	pub fn theme(&self) -> ThemeMode {
		self.mode
	}

	/// Take ownership of `surface`, generate a population for its size and
	/// start the frame loop. A running engine is torn down first.
	pub fn initialize(&mut self, surface: S, width: u32, height: u32, mode: ThemeMode) {
		if self.state == EngineState::Running {
			self.teardown();
		}

		let (width, height) = (width.max(1), height.max(1));
		let mut surface = surface;
		surface.set_size(width, height);

		self.field = ParticleField::generate(
			&self.config,
			width as f64,
			height as f64,
			mode,
			&mut self.rng,
		);
		self.surface = Some(surface);
		self.mode = mode;
		self.detached = false;
		self.state = EngineState::Running;
		info!(
			"particle-field: started with {} particles on {}x{}",
			self.field.len(),
			width,
			height
		);

		self.pending = self.scheduler.request_frame();
	}

	/// Track a new surface size. The population is kept as is.
	pub fn resize(&mut self, width: u32, height: u32) {
		let (width, height) = (width.max(1), height.max(1));
		if let Some(surface) = self.surface.as_mut() {
			surface.set_size(width, height);
		}
		self.field.resize(width as f64, height as f64);
		debug!("particle-field: resized to {}x{}", width, height);
	}

	/// Run one frame: clear, draw and move particles, draw links, then queue
	/// the next frame.
	pub fn tick(&mut self) -> FrameStats {
		if self.state != EngineState::Running {
			return FrameStats::default();
		}
		self.pending = None;

		let stats = match self.surface.as_mut() {
			Some(surface) if surface.is_attached() => {
				if self.detached {
					debug!("particle-field: surface reattached");
					self.detached = false;
				}
				Self::draw(surface, &mut self.field, &self.config)
			}
			_ => {
				if !self.detached {
					debug!("particle-field: surface unavailable, skipping frames");
					self.detached = true;
				}
				FrameStats::default()
			}
		};

		self.pending = self.scheduler.request_frame();
		stats
	}

	fn draw(surface: &mut S, field: &mut ParticleField, config: &FieldConfig) -> FrameStats {
		surface.clear();
		field.step_with(|p| surface.fill_disc(p.x(), p.y(), p.radius(), p.color()));

		let palette = field.mode().palette();
		let particles = field.particles();
		let found = links::connections(particles, config, field.width(), field.height());
		for link in &found {
			let (a, b) = (&particles[link.a], &particles[link.b]);
			surface.stroke_line(
				(a.x(), a.y()),
				(b.x(), b.y()),
				palette.link_color(link.alpha),
				config.link_width,
			);
		}

		FrameStats {
			drawn: true,
			particles: particles.len(),
			links: found.len(),
		}
	}

	/// Switch palettes in place. Positions and motion are untouched.
	pub fn set_theme(&mut self, mode: ThemeMode) {
		if self.mode == mode {
			return;
		}
		self.mode = mode;
		self.field.recolor(mode);
		debug!("particle-field: theme set to {}", mode.as_str());
	}

	/// Stop the loop and release the surface. Safe to call repeatedly.
	pub fn teardown(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel_frame(handle);
		}
		if self.surface.take().is_some() {
			info!("particle-field: stopped");
		}
		if self.state == EngineState::Running {
			self.state = EngineState::Stopped;
		}
	}
}
