//! Proximity links between particles.
//!
//! Two particles closer than the link distance `T` are joined by a line whose
//! opacity fades linearly from the base link alpha at distance zero to nothing
//! at `T`. The all-pairs scan is fine for a few hundred particles; the grid
//! variant buckets particles into `T`-sized cells so only neighbouring cells are
//! compared, and yields exactly the same links.

use super::config::FieldConfig;
use super::particles::Particle;

/// A connection between particles `a` and `b` (`a < b`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// Lower particle index.
	pub a: usize,
	/// Higher particle index.
	pub b: usize,
	/// Euclidean distance between the two.
	pub distance: f64,
	/// Stroke opacity.
	pub alpha: f64,
}

/// Stroke alpha for a pair `distance` apart, or `None` when they are too far.
pub fn link_alpha(distance: f64, config: &FieldConfig) -> Option<f64> {
	if distance < config.link_distance {
		Some(config.link_alpha * (1.0 - distance / config.link_distance))
	} else {
		None
	}
}

fn try_link(particles: &[Particle], i: usize, j: usize, config: &FieldConfig) -> Option<Link> {
	let (dx, dy) = (particles[i].x() - particles[j].x(), particles[i].y() - particles[j].y());
	let distance = (dx * dx + dy * dy).sqrt();
	link_alpha(distance, config).map(|alpha| Link {
		a: i.min(j),
		b: i.max(j),
		distance,
		alpha,
	})
}

/// Check every unordered pair.
pub fn all_pairs(particles: &[Particle], config: &FieldConfig) -> Vec<Link> {
	let mut links = Vec::new();
	for i in 0..particles.len() {
		for j in (i + 1)..particles.len() {
			if let Some(link) = try_link(particles, i, j, config) {
				links.push(link);
			}
		}
	}
	links
}

/// Most grid cells allowed per particle before falling back to [`all_pairs`].
const MAX_CELLS_PER_PARTICLE: usize = 16;

/// Spatial-hash variant of [`all_pairs`]. Output is sorted by `(a, b)`, which is
/// the same order `all_pairs` produces.
///
/// A link distance that is tiny next to the surface would need a huge number of
/// cells; past `MAX_CELLS_PER_PARTICLE` cells per particle the scan falls back
/// to [`all_pairs`].
pub fn grid(particles: &[Particle], config: &FieldConfig, width: f64, height: f64) -> Vec<Link> {
	let cell = config.link_distance;
	// Particles may sit exactly on the far edge or, right after a resize,
	// outside the bounds entirely.
	let max_x = particles.iter().fold(width, |m, p| m.max(p.x()));
	let max_y = particles.iter().fold(height, |m, p| m.max(p.y()));
	let cols = ((max_x / cell).floor() as usize).saturating_add(1).max(1);
	let rows = ((max_y / cell).floor() as usize).saturating_add(1).max(1);
	let limit = particles.len().max(1).saturating_mul(MAX_CELLS_PER_PARTICLE);
	match cols.checked_mul(rows) {
		Some(cells) if cells <= limit => {}
		_ => return all_pairs(particles, config),
	}

	let cell_of = |p: &Particle| {
		let col = ((p.x().max(0.0) / cell).floor() as usize).min(cols - 1);
		let row = ((p.y().max(0.0) / cell).floor() as usize).min(rows - 1);
		(col, row)
	};

	let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); cols * rows];
	for (i, p) in particles.iter().enumerate() {
		let (col, row) = cell_of(p);
		buckets[row * cols + col].push(i);
	}

	let mut links = Vec::new();
	for (i, p) in particles.iter().enumerate() {
		let (col, row) = cell_of(p);
		for r in row.saturating_sub(1)..=(row + 1).min(rows - 1) {
			for c in col.saturating_sub(1)..=(col + 1).min(cols - 1) {
				for &j in &buckets[r * cols + c] {
					if j <= i {
						continue;
					}
					if let Some(link) = try_link(particles, i, j, config) {
						links.push(link);
					}
				}
			}
		}
	}
	links.sort_by_key(|l| (l.a, l.b));
	links
}

/// Find links using the strategy the config selects for this many particles.
pub fn connections(particles: &[Particle], config: &FieldConfig, width: f64, height: f64) -> Vec<Link> {
	if config.use_grid(particles.len()) {
		grid(particles, config, width, height)
	} else {
		all_pairs(particles, config)
	}
}

/// Symmetric membership test.
pub fn is_connected(links: &[Link], i: usize, j: usize) -> bool {
	let (a, b) = (i.min(j), i.max(j));
	links.iter().any(|l| l.a == a && l.b == b)
}
