//! Particle state and per-frame physics.
//!
//! The field owns a fixed-size collection for the lifetime of one mount.
//! Particles that die or leave the surface are reset in place, never removed,
//! and every update ends with positions clamped to the surface.

use rand::Rng;
use rand_pcg::Pcg32;

use super::config::{BoundaryPolicy, FieldConfig, Lifecycle};
use super::theme::{Color, Palette, Tint};

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in surface pixels.
	pub x: f64,
	/// Vertical position in surface pixels.
	pub y: f64,
	/// Horizontal velocity in pixels per frame.
	pub vx: f64,
	/// Vertical velocity in pixels per frame.
	pub vy: f64,
	/// Core radius in pixels.
	pub size: f64,
	/// Opacity before the preset's opacity policy is applied.
	pub base_opacity: f64,
	/// Which theme color the particle is drawn in.
	pub tint: Tint,
	/// Frames lived since the last (re)spawn. Unused with an infinite lifecycle.
	pub age: u32,
	/// Age at which the particle respawns. 0 with an infinite lifecycle.
	pub max_age: u32,
}

/// A line between two particles closer than the connection threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	/// Lower particle index.
	pub a: usize,
	/// Higher particle index.
	pub b: usize,
	/// Line opacity, already scaled by distance.
	pub opacity: f64,
}

/// Owns the particles and the random source that spawns them.
pub struct ParticleField {
	config: FieldConfig,
	palette: Palette,
	particles: Vec<Particle>,
	width: f64,
	height: f64,
	time: f64,
	rng: Pcg32,
}

pub(super) fn sample(rng: &mut Pcg32, (lo, hi): (f64, f64)) -> f64 {
	if hi > lo { rng.random_range(lo..hi) } else { lo }
}

fn sample_max_age(rng: &mut Pcg32, lifecycle: &Lifecycle) -> u32 {
	match *lifecycle {
		Lifecycle::Infinite => 0,
		Lifecycle::Finite {
			min_age, max_age, ..
		} => {
			let lo = min_age.max(1);
			rng.random_range(lo..=max_age.max(lo))
		}
	}
}

pub(super) fn sample_tint(rng: &mut Pcg32) -> Tint {
	if rng.random_bool(0.5) {
		Tint::Primary
	} else {
		Tint::Secondary
	}
}

fn spawn(rng: &mut Pcg32, config: &FieldConfig, width: f64, height: f64) -> Particle {
	let max_age = sample_max_age(rng, &config.lifecycle);
	let age = match config.lifecycle {
		Lifecycle::Finite { stagger: true, .. } => rng.random_range(0..=max_age / 2),
		_ => 0,
	};
	Particle {
		x: sample(rng, (0.0, width)),
		y: sample(rng, (0.0, height)),
		vx: sample(rng, (-config.speed, config.speed)),
		vy: sample(rng, (-config.speed, config.speed)),
		size: sample(rng, config.size),
		base_opacity: sample(rng, config.opacity),
		tint: sample_tint(rng),
		age,
		max_age,
	}
}

/// Resets a particle in place. Base opacity is kept; everything else is re-rolled.
fn respawn(p: &mut Particle, rng: &mut Pcg32, config: &FieldConfig, width: f64, height: f64) {
	p.x = sample(rng, (0.0, width));
	p.y = sample(rng, (0.0, height));
	p.vx = sample(rng, (-config.speed, config.speed));
	p.vy = sample(rng, (-config.speed, config.speed));
	p.size = sample(rng, config.size);
	p.tint = sample_tint(rng);
	p.age = 0;
	p.max_age = sample_max_age(rng, &config.lifecycle);
}

impl ParticleField {
	/// Populates a field sized `width × height`. The particle count is decided
	/// here from `width` and never changes afterwards.
	pub fn new(
		config: FieldConfig,
		palette: Palette,
		width: f64,
		height: f64,
		mut rng: Pcg32,
	) -> Self {
		let (width, height) = (width.max(0.0), height.max(0.0));
		let count = config.count.for_width(width);
		let particles = (0..count)
			.map(|_| spawn(&mut rng, &config, width, height))
			.collect();

		Self {
			config,
			palette,
			particles,
			width,
			height,
			time: 0.0,
			rng,
		}
	}

	/// Builds a field around an explicit particle set.
	pub fn with_particles(
		config: FieldConfig,
		palette: Palette,
		width: f64,
		height: f64,
		particles: Vec<Particle>,
		rng: Pcg32,
	) -> Self {
		Self {
			config,
			palette,
			particles,
			width: width.max(0.0),
			height: height.max(0.0),
			time: 0.0,
			rng,
		}
	}

	/// The particles in spawn order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Number of particles, fixed for the life of the field.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// True for a field on a zero-count configuration.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Parameters the field was built with.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Surface width in pixels.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Surface height in pixels.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Resolved color of a particle's tint.
	pub fn color_of(&self, particle: &Particle) -> Color {
		self.palette.color(particle.tint)
	}

	/// Advance every particle by one frame.
	pub fn update(&mut self) {
		let Self {
			config,
			particles,
			width,
			height,
			time,
			rng,
			..
		} = self;
		let (w, h) = (*width, *height);
		*time += config.time_step;

		for (i, p) in particles.iter_mut().enumerate() {
			p.x += p.vx;
			p.y += p.vy;
			if let Some(drift) = config.drift {
				let phase = *time + i as f64;
				p.x += phase.sin() * drift.amplitude;
				p.y += phase.cos() * drift.amplitude;
			}

			let out_x = p.x < 0.0 || p.x > w;
			let out_y = p.y < 0.0 || p.y > h;
			let mut respawned = false;
			match config.boundary {
				BoundaryPolicy::Bounce => {
					if out_x {
						p.vx = -p.vx;
					}
					if out_y {
						p.vy = -p.vy;
					}
				}
				BoundaryPolicy::Respawn => {
					if out_x || out_y {
						respawn(p, rng, config, w, h);
						respawned = true;
					}
				}
			}

			if !respawned && matches!(config.lifecycle, Lifecycle::Finite { .. }) {
				p.age += 1;
				if p.age >= p.max_age {
					respawn(p, rng, config, w, h);
				}
			}

			p.x = p.x.clamp(0.0, w);
			p.y = p.y.clamp(0.0, h);
		}
	}

	/// Adopt new surface bounds. Particles are neither reseeded nor moved;
	/// the next update brings any that fell outside back in.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
	}

	/// Drawn opacity of the particle at `index`.
	pub fn opacity_of(&self, index: usize) -> f64 {
		let Some(p) = self.particles.get(index) else {
			return 0.0;
		};
		let life = match self.config.lifecycle {
			Lifecycle::Finite { .. } if p.max_age > 0 => Some(p.age as f64 / p.max_age as f64),
			_ => None,
		};
		p.base_opacity * self.config.opacity_policy.apply(life, self.time, index)
	}

	/// Every unordered pair closer than the connection threshold, once.
	pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
		let style = self.config.connection;
		self.particles.iter().enumerate().flat_map(move |(i, a)| {
			self.particles[i + 1..]
				.iter()
				.enumerate()
				.filter_map(move |(k, b)| {
					let (dx, dy) = (a.x - b.x, a.y - b.y);
					style
						.opacity((dx * dx + dy * dy).sqrt())
						.map(|opacity| Connection {
							a: i,
							b: i + 1 + k,
							opacity,
						})
				})
		})
	}
}
