//! Tunable parameter tables for the particle field.
//!
//! Every behavioral difference between the backdrop variants lives here, so the
//! simulation and renderer stay a single implementation.
//!
//! # Policies
//!
//! - [`BoundaryPolicy`]: what happens when a particle crosses a surface edge.
//! - [`Lifecycle`]: whether particles age and respawn in place.
//! - [`OpacityPolicy`]: how the drawn opacity derives from a particle's base opacity.
//! - [`EdgeTint`]: how connection lines are colored.
//!
//! Units are per frame: velocities in pixels per frame, ages in frames.

use serde::Deserialize;

/// Hard cap on particle count. Connections are O(n²) per frame.
pub const MAX_PARTICLES: usize = 100;

/// Viewport width (logical px) below which the mobile count applies.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Named parameter tables matching the three backdrop variants.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
	/// Bouncing, fading particles with plain connections.
	Basic,
	/// Sparse, slow particles with faint connections.
	Refined,
	/// Glowing, pulsing, drifting particles with gradient connections.
	#[default]
	Ultra,
}

impl Preset {
	/// The full parameter table for this preset.
	pub fn config(self) -> FieldConfig {
		match self {
			Preset::Basic => FieldConfig::basic(),
			Preset::Refined => FieldConfig::refined(),
			Preset::Ultra => FieldConfig::ultra(),
		}
	}

	/// Opacity of the canvas layer itself.
	pub fn layer_opacity(self) -> f64 {
		match self {
			Preset::Basic | Preset::Refined => 0.4,
			Preset::Ultra => 0.6,
		}
	}
}

/// Behavior when a particle leaves the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryPolicy {
	/// Invert the velocity component that crossed, then clamp.
	Bounce,
	/// Reset the particle in place at a new random position.
	Respawn,
}

/// Whether particles have a finite life.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lifecycle {
	/// Particles live for the whole mount.
	Infinite,
	/// Each particle draws `max_age` from `min_age..=max_age` frames and
	/// respawns once its age reaches it. With `stagger`, starting ages are
	/// spread over the first half of each life so respawns don't happen in bulk.
	Finite {
		/// Shortest life in frames.
		min_age: u32,
		/// Longest life in frames.
		max_age: u32,
		/// Spread the initial ages.
		stagger: bool,
	},
}

/// How the drawn opacity derives from a particle's base opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OpacityPolicy {
	/// Draw at base opacity.
	Fixed,
	/// `base × (1 − age/max_age)`. Behaves like `Fixed` without a finite lifecycle.
	FadeWithAge,
	/// `base × (0.5 + 0.5 sin(time × rate + index))`.
	Pulse {
		/// Angular speed of the pulse, in radians per unit of field time.
		rate: f64,
	},
}

impl OpacityPolicy {
	/// Opacity multiplier for a particle.
	///
	/// `life` is `age / max_age`, or `None` when the particle does not age.
	pub fn apply(&self, life: Option<f64>, time: f64, index: usize) -> f64 {
		match self {
			OpacityPolicy::Fixed => 1.0,
			OpacityPolicy::FadeWithAge => match life {
				Some(ratio) => (1.0 - ratio).clamp(0.0, 1.0),
				None => 1.0,
			},
			OpacityPolicy::Pulse { rate } => 0.5 + 0.5 * (time * rate + index as f64).sin(),
		}
	}
}

/// One halo circle drawn behind a particle's core.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowLayer {
	/// Halo radius as a multiple of the particle size.
	pub radius_scale: f64,
	/// Halo opacity relative to the particle's drawn opacity.
	pub alpha: f64,
}

/// Coloring of connection lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeTint {
	/// Linear gradient from the first particle's color to the second's.
	Gradient,
	/// Solid line in the lower-index particle's color.
	Source,
}

/// Connection line configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionStyle {
	/// Pairs strictly closer than this (px) are connected.
	pub threshold: f64,
	/// Opacity at zero distance. Falls off linearly to 0 at `threshold`.
	pub opacity_scale: f64,
	/// Stroke width in pixels.
	pub line_width: f64,
	/// How the line is colored.
	pub tint: EdgeTint,
}

impl ConnectionStyle {
	/// Line opacity for two particles `distance` apart, or `None` if they are
	/// not connected.
	pub fn opacity(&self, distance: f64) -> Option<f64> {
		if distance < self.threshold {
			Some(self.opacity_scale * (1.0 - distance / self.threshold))
		} else {
			None
		}
	}
}

/// Mobile/desktop particle counts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleCount {
	/// Count below the breakpoint.
	pub mobile: usize,
	/// Count at or above the breakpoint.
	pub desktop: usize,
	/// Viewport width below which `mobile` applies.
	pub breakpoint: f64,
}

impl ParticleCount {
	/// Particle count for a viewport width, capped at [`MAX_PARTICLES`].
	pub fn for_width(&self, viewport_width: f64) -> usize {
		let count = if viewport_width < self.breakpoint {
			self.mobile
		} else {
			self.desktop
		};
		count.min(MAX_PARTICLES)
	}
}

/// Small sinusoidal wander added on top of velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drift {
	/// Peak displacement per frame, in pixels.
	pub amplitude: f64,
}

/// Complete particle field configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
	/// Particle count by viewport width.
	pub count: ParticleCount,
	/// Each velocity component is drawn from `(-speed, speed)`.
	pub speed: f64,
	/// Particle radius range `(min, max)` in pixels.
	pub size: (f64, f64),
	/// Base opacity range `(min, max)`.
	pub opacity: (f64, f64),
	/// Halo layers, outermost first.
	pub glow: Vec<GlowLayer>,
	/// Proximity lines.
	pub connection: ConnectionStyle,
	/// Edge behavior.
	pub boundary: BoundaryPolicy,
	/// Aging and respawn.
	pub lifecycle: Lifecycle,
	/// Drawn opacity.
	pub opacity_policy: OpacityPolicy,
	/// Optional sinusoidal wander.
	pub drift: Option<Drift>,
	/// Increment of the global animation clock per frame.
	pub time_step: f64,
}

impl FieldConfig {
	/// Bouncing particles that fade out over a finite life.
	pub fn basic() -> Self {
		Self {
			count: ParticleCount {
				mobile: 50,
				desktop: 100,
				breakpoint: MOBILE_BREAKPOINT,
			},
			speed: 1.0,
			size: (1.0, 4.0),
			opacity: (0.2, 0.7),
			glow: Vec::new(),
			connection: ConnectionStyle {
				threshold: 100.0,
				opacity_scale: 0.2,
				line_width: 1.0,
				tint: EdgeTint::Source,
			},
			boundary: BoundaryPolicy::Bounce,
			lifecycle: Lifecycle::Finite {
				min_age: 100,
				max_age: 300,
				stagger: false,
			},
			opacity_policy: OpacityPolicy::FadeWithAge,
			drift: None,
			time_step: 0.01,
		}
	}

	/// Few, slow, immortal particles.
	pub fn refined() -> Self {
		Self {
			count: ParticleCount {
				mobile: 20,
				desktop: 40,
				breakpoint: MOBILE_BREAKPOINT,
			},
			speed: 0.1,
			size: (1.0, 3.0),
			opacity: (0.1, 0.4),
			glow: Vec::new(),
			connection: ConnectionStyle {
				threshold: 100.0,
				opacity_scale: 0.1,
				line_width: 1.0,
				tint: EdgeTint::Source,
			},
			boundary: BoundaryPolicy::Bounce,
			lifecycle: Lifecycle::Infinite,
			opacity_policy: OpacityPolicy::Fixed,
			drift: None,
			time_step: 0.01,
		}
	}

	/// Glowing particles that pulse, drift and respawn at the edges.
	pub fn ultra() -> Self {
		Self {
			count: ParticleCount {
				mobile: 50,
				desktop: 100,
				breakpoint: MOBILE_BREAKPOINT,
			},
			speed: 0.25,
			size: (1.0, 4.0),
			opacity: (0.1, 0.6),
			glow: vec![
				GlowLayer {
					radius_scale: 3.0,
					alpha: 0.125,
				},
				GlowLayer {
					radius_scale: 1.5,
					alpha: 0.25,
				},
			],
			connection: ConnectionStyle {
				threshold: 120.0,
				opacity_scale: 0.3,
				line_width: 2.0,
				tint: EdgeTint::Gradient,
			},
			boundary: BoundaryPolicy::Respawn,
			lifecycle: Lifecycle::Finite {
				min_age: 100,
				max_age: 200,
				stagger: true,
			},
			opacity_policy: OpacityPolicy::Pulse { rate: 2.0 },
			drift: Some(Drift { amplitude: 0.1 }),
			time_step: 0.01,
		}
	}
}

impl Default for FieldConfig {
	fn default() -> Self {
		Preset::default().config()
	}
}
