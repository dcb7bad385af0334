//! Frame rendering for the particle field.
//!
//! Drawing goes through the [`Surface`] trait so a frame can be replayed
//! against something other than a browser canvas. Passes, in z-order:
//! 1. Clear (no accumulation between frames)
//! 2. Particles: glow layers outermost first, then the core circle
//! 3. Connections

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::config::EdgeTint;
use super::particles::ParticleField;
use super::theme::Color;

/// Below this opacity a particle is not drawn at all.
const MIN_VISIBLE_ALPHA: f64 = 0.001;

/// Stroke style for a connection line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stroke {
	/// One color along the whole line.
	Solid(Color),
	/// Linear gradient from the start point's color to the end point's.
	Gradient(Color, Color),
}

/// The drawing operations a frame needs.
pub trait Surface {
	/// Clear the whole `width × height` area.
	fn clear(&mut self, width: f64, height: f64);
	/// Fill a circle centered at `(x, y)`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
	/// Stroke a straight line of the given width.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, stroke: Stroke);
}

/// Renders one complete frame of the field.
pub fn render<S: Surface>(field: &ParticleField, surface: &mut S) {
	surface.clear(field.width(), field.height());
	draw_particles(field, surface);
	draw_connections(field, surface);
}

fn draw_particles<S: Surface>(field: &ParticleField, surface: &mut S) {
	let glow = &field.config().glow;

	for (i, p) in field.particles().iter().enumerate() {
		let alpha = field.opacity_of(i);
		if alpha < MIN_VISIBLE_ALPHA {
			continue;
		}
		let color = field.color_of(p);

		for layer in glow {
			surface.fill_circle(
				p.x,
				p.y,
				p.size * layer.radius_scale,
				color.with_alpha(alpha * layer.alpha),
			);
		}
		surface.fill_circle(p.x, p.y, p.size, color.with_alpha(alpha));
	}
}

fn draw_connections<S: Surface>(field: &ParticleField, surface: &mut S) {
	let style = field.config().connection;
	let particles = field.particles();

	for c in field.connections() {
		let (a, b) = (&particles[c.a], &particles[c.b]);
		let from = field.color_of(a).with_alpha(c.opacity);
		let stroke = match style.tint {
			EdgeTint::Gradient => Stroke::Gradient(from, field.color_of(b).with_alpha(c.opacity)),
			EdgeTint::Source => Stroke::Solid(from),
		};
		surface.stroke_line((a.x, a.y), (b.x, b.y), style.line_width, stroke);
	}
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, TAU);
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, stroke: Stroke) {
		match stroke {
			Stroke::Solid(color) => self.set_stroke_style_str(&color.to_css()),
			Stroke::Gradient(start, end) => {
				let gradient = self.create_linear_gradient(from.0, from.1, to.0, to.1);
				let _ = gradient.add_color_stop(0.0, &start.to_css());
				let _ = gradient.add_color_stop(1.0, &end.to_css());
				#[allow(deprecated)]
				self.set_stroke_style(&gradient);
			}
		}
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use rand::SeedableRng;
	use rand_pcg::Pcg32;

	use super::*;
	use crate::components::particle_field::config::{
		ConnectionStyle, FieldConfig, OpacityPolicy, Preset,
	};
	use crate::components::particle_field::particles::Particle;
	use crate::components::particle_field::theme::{Theme, Tint};

	#[derive(Clone, Debug, PartialEq)]
	pub(crate) enum Op {
		Clear(f64, f64),
		Circle { x: f64, y: f64, radius: f64, color: Color },
		Line { from: (f64, f64), to: (f64, f64), stroke: Stroke },
	}

	/// Records every drawing call.
	#[derive(Default)]
	pub(crate) struct Recorder {
		pub(crate) ops: Vec<Op>,
	}

	impl Recorder {
		pub(crate) fn lines(&self) -> Vec<&Op> {
			self.ops.iter().filter(|op| matches!(op, Op::Line { .. })).collect()
		}

		pub(crate) fn circles(&self) -> Vec<&Op> {
			self.ops.iter().filter(|op| matches!(op, Op::Circle { .. })).collect()
		}
	}

	impl Surface for Recorder {
		fn clear(&mut self, width: f64, height: f64) {
			self.ops.push(Op::Clear(width, height));
		}

		fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
			self.ops.push(Op::Circle {
				x,
				y,
				radius,
				color,
			});
		}

		fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), _width: f64, stroke: Stroke) {
			self.ops.push(Op::Line { from, to, stroke });
		}
	}

	fn dot(x: f64, y: f64, tint: Tint) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			size: 2.0,
			base_opacity: 0.5,
			tint,
			age: 0,
			max_age: 0,
		}
	}

	fn field_of(config: FieldConfig, particles: Vec<Particle>) -> ParticleField {
		ParticleField::with_particles(
			config,
			Theme::named("neon").palette(),
			800.0,
			600.0,
			particles,
			Pcg32::seed_from_u64(0),
		)
	}

	#[test]
	fn test_frame_starts_with_full_clear() {
		let f = field_of(Preset::Refined.config(), vec![dot(10.0, 10.0, Tint::Primary)]);
		let mut rec = Recorder::default();
		render(&f, &mut rec);
		assert_eq!(rec.ops[0], Op::Clear(800.0, 600.0));
		assert_eq!(rec.ops.iter().filter(|op| matches!(op, Op::Clear(..))).count(), 1);
	}

	#[test]
	fn test_glow_layers_precede_core() {
		let mut config = Preset::Ultra.config();
		config.opacity_policy = OpacityPolicy::Fixed;
		let f = field_of(config, vec![dot(10.0, 10.0, Tint::Secondary)]);
		let mut rec = Recorder::default();
		render(&f, &mut rec);

		let circles = rec.circles();
		let radii: Vec<f64> = circles
			.iter()
			.map(|op| match op {
				Op::Circle { radius, .. } => *radius,
				_ => unreachable!(),
			})
			.collect();
		assert_eq!(radii, vec![6.0, 3.0, 2.0]);

		let Op::Circle { color, .. } = circles[2] else {
			unreachable!()
		};
		assert_eq!(*color, Theme::named("neon").secondary.with_alpha(0.5));
	}

	#[test]
	fn test_close_pair_draws_one_faint_line() {
		let mut config = Preset::Refined.config();
		config.connection = ConnectionStyle {
			threshold: 100.0,
			opacity_scale: 0.2,
			..config.connection
		};
		let f = field_of(
			config,
			vec![dot(100.0, 100.0, Tint::Primary), dot(150.0, 100.0, Tint::Secondary)],
		);
		let mut rec = Recorder::default();
		render(&f, &mut rec);

		let lines = rec.lines();
		assert_eq!(lines.len(), 1);
		let Op::Line { stroke: Stroke::Solid(color), .. } = lines[0] else {
			panic!("expected a solid line, got {:?}", lines[0]);
		};
		assert!((color.a - 0.1).abs() < 1e-12);
		assert_eq!(color.with_alpha(1.0), Theme::named("neon").primary);
	}

	#[test]
	fn test_gradient_edges_blend_both_colors() {
		let f = field_of(
			Preset::Ultra.config(),
			vec![dot(0.0, 0.0, Tint::Primary), dot(30.0, 40.0, Tint::Secondary)],
		);
		let mut rec = Recorder::default();
		render(&f, &mut rec);

		let theme = Theme::named("neon");
		match rec.lines()[..] {
			[Op::Line {
				from,
				to,
				stroke: Stroke::Gradient(start, end),
			}] => {
				assert_eq!(*from, (0.0, 0.0));
				assert_eq!(*to, (30.0, 40.0));
				assert_eq!(start.with_alpha(1.0), theme.primary);
				assert_eq!(end.with_alpha(1.0), theme.secondary);
				assert!((start.a - 0.3 * (1.0 - 50.0 / 120.0)).abs() < 1e-12);
			}
			ref other => panic!("unexpected lines: {:?}", other),
		}
	}

	#[test]
	fn test_distant_particles_are_not_connected() {
		let f = field_of(
			Preset::Basic.config(),
			vec![dot(0.0, 0.0, Tint::Primary), dot(500.0, 500.0, Tint::Primary)],
		);
		let mut rec = Recorder::default();
		render(&f, &mut rec);
		assert!(rec.lines().is_empty());
		assert_eq!(rec.circles().len(), 2);
	}

	#[test]
	fn test_invisible_particles_are_skipped() {
		let mut p = dot(10.0, 10.0, Tint::Primary);
		p.base_opacity = 0.0;
		let f = field_of(Preset::Refined.config(), vec![p]);
		let mut rec = Recorder::default();
		render(&f, &mut rec);
		assert!(rec.circles().is_empty());
	}
}
