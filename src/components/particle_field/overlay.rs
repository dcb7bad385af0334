//! Decorative CSS layers stacked over the canvas.
//!
//! The basic backdrop adds two slow gradient washes and a scatter of floating
//! shapes. The ultra backdrop adds small blurred orbs. Layout is drawn once per
//! mount from a seeded generator; colors are resolved from the palette when the
//! styles are rendered, so a theme change recolors the same layout. All motion
//! is CSS keyframe animation, see [`KEYFRAMES`].

use rand_pcg::Pcg32;

use super::config::Preset;
use super::particles::{sample, sample_tint};
use super::theme::{Color, Palette, Tint};

/// Floating shapes in the basic backdrop.
pub const BASIC_SHAPES: usize = 15;

/// Blurred orbs in the ultra backdrop.
pub const ULTRA_ORBS: usize = 20;

/// Keyframes referenced by the overlay styles. Per-element sway is passed in
/// through the `--sway` custom property.
pub const KEYFRAMES: &str = "\
@keyframes folio-wash-pulse { 0%, 100% { opacity: 0.3; } 50% { opacity: 0.7; } }
@keyframes folio-wash-sweep { 0%, 100% { background-position: 0% 0%; } 50% { background-position: 100% 100%; } }
@keyframes folio-shape-float {
	0%, 100% { transform: translate(0, 0) rotate(0deg) scale(0.5); opacity: 0.1; }
	50% { transform: translate(var(--sway), -100px) rotate(180deg) scale(1.2); opacity: 0.3; }
}
@keyframes folio-orb-float {
	0%, 100% { transform: translate(0, 0) scale(0); opacity: 0; }
	50% { transform: translate(var(--sway), -200px) scale(1); opacity: 1; }
}
";

const LAYER: &str = "position: absolute; inset: 0; pointer-events: none;";

/// `color` at a `#rrggbbaa`-style alpha byte.
fn tinted(color: Color, alpha: u8) -> String {
	color.with_alpha(f64::from(alpha) / 255.0).to_css()
}

/// A full-layer gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wash {
	/// Three radial spots in both tints, pulsing in opacity over 8s.
	Pulse,
	/// A 45° linear gradient sliding corner to corner over 20s.
	Sweep,
}

impl Wash {
	/// Inline style for the wash element.
	pub fn style(self, palette: &Palette) -> String {
		let (p, s) = (palette.primary, palette.secondary);
		match self {
			Wash::Pulse => format!(
				"{} background: radial-gradient(circle at 20% 80%, {} 0%, transparent 50%), \
				 radial-gradient(circle at 80% 20%, {} 0%, transparent 50%), \
				 radial-gradient(circle at 40% 40%, {} 0%, transparent 60%); \
				 animation: folio-wash-pulse 8s ease-in-out infinite;",
				LAYER,
				tinted(p, 0x15),
				tinted(s, 0x15),
				tinted(p, 0x10)
			),
			Wash::Sweep => format!(
				"{} background: linear-gradient(45deg, {}, transparent, {}); \
				 background-size: 200% 200%; animation: folio-wash-sweep 20s linear infinite;",
				LAYER,
				tinted(p, 0x05),
				tinted(s, 0x05)
			),
		}
	}
}

/// Outline of a floating shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
	/// 32px disc, primary→secondary gradient.
	Circle,
	/// 40px square turned 45°.
	Diamond,
	/// Small primary triangle drawn with borders.
	Triangle,
	/// 32px rounded square, secondary→primary gradient.
	Square,
}

impl ShapeKind {
	fn cycle(index: usize) -> Self {
		match index % 4 {
			0 => ShapeKind::Circle,
			1 => ShapeKind::Diamond,
			2 => ShapeKind::Triangle,
			_ => ShapeKind::Square,
		}
	}
}

/// A shape that rises, sways and turns on a loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shape {
	/// Outline.
	pub kind: ShapeKind,
	/// Horizontal position, percent of the layer.
	pub left: f64,
	/// Vertical position, percent of the layer.
	pub top: f64,
	/// Peak horizontal offset in pixels.
	pub sway: f64,
	/// Loop length in seconds.
	pub duration: f64,
	/// Start delay in seconds.
	pub delay: f64,
}

impl Shape {
	/// Style of the animated wrapper.
	pub fn outer_style(&self) -> String {
		format!(
			"position: absolute; left: {:.2}%; top: {:.2}%; --sway: {:.1}px; opacity: 0.1; \
			 animation: folio-shape-float {:.2}s ease-in-out {:.2}s infinite;",
			self.left, self.top, self.sway, self.duration, self.delay
		)
	}

	/// Style of the shape itself.
	pub fn inner_style(&self, palette: &Palette) -> String {
		let (p, s) = (palette.primary, palette.secondary);
		match self.kind {
			ShapeKind::Circle => format!(
				"width: 32px; height: 32px; border-radius: 50%; background: linear-gradient(45deg, {}, {});",
				tinted(p, 0x40),
				tinted(s, 0x40)
			),
			ShapeKind::Diamond => format!(
				"width: 40px; height: 40px; transform: rotate(45deg); background: linear-gradient(45deg, {}, {});",
				tinted(p, 0x30),
				tinted(s, 0x30)
			),
			ShapeKind::Triangle => format!(
				"width: 0; height: 0; border-left: 6px solid transparent; \
				 border-right: 6px solid transparent; border-bottom: 10px solid {};",
				tinted(p, 0x50)
			),
			ShapeKind::Square => format!(
				"width: 32px; height: 32px; border-radius: 2px; background: linear-gradient(45deg, {}, {});",
				tinted(s, 0x40),
				tinted(p, 0x40)
			),
		}
	}
}

/// A blurred dot in one tint that fades in while rising.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orb {
	/// Horizontal position, percent of the layer.
	pub left: f64,
	/// Vertical position, percent of the layer.
	pub top: f64,
	/// Diameter in pixels.
	pub size: f64,
	/// Fill color.
	pub tint: Tint,
	/// Blur radius in pixels.
	pub blur: f64,
	/// Peak horizontal offset in pixels.
	pub sway: f64,
	/// Loop length in seconds.
	pub duration: f64,
	/// Start delay in seconds.
	pub delay: f64,
}

impl Orb {
	/// Inline style for the orb element.
	pub fn style(&self, palette: &Palette) -> String {
		format!(
			"position: absolute; pointer-events: none; left: {:.2}%; top: {:.2}%; \
			 width: {:.2}px; height: {:.2}px; background: {}; border-radius: 50%; \
			 filter: blur({:.2}px); --sway: {:.1}px; opacity: 0; \
			 animation: folio-orb-float {:.2}s ease-in-out {:.2}s infinite;",
			self.left,
			self.top,
			self.size,
			self.size,
			palette.color(self.tint).to_css(),
			self.blur,
			self.sway,
			self.duration,
			self.delay
		)
	}
}

/// Everything a preset draws besides the canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
	/// Full-layer gradients, bottom first.
	pub washes: Vec<Wash>,
	/// Floating shapes.
	pub shapes: Vec<Shape>,
	/// Blurred orbs.
	pub orbs: Vec<Orb>,
}

impl Overlay {
	/// Lays out the preset's overlay. The refined backdrop has none.
	pub fn for_preset(preset: Preset, rng: &mut Pcg32) -> Self {
		match preset {
			Preset::Basic => Self {
				washes: vec![Wash::Pulse, Wash::Sweep],
				shapes: (0..BASIC_SHAPES).map(|i| shape(rng, i)).collect(),
				orbs: Vec::new(),
			},
			Preset::Refined => Self::default(),
			Preset::Ultra => Self {
				orbs: (0..ULTRA_ORBS).map(|_| orb(rng)).collect(),
				..Self::default()
			},
		}
	}

	/// True when the preset draws nothing over the canvas.
	pub fn is_empty(&self) -> bool {
		self.washes.is_empty() && self.shapes.is_empty() && self.orbs.is_empty()
	}
}

fn shape(rng: &mut Pcg32, index: usize) -> Shape {
	Shape {
		kind: ShapeKind::cycle(index),
		left: sample(rng, (0.0, 100.0)),
		top: sample(rng, (0.0, 100.0)),
		sway: sample(rng, (-30.0, 30.0)),
		duration: sample(rng, (10.0, 20.0)),
		delay: sample(rng, (0.0, 5.0)),
	}
}

fn orb(rng: &mut Pcg32) -> Orb {
	Orb {
		left: sample(rng, (0.0, 100.0)),
		top: sample(rng, (0.0, 100.0)),
		size: sample(rng, (2.0, 6.0)),
		tint: sample_tint(rng),
		blur: sample(rng, (0.0, 2.0)),
		sway: sample(rng, (-50.0, 50.0)),
		duration: sample(rng, (10.0, 25.0)),
		delay: sample(rng, (0.0, 10.0)),
	}
}
