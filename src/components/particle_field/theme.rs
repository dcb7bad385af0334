//! Theme colors for the particle field.
//!
//! A theme contributes exactly two tint colors. Particles store a [`Tint`]
//! rather than a color, and resolve it through the [`Palette`] captured at
//! mount time.

use log::debug;

use super::types::ThemeColors;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`, `#RGB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Self> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			return match hex.len() {
				6 => Some(Color::rgb(
					u8::from_str_radix(hex.get(0..2)?, 16).ok()?,
					u8::from_str_radix(hex.get(2..4)?, 16).ok()?,
					u8::from_str_radix(hex.get(4..6)?, 16).ok()?,
				)),
				3 => {
					let digit = |i: usize| -> Option<u8> {
						let v = u8::from_str_radix(hex.get(i..i + 1)?, 16).ok()?;
						Some(v * 17)
					};
					Some(Color::rgb(digit(0)?, digit(1)?, digit(2)?))
				}
				_ => None,
			};
		}

		let body = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let nums: Vec<&str> = body.split(',').map(str::trim).collect();
		if nums.len() != 3 && nums.len() != 4 {
			return None;
		}
		let r = nums[0].parse().ok()?;
		let g = nums[1].parse().ok()?;
		let b = nums[2].parse().ok()?;
		let a = match nums.get(3) {
			Some(a) => a.parse::<f64>().ok()?.clamp(0.0, 1.0),
			None => 1.0,
		};
		Some(Color::rgba(r, g, b, a))
	}
}

/// Which of the two theme colors a particle is tinted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
	/// The theme's primary color.
	Primary,
	/// The theme's secondary color.
	Secondary,
}

/// The two tint colors a field was mounted with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
	/// Color for [`Tint::Primary`].
	pub primary: Color,
	/// Color for [`Tint::Secondary`].
	pub secondary: Color,
}

impl Palette {
	/// Resolve a tint.
	pub fn color(&self, tint: Tint) -> Color {
		match tint {
			Tint::Primary => self.primary,
			Tint::Secondary => self.secondary,
		}
	}
}

/// A named portfolio theme, reduced to what the backdrop consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
	/// Registry key, e.g. `neon`.
	pub name: &'static str,
	/// Human-readable name.
	pub display_name: &'static str,
	/// First tint color.
	pub primary: Color,
	/// Second tint color.
	pub secondary: Color,
}

/// Name of the theme used when a lookup misses.
pub const DEFAULT_THEME: &str = "neon";

const THEMES: [Theme; 10] = [
	Theme {
		name: "neon",
		display_name: "Neon",
		primary: Color::rgb(0x06, 0xb6, 0xd4),
		secondary: Color::rgb(0xa8, 0x55, 0xf7),
	},
	Theme {
		name: "dark",
		display_name: "Dark",
		primary: Color::rgb(0x37, 0x41, 0x51),
		secondary: Color::rgb(0x4b, 0x55, 0x63),
	},
	Theme {
		name: "white",
		display_name: "White",
		primary: Color::rgb(0x1f, 0x29, 0x37),
		secondary: Color::rgb(0x37, 0x41, 0x51),
	},
	Theme {
		name: "light",
		display_name: "Light",
		primary: Color::rgb(0x25, 0x63, 0xeb),
		secondary: Color::rgb(0x4f, 0x46, 0xe5),
	},
	Theme {
		name: "system",
		display_name: "System",
		primary: Color::rgb(0x25, 0x63, 0xeb),
		secondary: Color::rgb(0x4f, 0x46, 0xe5),
	},
	Theme {
		name: "red",
		display_name: "Red",
		primary: Color::rgb(0xdc, 0x26, 0x26),
		secondary: Color::rgb(0xef, 0x44, 0x44),
	},
	Theme {
		name: "blue",
		display_name: "Blue",
		primary: Color::rgb(0x25, 0x63, 0xeb),
		secondary: Color::rgb(0x3b, 0x82, 0xf6),
	},
	Theme {
		name: "green",
		display_name: "Green",
		primary: Color::rgb(0x05, 0x96, 0x69),
		secondary: Color::rgb(0x10, 0xb9, 0x81),
	},
	Theme {
		name: "purple",
		display_name: "Purple",
		primary: Color::rgb(0x7c, 0x3a, 0xed),
		secondary: Color::rgb(0x8b, 0x5c, 0xf6),
	},
	Theme {
		name: "gold",
		display_name: "Gold",
		primary: Color::rgb(0xd9, 0x77, 0x06),
		secondary: Color::rgb(0xf5, 0x9e, 0x0b),
	},
];

impl Theme {
	/// Looks up a registered theme, falling back to [`DEFAULT_THEME`].
	pub fn named(name: &str) -> Self {
		match Self::find(name) {
			Some(theme) => theme,
			None => {
				debug!(
					"folio-particles: unknown theme {:?}, using {}",
					name, DEFAULT_THEME
				);
				Self::default()
			}
		}
	}

	fn find(name: &str) -> Option<Self> {
		THEMES.iter().copied().find(|t| t.name == name)
	}

	/// All registered theme names, in registry order.
	pub fn names() -> impl Iterator<Item = &'static str> {
		THEMES.iter().map(|t| t.name)
	}

	/// Display name for a theme, or the name itself when it is not registered.
	pub fn display_name_of(name: &str) -> String {
		Self::find(name)
			.map(|t| t.display_name.to_string())
			.unwrap_or_else(|| name.to_string())
	}

	/// Replaces the tint colors with any custom colors that parse.
	pub fn with_overrides(self, colors: &ThemeColors) -> Self {
		let pick = |custom: &Option<String>, base: Color| {
			custom
				.as_deref()
				.and_then(Color::parse)
				.unwrap_or(base)
		};
		Self {
			primary: pick(&colors.primary_color, self.primary),
			secondary: pick(&colors.secondary_color, self.secondary),
			..self
		}
	}

	/// The two tint colors.
	pub fn palette(&self) -> Palette {
		Palette {
			primary: self.primary,
			secondary: self.secondary,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		THEMES[0]
	}
}
