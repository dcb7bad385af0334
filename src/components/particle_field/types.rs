//! Input data structures for the particle background.

use serde::Deserialize;

use super::config::Preset;

/// Custom tint colors supplied by the host page.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
	/// CSS color replacing the theme's primary color (e.g., "#06B6D4").
	pub primary_color: Option<String>,
	/// CSS color replacing the theme's secondary color.
	pub secondary_color: Option<String>,
}

/// Mount options for the backdrop, read from the host page.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldOptions {
	/// Whether the particle backdrop renders at all.
	pub enabled: bool,
	/// Registered theme name. Unknown names fall back to the default theme.
	pub theme: String,
	/// Which parameter table to animate with.
	pub preset: Preset,
	/// Optional overrides for the theme's tint colors.
	pub colors: ThemeColors,
	/// Fixed RNG seed. When absent a seed is drawn at mount time.
	pub seed: Option<u64>,
}

impl Default for FieldOptions {
	fn default() -> Self {
		Self {
			enabled: true,
			theme: super::theme::DEFAULT_THEME.to_string(),
			preset: Preset::default(),
			colors: ThemeColors::default(),
			seed: None,
		}
	}
}
