//! folio-particles: animated particle backdrop for a portfolio site.
//!
//! This crate provides a WASM canvas component that fills the viewport with
//! drifting, theme-tinted particles joined by proximity lines, rendered behind
//! the page's content.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	FieldConfig, FieldOptions, ParticleBackground, Preset, Theme, ThemeColors,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("folio-particles: logging initialized");
}

/// Parse mount options. Malformed JSON is logged and yields `None`.
fn parse_field_options(json_text: &str) -> Option<FieldOptions> {
	match serde_json::from_str::<FieldOptions>(json_text) {
		Ok(options) => {
			info!(
				"folio-particles: options loaded (theme {}, {:?}, enabled {})",
				options.theme, options.preset, options.enabled
			);
			Some(options)
		}
		Err(e) => {
			warn!("folio-particles: failed to parse field options: {}", e);
			None
		}
	}
}

/// Load mount options from a script element with id="field-options".
/// Expected format: JSON with { theme, preset, enabled, colors, seed }, all optional.
fn load_field_options() -> Option<FieldOptions> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-options")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	parse_field_options(&json_text)
}

/// Main application component.
/// Reads mount options from the DOM and renders the backdrop behind the page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let options = load_field_options().unwrap_or_default();
	let theme = Theme::named(&options.theme).with_overrides(&options.colors);
	let theme_signal = Signal::derive(move || theme);
	let (preset, seed) = (options.preset, options.seed);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=theme.name />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="portfolio-backdrop">
			{options
				.enabled
				.then(|| view! { <ParticleBackground theme=theme_signal preset=preset seed=seed /> })}
			<div class="portfolio-overlay">
				<p class="subtitle">{Theme::display_name_of(&options.theme)}</p>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_field_options() {
		let options = parse_field_options(r#"{ "theme": "purple", "preset": "basic" }"#).unwrap();
		assert_eq!(options.theme, "purple");
		assert_eq!(options.preset, Preset::Basic);
	}

	#[test]
	fn test_malformed_options_yield_none() {
		assert!(parse_field_options("{ not json").is_none());
		assert!(parse_field_options(r#"{ "seed": "abc" }"#).is_none());
	}

	#[test]
	fn test_empty_object_yields_defaults() {
		assert_eq!(parse_field_options("{}"), Some(FieldOptions::default()));
	}
}
