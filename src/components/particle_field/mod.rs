//! Animated particle-field backdrop.
//!
//! Draws a bounded set of drifting points on a full-viewport canvas with:
//! - Two-color tinting from the active portfolio theme
//! - Proximity lines between nearby particles
//! - Optional glow, pulse, drift and finite particle lifetimes, selected by preset
//! - CSS gradient washes, floating shapes or blurred orbs layered over the canvas
//! - A cancellable `requestAnimationFrame` loop tied to the component's lifetime
//!
//! # Example
//!
//! ```ignore
//! use folio_particles::{ParticleBackground, Preset, Theme};
//!
//! let theme = Signal::derive(|| Theme::named("neon"));
//! view! { <ParticleBackground theme=theme preset=Preset::Refined /> }
//! ```

mod component;
pub mod config;
pub mod lifecycle;
pub mod overlay;
pub mod particles;
pub mod render;
pub mod theme;
mod types;

pub use component::ParticleBackground;
pub use config::{FieldConfig, Preset};
pub use theme::Theme;
pub use types::{FieldOptions, ThemeColors};
