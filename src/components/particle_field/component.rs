//! Leptos component mounting the particle field behind page content.
//!
//! The component sizes a canvas to the viewport, seeds a [`ParticleField`] and
//! drives it with `requestAnimationFrame`. Presets with an [`Overlay`] get its
//! CSS layers stacked over the canvas. A theme change remounts the field
//! (particle colors are fixed at spawn), and unmounting removes the resize
//! listener and cancels the pending frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::config::Preset;
use super::lifecycle::{FieldRunner, FrameHandle, FrameScheduler};
use super::overlay::{KEYFRAMES, Overlay};
use super::particles::ParticleField;
use super::theme::{Palette, Theme};

/// PCG stream for overlay layout, so it does not share draws with the field.
const OVERLAY_STREAM: u64 = 0x6f76_6572_6c61_7921;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type Runner = FieldRunner<AnimationFrames, CanvasRenderingContext2d>;

/// Schedules the loop's frame callback with `window.requestAnimationFrame`.
pub struct AnimationFrames {
	callback: FrameCallback,
}

impl FrameScheduler for AnimationFrames {
	fn request(&mut self) -> Option<FrameHandle> {
		let window = web_sys::window()?;
		let callback = self.callback.borrow();
		let cb = callback.as_ref()?;
		let id = window.request_animation_frame(cb.as_ref().unchecked_ref());
		id.ok().map(FrameHandle)
	}

	fn cancel(&mut self, handle: FrameHandle) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle.0);
		}
	}
}

/// Everything one mount keeps alive. The frame closure and the runner point at
/// each other through `Rc`s, so [`Mounted::unmount`] has to break the cycle.
struct Mounted {
	runner: Rc<RefCell<Option<Runner>>>,
	frame_cb: FrameCallback,
	resize_cb: Closure<dyn FnMut()>,
}

impl Mounted {
	fn unmount(self) {
		if let Some(window) = web_sys::window() {
			let _ = window.remove_event_listener_with_callback(
				"resize",
				self.resize_cb.as_ref().unchecked_ref(),
			);
		}
		if let Some(mut runner) = self.runner.borrow_mut().take() {
			runner.stop();
		}
		// Safe to drop now: no frame is pending.
		self.frame_cb.borrow_mut().take();
		info!("folio-particles: unmounted");
	}
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn random_seed() -> u64 {
	let word = || (js_sys::Math::random() * 4_294_967_296.0) as u64;
	(word() << 32) | word()
}

fn mount(canvas: HtmlCanvasElement, theme: Theme, preset: Preset, seed: u64) -> Option<Mounted> {
	let Some(window) = web_sys::window() else {
		warn!("folio-particles: no window, backdrop disabled");
		return None;
	};
	let Some(ctx) = canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
	else {
		warn!("folio-particles: no canvas 2d context, backdrop disabled");
		return None;
	};
	let Some((w, h)) = viewport_size(&window) else {
		warn!("folio-particles: viewport size unavailable, backdrop disabled");
		return None;
	};
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let field = ParticleField::new(
		preset.config(),
		theme.palette(),
		w,
		h,
		Pcg32::seed_from_u64(seed),
	);
	info!(
		"folio-particles: mounted {} particles ({}x{}, theme {}, {:?}, seed {})",
		field.len(),
		w,
		h,
		theme.name,
		preset,
		seed
	);

	let frame_cb: FrameCallback = Rc::new(RefCell::new(None));
	let scheduler = AnimationFrames {
		callback: frame_cb.clone(),
	};
	let runner = Rc::new(RefCell::new(Some(FieldRunner::new(field, ctx, scheduler))));

	let runner_frame = runner.clone();
	*frame_cb.borrow_mut() = Some(Closure::new(move || {
		if let Some(r) = runner_frame.borrow_mut().as_mut() {
			r.frame();
		}
	}));

	let (runner_resize, canvas_resize) = (runner.clone(), canvas);
	let resize_cb = Closure::<dyn FnMut()>::new(move || {
		let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
			return;
		};
		canvas_resize.set_width(nw as u32);
		canvas_resize.set_height(nh as u32);
		if let Some(r) = runner_resize.borrow_mut().as_mut() {
			r.resize(nw, nh);
		}
		debug!("folio-particles: resized to {}x{}", nw, nh);
	});
	let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());

	if let Some(r) = runner.borrow_mut().as_mut() {
		r.start();
	}

	Some(Mounted {
		runner,
		frame_cb,
		resize_cb,
	})
}

fn overlay_view(overlay: &Overlay, palette: Palette) -> impl IntoView + use<> {
	let washes = overlay
		.washes
		.iter()
		.map(|wash| view! { <div class="particle-wash" style=wash.style(&palette) /> })
		.collect_view();
	let shapes = overlay
		.shapes
		.iter()
		.map(|shape| {
			view! {
				<div class="particle-shape" style=shape.outer_style()>
					<div style=shape.inner_style(&palette) />
				</div>
			}
		})
		.collect_view();
	let orbs = overlay
		.orbs
		.iter()
		.map(|orb| view! { <div class="particle-orb" style=orb.style(&palette) /> })
		.collect_view();

	view! { {washes} {shapes} {orbs} }
}

/// Full-bleed animated particle backdrop.
///
/// Renders a fixed, pointer-transparent canvas behind the page, plus the
/// preset's CSS overlay. One seed serves the component's lifetime; pass `seed`
/// for a reproducible layout. Changing the `theme` signal tears the field down
/// and mounts a fresh one from the same seed, and recolors the overlay.
#[component]
pub fn ParticleBackground(
	/// Theme whose two colors tint the particles.
	#[prop(into)]
	theme: Signal<Theme>,
	/// Parameter table. Defaults to [`Preset::Ultra`].
	#[prop(optional)]
	preset: Preset,
	/// Fixed seed for particle and overlay layout. Random when `None`.
	#[prop(default = None)]
	seed: Option<u64>,
) -> impl IntoView {
	let seed = seed.unwrap_or_else(random_seed);
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mounted: Rc<RefCell<Option<Mounted>>> = Rc::new(RefCell::new(None));
	let mounted_effect = mounted.clone();

	Effect::new(move |_| {
		let current = theme.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		if let Some(previous) = mounted_effect.borrow_mut().take() {
			debug!("folio-particles: remounting for theme {}", current.name);
			previous.unmount();
		}

		if let Some(m) = mount(canvas, current, preset, seed) {
			*mounted_effect.borrow_mut() = Some(m);
		}
	});

	let mounted_cleanup = StoredValue::new_local(mounted);
	on_cleanup(move || {
		mounted_cleanup.try_with_value(|mounted| {
			if let Some(m) = mounted.borrow_mut().take() {
				m.unmount();
			}
		});
	});

	let style = format!(
		"position: fixed; inset: 0; width: 100%; height: 100%; pointer-events: none; opacity: {};",
		preset.layer_opacity()
	);

	let overlay = Overlay::for_preset(preset, &mut Pcg32::new(seed, OVERLAY_STREAM));
	let overlay_layer = (!overlay.is_empty()).then(move || {
		view! {
			<div
				class="particle-overlay"
				aria-hidden="true"
				style="position: fixed; inset: 0; overflow: hidden; pointer-events: none;"
			>
				<style>{KEYFRAMES}</style>
				{move || overlay_view(&overlay, theme.get().palette())}
			</div>
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-background"
			aria-hidden="true"
			style=style
		/>
		{overlay_layer}
	}
}
