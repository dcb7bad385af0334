//! Animation loop ownership.
//!
//! A [`FieldRunner`] ties one particle field, its drawing surface and a frame
//! scheduler together. Every frame it updates, renders and asks for the next
//! frame, keeping the returned handle so [`FieldRunner::stop`] can withdraw it.

use log::{info, warn};

use super::particles::ParticleField;
use super::render::{self, Surface};

/// Handle returned when a frame callback is scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Host primitive that runs the loop's frame callback before the next repaint.
pub trait FrameScheduler {
	/// Schedule one more frame callback. `None` if the host refused.
	fn request(&mut self) -> Option<FrameHandle>;
	/// Withdraw a scheduled callback.
	fn cancel(&mut self, handle: FrameHandle);
}

/// Loop state. `Stopped` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
	/// Built but not started.
	Uninitialized,
	/// A frame is scheduled or being drawn.
	Running,
	/// Cancelled, or the host refused to schedule another frame.
	Stopped,
}

/// Drives one [`ParticleField`] onto a surface, one scheduled frame at a time.
pub struct FieldRunner<S, D> {
	field: ParticleField,
	surface: D,
	scheduler: S,
	state: LoopState,
	pending: Option<FrameHandle>,
	frames: u64,
}

impl<S: FrameScheduler, D: Surface> FieldRunner<S, D> {
	/// Wraps a populated field. Nothing is scheduled until [`FieldRunner::start`].
	pub fn new(field: ParticleField, surface: D, scheduler: S) -> Self {
		Self {
			field,
			surface,
			scheduler,
			state: LoopState::Uninitialized,
			pending: None,
			frames: 0,
		}
	}

	/// Current loop state.
	pub fn state(&self) -> LoopState {
		self.state
	}

	/// The simulated field.
	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	/// Frames rendered so far.
	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Schedule the first frame. Only valid from `Uninitialized`.
	pub fn start(&mut self) {
		if self.state != LoopState::Uninitialized {
			return;
		}
		self.state = LoopState::Running;
		self.schedule();
	}

	/// Frame callback body: update, draw, schedule the next frame.
	pub fn frame(&mut self) {
		if self.state != LoopState::Running {
			return;
		}
		self.pending = None;
		self.field.update();
		render::render(&self.field, &mut self.surface);
		self.frames += 1;
		self.schedule();
	}

	/// Ask for the next frame. A refusal ends the loop.
	fn schedule(&mut self) {
		self.pending = self.scheduler.request();
		if self.pending.is_none() {
			self.state = LoopState::Stopped;
			warn!(
				"folio-particles: frame request refused, animation halted after {} frames",
				self.frames
			);
		}
	}

	/// Adopt new surface bounds. The particle count is unchanged.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.field.resize(width, height);
	}

	/// Cancel the pending frame and stop for good.
	pub fn stop(&mut self) {
		if self.state != LoopState::Running {
			return;
		}
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel(handle);
		}
		self.state = LoopState::Stopped;
		info!(
			"folio-particles: animation stopped after {} frames",
			self.frames
		);
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use rand::SeedableRng;
	use rand_pcg::Pcg32;

	use super::*;
	use crate::components::particle_field::config::Preset;
	use crate::components::particle_field::render::tests::{Op, Recorder};
	use crate::components::particle_field::theme::Theme;

	#[derive(Debug, PartialEq)]
	enum Call {
		Request(i32),
		Cancel(i32),
	}

	/// Hands out increasing handles and logs every call.
	#[derive(Clone, Default)]
	struct Scheduler {
		calls: Rc<RefCell<Vec<Call>>>,
		next: Rc<RefCell<i32>>,
		/// Refuse every request once this many have been granted.
		limit: Option<i32>,
	}

	impl FrameScheduler for Scheduler {
		fn request(&mut self) -> Option<FrameHandle> {
			let mut next = self.next.borrow_mut();
			if self.limit.is_some_and(|limit| *next >= limit) {
				return None;
			}
			*next += 1;
			self.calls.borrow_mut().push(Call::Request(*next));
			Some(FrameHandle(*next))
		}

		fn cancel(&mut self, handle: FrameHandle) {
			self.calls.borrow_mut().push(Call::Cancel(handle.0));
		}
	}

	fn runner(scheduler: Scheduler) -> FieldRunner<Scheduler, Recorder> {
		let field = ParticleField::new(
			Preset::Ultra.config(),
			Theme::default().palette(),
			1024.0,
			768.0,
			Pcg32::seed_from_u64(12),
		);
		FieldRunner::new(field, Recorder::default(), scheduler)
	}

	#[test]
	fn test_start_schedules_first_frame() {
		let sched = Scheduler::default();
		let mut r = runner(sched.clone());
		assert_eq!(r.state(), LoopState::Uninitialized);
		r.start();
		assert_eq!(r.state(), LoopState::Running);
		assert_eq!(*sched.calls.borrow(), vec![Call::Request(1)]);

		r.start();
		assert_eq!(sched.calls.borrow().len(), 1, "second start is a no-op");
	}

	#[test]
	fn test_frame_before_start_does_nothing() {
		let sched = Scheduler::default();
		let mut r = runner(sched.clone());
		r.frame();
		assert_eq!(r.frames(), 0);
		assert!(r.surface.ops.is_empty());
		assert!(sched.calls.borrow().is_empty());
	}

	#[test]
	fn test_each_frame_draws_and_reschedules() {
		let sched = Scheduler::default();
		let mut r = runner(sched.clone());
		r.start();
		for _ in 0..3 {
			r.frame();
		}
		assert_eq!(r.frames(), 3);
		assert_eq!(sched.calls.borrow().len(), 4);
		let clears = r
			.surface
			.ops
			.iter()
			.filter(|op| matches!(op, Op::Clear(..)))
			.count();
		assert_eq!(clears, 3);
	}

	#[test]
	fn test_stop_cancels_pending_frame_and_halts_drawing() {
		let sched = Scheduler::default();
		let mut r = runner(sched.clone());
		r.start();
		r.frame();
		r.frame();
		r.stop();
		assert_eq!(r.state(), LoopState::Stopped);
		assert_eq!(sched.calls.borrow().last(), Some(&Call::Cancel(3)));

		let (ops_before, calls_before) = (r.surface.ops.len(), sched.calls.borrow().len());
		// A callback that was already in flight must not draw or reschedule.
		r.frame();
		r.start();
		assert_eq!(r.surface.ops.len(), ops_before);
		assert_eq!(sched.calls.borrow().len(), calls_before);
		assert_eq!(r.state(), LoopState::Stopped);
	}

	#[test]
	fn test_stop_is_idempotent() {
		let sched = Scheduler::default();
		let mut r = runner(sched.clone());
		r.start();
		r.stop();
		r.stop();
		let cancels = sched
			.calls
			.borrow()
			.iter()
			.filter(|c| matches!(c, Call::Cancel(_)))
			.count();
		assert_eq!(cancels, 1);
	}

	#[test]
	fn test_resize_keeps_particle_count() {
		let mut r = runner(Scheduler::default());
		let count = r.field().len();
		r.start();
		r.resize(400.0, 300.0);
		r.frame();
		assert_eq!(r.field().len(), count);
		assert_eq!(r.surface.ops[0], Op::Clear(400.0, 300.0));
		assert!(r.field().particles().iter().all(|p| p.x <= 400.0 && p.y <= 300.0));
	}

	#[test]
	fn test_refused_request_halts_loop() {
		let sched = Scheduler {
			limit: Some(2),
			..Scheduler::default()
		};
		let mut r = runner(sched.clone());
		r.start();
		r.frame();
		assert_eq!(r.state(), LoopState::Running);

		r.frame();
		assert_eq!(r.frames(), 2);
		assert_eq!(r.state(), LoopState::Stopped);

		r.frame();
		r.stop();
		assert_eq!(r.frames(), 2, "a halted loop draws nothing more");
		assert_eq!(*sched.calls.borrow(), vec![Call::Request(1), Call::Request(2)]);
	}
}
