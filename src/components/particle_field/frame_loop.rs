//! Cancellable entrypoints for the frame loop and event handlers.
//!
//! The browser invokes frame and event callbacks on one thread, and a
//! callback queued before teardown may still fire afterwards. Every entrypoint
//! here checks a shared [`CancelToken`] before touching state, so once
//! [`FieldRuntime::stop`] has run, late callbacks are no-ops.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::render::{self, Surface};
use super::state::FieldState;

/// Shared stop flag for one mounted field.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.0.set(true);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.get()
	}
}

/// Handle to a running field, cloned into every browser callback.
#[derive(Clone)]
pub struct FieldRuntime {
	field: Rc<RefCell<FieldState>>,
	token: CancelToken,
}

impl FieldRuntime {
	pub fn new(field: FieldState) -> Self {
		Self {
			field: Rc::new(RefCell::new(field)),
			token: CancelToken::new(),
		}
	}

	/// Step and draw one frame.
	///
	/// Returns `false` without touching the state or the surface once the
	/// runtime has been stopped; callers must not reschedule in that case.
	pub fn frame<S: Surface + ?Sized>(&self, surface: &S) -> bool {
		if self.token.is_cancelled() {
			return false;
		}
		let mut field = self.field.borrow_mut();
		field.tick();
		render::render(&field, surface);
		true
	}

	pub fn resize(&self, width: f64, height: f64) {
		if self.token.is_cancelled() {
			return;
		}
		self.field.borrow_mut().resize(width, height);
	}

	pub fn pointer_moved(&self, x: f64, y: f64) {
		if self.token.is_cancelled() {
			return;
		}
		self.field.borrow_mut().pointer_moved(x, y);
	}

	pub fn pointer_left(&self) {
		if self.token.is_cancelled() {
			return;
		}
		self.field.borrow_mut().pointer_left();
	}

	/// Stop the field. Idempotent.
	pub fn stop(&self) {
		self.token.cancel();
	}

	pub fn is_running(&self) -> bool {
		!self.token.is_cancelled()
	}

	pub fn particle_count(&self) -> usize {
		self.field.borrow().system.len()
	}

	/// Read-only access to the field, for inspection.
	pub fn with_field<T>(&self, f: impl FnOnce(&FieldState) -> T) -> T {
		f(&self.field.borrow())
	}
}
