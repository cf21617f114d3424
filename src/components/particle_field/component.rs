//! Leptos component wrapping the particle field canvas.
//!
//! The component sizes a fixed canvas to the viewport, seeds a
//! [`FieldState`], subscribes to window resize and pointer events, and drives
//! the simulation from `requestAnimationFrame`. Unmounting stops the runtime,
//! cancels the queued frame and removes every listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::frame_loop::FieldRuntime;
use super::state::FieldState;

/// A window event subscription, removed again by [`WindowListener::detach`].
struct WindowListener {
	window: Window,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl WindowListener {
	fn attach(window: &Window, event: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		let _ = window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
		Self {
			window: window.clone(),
			event,
			callback,
		}
	}

	fn detach(self) {
		let _ = self
			.window
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// Browser resources held by a running field.
struct MountedField {
	runtime: FieldRuntime,
	window: Window,
	listeners: Vec<WindowListener>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	frame_id: Rc<Cell<Option<i32>>>,
}

impl MountedField {
	fn stop(self) {
		// Invalidate first so a frame the browser already dequeued does nothing.
		self.runtime.stop();
		if let Some(id) = self.frame_id.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		for listener in self.listeners {
			listener.detach();
		}
		// Drops the closure, which also breaks its reference to itself.
		self.animate.borrow_mut().take();
		info!("particle-field: stopped");
	}
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(dim(window.inner_width()), dim(window.inner_height()))
}

/// Acquire the drawing context and start the field.
///
/// Returns `None`, leaving nothing subscribed, when there is no window or the
/// canvas has no 2d context.
fn mount(canvas: HtmlCanvasElement, config: FieldConfig) -> Option<MountedField> {
	let window = web_sys::window()?;
	let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
		Ok(Some(ctx)) => ctx.dyn_into().ok()?,
		_ => {
			warn!("particle-field: no 2d context, background disabled");
			return None;
		}
	};

	let (w, h) = viewport_size(&window);
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
	let runtime = FieldRuntime::new(FieldState::mount(config, w, h, seed));
	info!(
		"particle-field: mounted {} particles on {}x{}",
		runtime.particle_count(),
		w,
		h
	);

	let (runtime_resize, canvas_resize) = (runtime.clone(), canvas.clone());
	let on_resize = move |_: Event| {
		if !runtime_resize.is_running() {
			return;
		}
		let Some(win) = web_sys::window() else {
			return;
		};
		let (nw, nh) = viewport_size(&win);
		canvas_resize.set_width(nw as u32);
		canvas_resize.set_height(nh as u32);
		runtime_resize.resize(nw, nh);
		debug!("particle-field: resized to {}x{}", nw, nh);
	};

	let runtime_move = runtime.clone();
	let on_mousemove = move |ev: Event| {
		if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
			runtime_move.pointer_moved(ev.client_x() as f64, ev.client_y() as f64);
		}
	};

	// `mouseout` with no related target means the pointer left the window.
	let runtime_leave = runtime.clone();
	let on_mouseout = move |ev: Event| {
		if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
			if ev.related_target().is_none() {
				runtime_leave.pointer_left();
			}
		}
	};

	let listeners = vec![
		WindowListener::attach(&window, "resize", on_resize),
		WindowListener::attach(&window, "mousemove", on_mousemove),
		WindowListener::attach(&window, "mouseout", on_mouseout),
	];

	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let (runtime_anim, animate_inner, frame_id_inner) =
		(runtime.clone(), animate.clone(), frame_id.clone());
	*animate.borrow_mut() = Some(Closure::new(move || {
		frame_id_inner.set(None);
		if !runtime_anim.frame(&ctx) {
			return;
		}
		if let Some(ref cb) = *animate_inner.borrow() {
			if let Some(win) = web_sys::window() {
				if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
					frame_id_inner.set(Some(id));
				}
			}
		}
	}));
	if let Some(ref cb) = *animate.borrow() {
		if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			frame_id.set(Some(id));
		}
	}

	Some(MountedField {
		runtime,
		window,
		listeners,
		animate,
		frame_id,
	})
}

/// Full-viewport canvas of drifting hearts, stars and dots that gather
/// around the pointer.
///
/// The canvas is fixed behind the page and ignores pointer events; pointer
/// tracking is done on the window. Pass `config` to override the default
/// simulation constants.
#[component]
pub fn ParticleBackground(#[prop(default = None)] config: Option<FieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mounted: Rc<RefCell<Option<MountedField>>> = Rc::new(RefCell::new(None));
	let mounted_init = mounted.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if mounted_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		*mounted_init.borrow_mut() = mount(canvas, config.clone().unwrap_or_default());
	});

	let mounted = SendWrapper::new(mounted);
	on_cleanup(move || {
		if let Some(field) = mounted.borrow_mut().take() {
			field.stop();
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-canvas"
			style="position: fixed; inset: 0; pointer-events: none; background: transparent;"
		/>
	}
}
