//! A live orb bound to one canvas.
//!
//! [`OrbHandle::mount`] replaces a container's contents with a fresh canvas
//! sized for the device pixel ratio, then [`OrbHandle::start`] drives it via
//! `requestAnimationFrame`. Frame deltas come from the frame timestamps, so
//! animation speed does not depend on refresh rate.
//!
//! An orb that has been attached to the document and is later removed stops
//! itself on its next frame. Until then it keeps its own clock; stopping and
//! starting again resumes from where it left off.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::debug;
use rand::Rng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlElement};

use super::error::OrbError;
use super::registry::Lifecycle;
use super::render;
use super::state::{Density, ModulationCell, OrbState};
use super::theme::OrbStyle;

/// Current time in ms on the same clock as `requestAnimationFrame` stamps.
fn now_ms() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or_else(js_sys::Date::now)
}

/// Layout size of a container in CSS px, or 0 if it has no layout yet.
pub fn layout_size(container: &Element) -> (f64, f64) {
	match container.dyn_ref::<HtmlElement>() {
		Some(el) => (el.offset_width() as f64, el.offset_height() as f64),
		None => (container.client_width() as f64, container.client_height() as f64),
	}
}

struct OrbInner {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	state: RefCell<OrbState>,
	style: Rc<OrbStyle>,
	modulation: ModulationCell,
	running: Cell<bool>,
	frame_id: Cell<Option<i32>>,
	last_time: Cell<f64>,
	/// Set once the canvas has been seen in the document.
	was_attached: Cell<bool>,
	animate: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl OrbInner {
	fn frame(&self, now: f64) {
		if !self.running.get() {
			return;
		}

		if self.canvas.is_connected() {
			self.was_attached.set(true);
		} else if self.was_attached.get() {
			debug!("orb-field: canvas left the document, stopping orb");
			self.halt();
			return;
		}

		let dt = ((now - self.last_time.get()) / 1000.0).max(0.0);
		self.last_time.set(now);

		let modulation = self.modulation.get();
		{
			let mut state = self.state.borrow_mut();
			state.advance(dt, &modulation);
			render::render(&mut state, &self.ctx, &self.style, &modulation);
		}

		self.schedule();
	}

	fn schedule(&self) {
		let Some(window) = web_sys::window() else {
			self.running.set(false);
			return;
		};
		if let Some(ref cb) = *self.animate.borrow() {
			match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				Ok(id) => self.frame_id.set(Some(id)),
				Err(_) => self.running.set(false),
			}
		}
	}

	fn halt(&self) {
		self.running.set(false);
		if let Some(id) = self.frame_id.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
	}
}

impl Drop for OrbInner {
	fn drop(&mut self) {
		self.halt();
	}
}

/// Shared handle to a live orb. Clones refer to the same instance.
#[derive(Clone)]
pub struct OrbHandle {
	inner: Rc<OrbInner>,
}

impl OrbHandle {
	/// Creates an orb of `size` CSS px inside `container`, replacing whatever
	/// the container held. The orb is not started.
	pub fn mount(
		container: &Element,
		size: f64,
		style: Rc<OrbStyle>,
		density: &Density,
		modulation: ModulationCell,
		rng: &mut impl Rng,
	) -> Result<Self, OrbError> {
		let window = web_sys::window().ok_or(OrbError::NoWindow)?;
		let document = window.document().ok_or(OrbError::NoDocument)?;

		let canvas: HtmlCanvasElement = document
			.create_element("canvas")
			.map_err(|e| OrbError::CanvasCreation(format!("{:?}", e)))?
			.dyn_into()
			.map_err(|_| OrbError::CanvasCreation("element is not a canvas".into()))?;

		let dpr = window.device_pixel_ratio().max(1.0);
		canvas.set_width((size * dpr).round() as u32);
		canvas.set_height((size * dpr).round() as u32);
		let css = canvas.style();
		let _ = css.set_property("display", "block");
		let _ = css.set_property("width", &format!("{}px", size));
		let _ = css.set_property("height", &format!("{}px", size));

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
			.ok_or(OrbError::NoContext)?;
		let _ = ctx.scale(dpr, dpr);

		container.set_inner_html("");
		container
			.append_child(&canvas)
			.map_err(|e| OrbError::CanvasCreation(format!("{:?}", e)))?;

		let state = OrbState::new(size, style.radius_factor, density, rng);

		let inner = Rc::new(OrbInner {
			canvas,
			ctx,
			state: RefCell::new(state),
			style,
			modulation,
			running: Cell::new(false),
			frame_id: Cell::new(None),
			last_time: Cell::new(0.0),
			was_attached: Cell::new(false),
			animate: RefCell::new(None),
		});

		let weak: Weak<OrbInner> = Rc::downgrade(&inner);
		*inner.animate.borrow_mut() = Some(Closure::new(move |now: f64| {
			if let Some(inner) = weak.upgrade() {
				inner.frame(now);
			}
		}));

		Ok(Self { inner })
	}

	/// Starts or resumes the frame loop. No-op while already running.
	pub fn start(&self) {
		if self.inner.running.get() {
			return;
		}
		debug!("orb-field: starting orb ({}px)", self.size());
		self.inner.running.set(true);
		self.inner.last_time.set(now_ms());
		self.inner.schedule();
	}

	/// Cancels the pending frame. Clock and rotation are kept.
	pub fn stop(&self) {
		if self.inner.running.get() {
			debug!("orb-field: stopping orb ({}px)", self.size());
		}
		self.inner.halt();
	}

	pub fn is_running(&self) -> bool {
		self.inner.running.get()
	}

	pub fn is_attached(&self) -> bool {
		self.inner.canvas.is_connected()
	}

	pub fn canvas(&self) -> &HtmlCanvasElement {
		&self.inner.canvas
	}

	pub fn size(&self) -> f64 {
		self.inner.state.borrow().size
	}

	pub fn particle_count(&self) -> usize {
		self.inner.state.borrow().particles.len()
	}
}

impl Lifecycle for OrbHandle {
	fn is_alive(&self) -> bool {
		self.is_running()
	}

	fn stop(&self) {
		OrbHandle::stop(self);
	}
}
