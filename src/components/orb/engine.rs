//! The process-wide orb engine and its JavaScript entry points.
//!
//! One engine per page owns the configuration, the shared modulation cell
//! and the instance registry. The rest of the chat UI talks to it through
//! the `orb*` functions exported below; none of them throw.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::config::OrbConfig;
use super::error::OrbError;
use super::instance::{OrbHandle, layout_size};
use super::mood::{MoodCategory, tint_for};
use super::preset::MoodPreset;
use super::registry::OrbRegistry;
use super::state::{Modulation, ModulationCell, fit_size};
use super::theme::{Color, OrbStyle};

thread_local! {
	static ENGINE: Rc<OrbEngine> = Rc::new(OrbEngine::new(crate::load_orb_config()));
}

/// The page's engine, created on first use from the page configuration.
pub fn engine() -> Rc<OrbEngine> {
	ENGINE.with(Rc::clone)
}

fn element_by_id(id: &str) -> Result<Element, OrbError> {
	let window = web_sys::window().ok_or(OrbError::NoWindow)?;
	let document = window.document().ok_or(OrbError::NoDocument)?;
	document
		.get_element_by_id(id)
		.ok_or_else(|| OrbError::ContainerMissing(id.to_string()))
}

/// Page-wide owner of the configuration, shared modulation and orb registry.
pub struct OrbEngine {
	config: OrbConfig,
	style: Rc<OrbStyle>,
	modulation: ModulationCell,
	registry: RefCell<OrbRegistry<OrbHandle>>,
	rng: RefCell<StdRng>,
}

impl OrbEngine {
	pub fn new(config: OrbConfig) -> Self {
		let modulation = ModulationCell::new(Modulation {
			preset: config.initial_preset(),
			..Modulation::default()
		});
		Self {
			registry: RefCell::new(OrbRegistry::new(config.max_detached)),
			style: Rc::new(OrbStyle::default()),
			rng: RefCell::new(StdRng::from_entropy()),
			modulation,
			config,
		}
	}

	pub fn config(&self) -> &OrbConfig {
		&self.config
	}

	pub fn modulation(&self) -> Modulation {
		self.modulation.get()
	}

	fn spawn(&self, container: &Element, fallback: f64) -> Result<OrbHandle, OrbError> {
		let (w, h) = layout_size(container);
		let size = fit_size(w, h, fallback);
		let handle = OrbHandle::mount(
			container,
			size,
			self.style.clone(),
			&self.config.density(),
			self.modulation.clone(),
			&mut *self.rng.borrow_mut(),
		)?;
		handle.start();
		info!(
			"orb-field: created {}px orb with {} particles",
			size,
			handle.particle_count()
		);
		Ok(handle)
	}

	/// Creates the orb inside the element with id `key`, unless a live orb
	/// already exists under that key. Missing containers are a silent no-op.
	pub fn create_named(&self, key: &str, fallback: f64) -> Option<OrbHandle> {
		let mut registry = self.registry.borrow_mut();
		let mut created = false;
		let handle = registry
			.get_or_create(key, || {
				created = true;
				element_by_id(key)
					.and_then(|container| self.spawn(&container, fallback))
					.map_err(|e| warn!("orb-field: {}: {}", key, e))
					.ok()
			})
			.cloned();
		if !created {
			info!("orb-field: reusing running orb '{}'", key);
		}
		handle
	}

	/// Always creates a fresh orb inside `container`.
	pub fn create_in_element(&self, container: &Element, fallback: f64) -> Option<OrbHandle> {
		match self.spawn(container, fallback) {
			Ok(handle) => {
				self.registry.borrow_mut().push_detached(handle.clone());
				Some(handle)
			}
			Err(e) => {
				warn!("orb-field: detached orb: {}", e);
				None
			}
		}
	}

	/// Creates the main orb once its container has a layout, polling once
	/// per frame until it does.
	pub fn create_main(self: &Rc<Self>) {
		let id = self.config.main_container_id.clone();
		let ready = element_by_id(&id)
			.map(|el| layout_size(&el).0 > 0.0)
			.unwrap_or(false);
		if ready {
			self.create_named(&id, self.config.main_fallback_size);
			return;
		}

		let engine = self.clone();
		let retry = Closure::once_into_js(move || engine.create_main());
		if let Some(window) = web_sys::window() {
			let _ = window.request_animation_frame(retry.unchecked_ref());
		}
	}

	pub fn set_listening(&self, listening: bool) {
		self.modulation.set_listening(listening);
	}

	/// Unknown keys leave the current preset in place.
	pub fn set_mood_preset(&self, key: &str) {
		match key.parse::<MoodPreset>() {
			Ok(preset) => self.modulation.set_preset(preset),
			Err(e) => warn!("orb-field: {}", e),
		}
	}

	pub fn set_mood_tint(&self, tint: Option<Color>) {
		self.modulation.set_tint(tint);
	}

	/// Applies a mood slider value: preset from its category, tint from its colour.
	pub fn apply_mood(&self, value: i32) {
		let preset = MoodCategory::from_value(value).preset();
		let tint = tint_for(value);
		self.modulation.update(|m| {
			m.preset = preset;
			m.tint = Some(tint);
		});
	}

	pub fn stop(&self, key: &str) -> bool {
		self.registry.borrow_mut().remove(key)
	}

	pub fn destroy_all(&self) {
		self.registry.borrow_mut().clear();
	}
}

/// JavaScript-side handle to a detached orb.
#[wasm_bindgen]
pub struct OrbInstance {
	handle: OrbHandle,
}

#[wasm_bindgen]
impl OrbInstance {
	pub fn start(&self) {
		self.handle.start();
	}

	pub fn stop(&self) {
		self.handle.stop();
	}

	#[wasm_bindgen(js_name = isRunning)]
	pub fn is_running(&self) -> bool {
		self.handle.is_running()
	}
}

/// Initialises logging and the main orb.
#[wasm_bindgen(js_name = orbInit)]
pub fn orb_init() {
	crate::init_logging();
	engine().create_main();
}

#[wasm_bindgen(js_name = orbCreateMain)]
pub fn orb_create_main() {
	engine().create_main();
}

#[wasm_bindgen(js_name = orbCreateNamed)]
pub fn orb_create_named(key: &str, size: f64) {
	engine().create_named(key, size);
}

#[wasm_bindgen(js_name = orbCreateMini)]
pub fn orb_create_mini() {
	let engine = engine();
	let config = engine.config();
	engine.create_named(&config.mini_container_id, config.mini_size);
}

#[wasm_bindgen(js_name = orbCreateChatHeader)]
pub fn orb_create_chat_header() {
	let engine = engine();
	let config = engine.config();
	engine.create_named(&config.chat_header_container_id, config.chat_header_size);
}

#[wasm_bindgen(js_name = orbCreateNav)]
pub fn orb_create_nav() {
	let engine = engine();
	let config = engine.config();
	engine.create_named(&config.nav_container_id, config.nav_size);
}

/// Creates an avatar orb inside `container`. A size of 0 uses the configured avatar size.
#[wasm_bindgen(js_name = orbCreateInElement)]
pub fn orb_create_in_element(container: &Element, size: f64) -> Option<OrbInstance> {
	let engine = engine();
	let fallback = if size > 0.0 {
		size
	} else {
		engine.config().avatar_size
	};
	engine
		.create_in_element(container, fallback)
		.map(|handle| OrbInstance { handle })
}

#[wasm_bindgen(js_name = orbSetListening)]
pub fn orb_set_listening(listening: bool) {
	engine().set_listening(listening);
}

#[wasm_bindgen(js_name = orbSetMoodPreset)]
pub fn orb_set_mood_preset(key: &str) {
	engine().set_mood_preset(key);
}

#[wasm_bindgen(js_name = orbSetMoodTint)]
pub fn orb_set_mood_tint(r: u8, g: u8, b: u8) {
	engine().set_mood_tint(Some(Color::rgb(r, g, b)));
}

#[wasm_bindgen(js_name = orbClearMoodTint)]
pub fn orb_clear_mood_tint() {
	engine().set_mood_tint(None);
}

#[wasm_bindgen(js_name = orbApplyMood)]
pub fn orb_apply_mood(value: i32) {
	engine().apply_mood(value);
}

#[wasm_bindgen(js_name = orbStop)]
pub fn orb_stop(key: &str) -> bool {
	engine().stop(key)
}

#[wasm_bindgen(js_name = orbDestroyAll)]
pub fn orb_destroy_all() {
	engine().destroy_all();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_preset_key_keeps_previous_preset() {
		let engine = OrbEngine::new(OrbConfig::default());
		assert_eq!(engine.modulation().preset, MoodPreset::Vibrant);

		engine.set_mood_preset("a");
		assert_eq!(engine.modulation().preset, MoodPreset::Calm);

		engine.set_mood_preset("furious");
		engine.set_mood_preset("");
		assert_eq!(engine.modulation().preset, MoodPreset::Calm);
	}

	#[test]
	fn apply_mood_sets_preset_and_tint_together() {
		let engine = OrbEngine::new(OrbConfig::default());
		engine.set_listening(true);

		engine.apply_mood(50);
		let m = engine.modulation();
		assert_eq!(m.preset, MoodPreset::Moderate);
		assert_eq!(m.tint, Some(Color::rgb(245, 215, 140)));
		assert!(m.listening);

		engine.apply_mood(10);
		assert_eq!(engine.modulation().preset, MoodPreset::Calm);

		engine.set_mood_tint(None);
		let m = engine.modulation();
		assert_eq!(m.tint, None);
		assert_eq!(m.preset, MoodPreset::Calm);
	}

	#[test]
	fn stopping_unknown_key_reports_nothing_removed() {
		let engine = OrbEngine::new(OrbConfig::default());
		assert!(!engine.stop("nav-orb"));
		engine.destroy_all();
	}
}
