//! orb-field: the assistant's animated particle-orb avatar.
//!
//! This crate renders any number of independent orb instances onto 2D
//! canvases, driven by a shared listening flag, mood preset and mood tint.
//! The chat UI drives it through the `orb*` functions exported to
//! JavaScript; the bundled [`App`] is a standalone welcome screen.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlScriptElement, MouseEvent, Window};

// Only referenced for its `js` feature, which backs the entropy source on wasm.
use getrandom as _;

pub mod components;

pub use components::orb::{MoodPreset, OrbCanvas, OrbConfig, engine};

use components::orb::mood::MoodCategory;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("orb-field: logging initialized");
}

/// Load orb configuration from a script element with id="orb-config".
/// Falls back to defaults when the element is absent or malformed.
pub fn load_orb_config() -> OrbConfig {
	let Some(json_text) = orb_config_text() else {
		return OrbConfig::default();
	};

	match OrbConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"orb-field: loaded config (dense above {}px: {} particles, else {})",
				config.dense_threshold, config.dense_particles, config.sparse_particles
			);
			config
		}
		Err(e) => {
			warn!("orb-field: failed to parse orb config: {}", e);
			OrbConfig::default()
		}
	}
}

fn orb_config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("orb-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Welcome screen: the main orb plus controls for listening and mood.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let main_id = engine().config().main_container_id.clone();
	let (listening, set_listening) = signal(false);
	let (mood, set_mood) = signal(100_i32);

	Effect::new(move |_| engine().create_main());

	let toggle_listening = move |_: MouseEvent| {
		let next = !listening.get_untracked();
		set_listening.set(next);
		engine().set_listening(next);
	};

	let on_mood = move |ev: Event| {
		let value = event_target_value(&ev).parse().unwrap_or(100);
		set_mood.set(value);
		engine().apply_mood(value);
	};

	let preset_buttons = MoodPreset::ALL
		.into_iter()
		.map(|preset| {
			view! {
				<button class="preset-button" on:click=move |_| engine().set_mood_preset(preset.key())>
					{preset.key()}
				</button>
			}
		})
		.collect_view();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Orb" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="welcome-screen">
			<section class="bento-card orb-card">
				<div id=main_id class="orb-container" />
			</section>
			<section class="bento-card controls">
				<button class="listen-button" on:click=toggle_listening>
					{move || if listening.get() { "Stop listening" } else { "Listen" }}
				</button>
				<input
					type="range"
					min="0"
					max="100"
					prop:value=move || mood.get().to_string()
					on:change=on_mood
				/>
				<p class="mood-label">
					{move || format!("{:?} · {}", MoodCategory::from_value(mood.get()), MoodCategory::from_value(mood.get()).preset())}
				</p>
				<div class="presets">{preset_buttons}</div>
			</section>
			<section class="bento-card mini">
				<OrbCanvas size=56.0 />
			</section>
		</main>
	}
}
