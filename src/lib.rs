//! particle-field: ambient particle background for a personal gallery page.
//!
//! This crate provides a WASM canvas component that renders a field of
//! drifting, twinkling shapes which gather around the pointer.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{ConfigError, FieldConfig, LoadError, ParticleBackground};

/// Id of the optional `<script type="application/json">` holding config overrides.
pub const CONFIG_ELEMENT_ID: &str = "particle-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load simulation overrides from a script element with id="particle-config".
///
/// Returns `None` when the element is absent or its contents are rejected, in
/// which case the built-in constants apply.
pub fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"particle-field: loaded config override (max {} particles)",
				config.max_particles
			);
			Some(config)
		}
		Err(e) => {
			warn!("particle-field: ignoring config override: {}", e);
			None
		}
	}
}

/// Main application component.
/// Renders the gallery page shell with the particle background behind it.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config();

	view! {
		<Html attr:lang="pt-BR" attr:dir="ltr" />
		<Title text="Nossa galeria particular" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="relative overflow-hidden">
			<ParticleBackground config=config />
			<div class="content-layer"></div>
		</main>
	}
}
