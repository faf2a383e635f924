//! particle-field: animated particle background for a single-page site.
//!
//! This crate provides a WASM canvas component that renders a drifting field of
//! particles joined by fading proximity lines, with light and dark palettes.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Only needed for its `js` feature, which gives `rand` entropy on wasm.
use getrandom as _;

pub mod components;

pub use components::particle_field::{
	ConfigError, FieldConfig, ParticleFieldCanvas, ParticleFieldEngine, ThemeMode,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load field configuration from a script element with id="particle-config".
/// Missing element means defaults; a broken one is logged and ignored.
fn load_field_config() -> FieldConfig {
	let Some(text) = config_script_text() else {
		return FieldConfig::default();
	};

	match FieldConfig::from_json(&text) {
		Ok(config) => {
			info!(
				"particle-field: loaded config (divisor {}, cap {}, link distance {})",
				config.divisor, config.max_count, config.link_distance
			);
			config
		}
		Err(e) => {
			warn!("particle-field: {}, using defaults", e);
			FieldConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Theme currently declared on the document root's class list.
fn initial_theme() -> ThemeMode {
	web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
		.map(|root| ThemeMode::from_class_list(&root.class_name()))
		.unwrap_or_default()
}

/// Mirror `mode` onto the document root so page styles follow it.
fn apply_root_class(mode: ThemeMode) {
	let Some(root) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
	else {
		return;
	};
	let classes = root.class_list();
	let _ = classes.remove_1(mode.toggle().as_str());
	let _ = classes.add_1(mode.as_str());
}

/// Light/dark toggle button.
#[component]
pub fn ThemeSwitcher(theme: RwSignal<ThemeMode>) -> impl IntoView {
	view! {
		<button
			class="theme-switcher"
			on:click=move |_| theme.update(|t| *t = t.toggle())
			aria-label=move || format!("Switch to {} mode", theme.get().toggle().as_str())
		>
			{move || match theme.get() {
				ThemeMode::Light => "\u{2600}",
				ThemeMode::Dark => "\u{263E}",
			}}
		</button>
	}
}

/// Main application component.
/// Reads theme and field config from the DOM and renders the background.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config();
	let theme = RwSignal::new(initial_theme());

	Effect::new(move |_| {
		let mode = theme.get();
		apply_root_class(mode);
		info!("particle-field: theme is {}", mode.as_str());
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas theme=theme config=config fullscreen=true />
		<ThemeSwitcher theme=theme />
	}
}
