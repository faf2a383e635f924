//! Leptos component hosting the particle field engine on a canvas.
//!
//! The component sizes a canvas to the window (or its parent), hands it to a
//! [`ParticleFieldEngine`] driven by `requestAnimationFrame`, forwards window
//! resizes and theme changes, and tears everything down on unmount.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use super::config::FieldConfig;
use super::engine::ParticleFieldEngine;
use super::surface::{AnimationFrames, CanvasSurface, FrameCallback};
use super::theme::ThemeMode;

type CanvasEngine = ParticleFieldEngine<CanvasSurface, AnimationFrames>;

const FALLBACK_SIZE: (u32, u32) = (800, 600);

fn window_size(window: &Window) -> Option<(u32, u32)> {
	Some((
		window.inner_width().ok()?.as_f64()? as u32,
		window.inner_height().ok()?.as_f64()? as u32,
	))
}

fn parent_size(canvas: &HtmlCanvasElement) -> Option<(u32, u32)> {
	canvas
		.parent_element()
		.map(|p| (p.client_width().max(0) as u32, p.client_height().max(0) as u32))
}

/// The window's size when fullscreen, the parent's otherwise.
fn field_size(fullscreen: bool, window: Option<(u32, u32)>, parent: Option<(u32, u32)>) -> (u32, u32) {
	let measured = if fullscreen { window } else { parent };
	measured.unwrap_or(FALLBACK_SIZE)
}

fn measure(fullscreen: bool, canvas: &HtmlCanvasElement) -> (u32, u32) {
	let window = web_sys::window().as_ref().and_then(window_size);
	field_size(fullscreen, window, parent_size(canvas))
}

/// Animated particle background.
///
/// With `fullscreen` (the default) the canvas is fixed behind the page and
/// follows the window size. Otherwise it fills its parent, re-measured on every
/// window resize; a parent that changes size on its own is not observed.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(into)] theme: Signal<ThemeMode>,
	#[prop(optional)] config: FieldConfig,
	#[prop(default = true)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let engine: Rc<RefCell<Option<CanvasEngine>>> = Rc::new(RefCell::new(None));
	let frame: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (engine_init, frame_init, resize_cb_init) = (engine.clone(), frame.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("particle-field: no window, not starting");
			return;
		};

		let (w, h) = measure(fullscreen, &canvas);

		let Some(surface) = CanvasSurface::new(canvas.clone()) else {
			warn!("particle-field: 2d context unavailable, not starting");
			return;
		};

		// Never let two engines draw to the same canvas.
		if let Some(ref mut old) = *engine_init.borrow_mut() {
			old.teardown();
		}

		let engine_anim = engine_init.clone();
		*frame_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut e) = *engine_anim.borrow_mut() {
				e.tick();
			}
		}));

		let mut e = ParticleFieldEngine::new(config.clone(), AnimationFrames::new(frame_init.clone()));
		e.initialize(surface, w, h, theme.get_untracked());
		*engine_init.borrow_mut() = Some(e);

		if let Some(old) = resize_cb_init.borrow_mut().take() {
			let _ = window.remove_event_listener_with_callback("resize", old.as_ref().unchecked_ref());
		}
		let engine_resize = engine_init.clone();
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = measure(fullscreen, &canvas);
			if let Some(ref mut e) = *engine_resize.borrow_mut() {
				e.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	});

	let engine_theme = engine.clone();
	Effect::new(move |_| {
		let mode = theme.get();
		if let Some(ref mut e) = *engine_theme.borrow_mut() {
			e.set_theme(mode);
		}
	});

	let owned = SendWrapper::new((engine, frame, resize_cb));
	on_cleanup(move || {
		let (engine, frame, resize_cb) = &*owned;
		if let Some(ref mut e) = *engine.borrow_mut() {
			e.teardown();
		}
		if let (Some(window), Some(cb)) = (web_sys::window(), resize_cb.borrow_mut().take()) {
			let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		// Breaks the engine <-> callback cycle now that no frame is pending.
		*engine.borrow_mut() = None;
		*frame.borrow_mut() = None;
	});

	let style = if fullscreen {
		"position: fixed; top: 0; left: 0; width: 100%; height: 100%; z-index: -1; pointer-events: none;"
	} else {
		"display: block;"
	};

	view! {
		<canvas node_ref=canvas_ref class="particle-field-canvas" style=style />
	}
}
