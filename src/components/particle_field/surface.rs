//! Drawing and frame-scheduling seams between the engine and its host.
//!
//! The engine only ever talks to a [`Surface`] and a [`FrameScheduler`]. In the
//! browser these are a 2D canvas context and `requestAnimationFrame`; tests use
//! in-memory doubles.

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::theme::Color;

/// Something particles can be drawn onto.
pub trait Surface {
	/// Whether the surface can currently be drawn to.
	fn is_attached(&self) -> bool;
	/// Resize the backing buffer. Must not leave the output stretched.
	fn set_size(&mut self, width: u32, height: u32);
	/// Erase the whole surface.
	fn clear(&mut self);
	/// Fill a circle.
	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color);
	/// Draw a straight line.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
}

/// Opaque id of a pending frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Display-synchronized "call me next frame" primitive.
pub trait FrameScheduler {
	/// Queue the next frame, or `None` if the request could not be made.
	fn request_frame(&mut self) -> Option<FrameHandle>;
	/// Drop a pending request.
	fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A `<canvas>` element with its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Wrap `canvas`, or `None` if it has no 2D context.
	pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
		let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
		Some(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn is_attached(&self) -> bool {
		self.canvas.is_connected()
	}

	fn set_size(&mut self, width: u32, height: u32) {
		self.canvas.set_width(width);
		self.canvas.set_height(height);
	}

	fn clear(&mut self) {
		self.ctx.clear_rect(
			0.0,
			0.0,
			self.canvas.width() as f64,
			self.canvas.height() as f64,
		);
	}

	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.ctx.begin_path();
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}
}

/// Shared slot for the per-frame callback. The host fills it once the engine
/// exists; the scheduler hands it to `requestAnimationFrame` each frame.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` scheduler.
pub struct AnimationFrames {
	callback: FrameCallback,
}

impl AnimationFrames {
	/// Scheduler that invokes whatever `callback` holds.
	pub fn new(callback: FrameCallback) -> Self {
		Self { callback }
	}
}

impl FrameScheduler for AnimationFrames {
	fn request_frame(&mut self) -> Option<FrameHandle> {
		let window = web_sys::window()?;
		let callback = self.callback.borrow();
		let cb = callback.as_ref()?;
		window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
			.map(FrameHandle)
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle.0);
		}
	}
}
