//! Leptos component hosting the particle canvas.
//!
//! The canvas is created by the view; once it is in the document an effect
//! builds the WebGL2 renderer, wires resize and pointer listeners and joins
//! the shared frame loop. Without WebGL2 the canvas stays blank and nothing
//! subscribes to frames.

use gloo::events::EventListener;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::ParticleFieldHandle;
use super::render::ParticleRenderer;
use crate::dom;
use crate::frame::{FrameControl, FrameScheduler};

/// Full-viewport canvas drawing `field` every frame of `frames`.
#[component]
pub fn ParticleBackground(field: ParticleFieldHandle, frames: FrameScheduler) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if field.borrow().is_attached() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();

		let renderer = match ParticleRenderer::new(canvas, field.borrow().cloud()) {
			Ok(renderer) => renderer,
			Err(e) => {
				warn!("portfolio-fx: particle background disabled: {}", e);
				return;
			}
		};
		let (w, h) = dom::viewport_size();
		{
			let mut f = field.borrow_mut();
			f.attach(renderer);
			f.resize(w as f32, h as f32);
		}

		if let Ok(window) = dom::window() {
			let field_resize = field.clone();
			EventListener::new(&window, "resize", move |_| {
				let (w, h) = dom::viewport_size();
				field_resize.borrow_mut().resize(w as f32, h as f32);
			})
			.forget();
		}
		if let Ok(document) = dom::document() {
			let field_pointer = field.clone();
			EventListener::new(&document, "mousemove", move |event| {
				if let Some(event) = event.dyn_ref::<MouseEvent>() {
					field_pointer
						.borrow_mut()
						.pointer_moved(event.client_x() as f32, event.client_y() as f32);
				}
			})
			.forget();
		}

		let field_frame = field.clone();
		frames.subscribe(move |_| {
			field_frame.borrow_mut().tick();
			FrameControl::Continue
		});
		info!(
			"portfolio-fx: particle background running with {} points",
			field.borrow().cloud().len()
		);
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-canvas"
			style="display: block; pointer-events: none;"
		/>
	}
}
