//! Custom cursor: a dot and a ring easing toward the pointer at different
//! rates, both scaling up over interactive elements.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use crate::dom;
use crate::error::FxError;
use crate::frame::{FrameControl, FrameScheduler};

/// Share of the remaining distance the dot covers each frame.
pub const DOT_EASING: f64 = 0.1;
/// Share of the remaining distance the ring covers each frame.
pub const RING_EASING: f64 = 0.05;
/// Elements that enlarge the cursor while hovered.
pub const HOVER_SELECTOR: &str = "a, button, .portfolio-item, .skill-item";

const HOVER_SCALE: f64 = 1.5;

/// Positions of the pointer and both cursor parts, in viewport pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CursorFollower {
	pointer: [f64; 2],
	dot: [f64; 2],
	ring: [f64; 2],
}

impl CursorFollower {
	/// Fresh, empty state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record the pointer position both parts ease toward.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		self.pointer = [x, y];
	}

	/// Ease both parts one frame toward the pointer; returns `(dot, ring)`.
	pub fn step(&mut self) -> ([f64; 2], [f64; 2]) {
		for axis in 0..2 {
			self.dot[axis] += (self.pointer[axis] - self.dot[axis]) * DOT_EASING;
			self.ring[axis] += (self.pointer[axis] - self.ring[axis]) * RING_EASING;
		}
		(self.dot, self.ring)
	}

	/// Current dot position.
	pub fn dot(&self) -> [f64; 2] {
		self.dot
	}

	/// Current ring position.
	pub fn ring(&self) -> [f64; 2] {
		self.ring
	}
}

/// Centering transform for a cursor part, scaled while hovering.
pub fn hover_transform(hovering: bool) -> String {
	let scale = if hovering { HOVER_SCALE } else { 1.0 };
	format!("translate(-50%, -50%) scale({scale})")
}

/// Start the follower. A page without `.cursor` keeps the native cursor.
pub fn init(frames: &FrameScheduler) -> Result<(), FxError> {
	if dom::query(".cursor").is_none() {
		return Ok(());
	}
	let dot = dom::query(".cursor-dot").ok_or(FxError::MissingElement(".cursor-dot"))?;
	let ring = dom::query(".cursor-ring").ok_or(FxError::MissingElement(".cursor-ring"))?;
	let follower = Rc::new(RefCell::new(CursorFollower::new()));

	let document = dom::document()?;
	let follower_move = follower.clone();
	EventListener::new(&document, "mousemove", move |event| {
		if let Some(event) = event.dyn_ref::<MouseEvent>() {
			follower_move
				.borrow_mut()
				.pointer_moved(event.client_x() as f64, event.client_y() as f64);
		}
	})
	.forget();

	let (dot_frame, ring_frame) = (dot.clone(), ring.clone());
	frames.subscribe(move |_| {
		let ([dx, dy], [rx, ry]) = follower.borrow_mut().step();
		place(&dot_frame, dx, dy);
		place(&ring_frame, rx, ry);
		FrameControl::Continue
	});

	let targets = dom::query_all(HOVER_SELECTOR);
	for target in &targets {
		for (event, hovering) in [("mouseenter", true), ("mouseleave", false)] {
			let (dot, ring) = (dot.clone(), ring.clone());
			EventListener::new(target, event, move |_| {
				let transform = hover_transform(hovering);
				dom::set_style(&dot, "transform", &transform);
				dom::set_style(&ring, "transform", &transform);
			})
			.forget();
		}
	}
	info!(
		"portfolio-fx: custom cursor on, {} hover targets",
		targets.len()
	);
	Ok(())
}

fn place(element: &HtmlElement, x: f64, y: f64) {
	dom::set_style(element, "left", &format!("{x}px"));
	dom::set_style(element, "top", &format!("{y}px"));
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dot_leads_ring() {
		let mut cursor = CursorFollower::new();
		cursor.pointer_moved(100.0, 200.0);
		let (dot, ring) = cursor.step();
		assert_eq!(dot, [10.0, 20.0]);
		assert_eq!(ring, [5.0, 10.0]);
	}

	#[test]
	fn both_parts_converge_on_a_still_pointer() {
		let mut cursor = CursorFollower::new();
		cursor.pointer_moved(640.0, 360.0);
		for _ in 0..400 {
			cursor.step();
		}
		for (got, want) in cursor.ring().iter().zip([640.0, 360.0]) {
			assert!((got - want).abs() < 0.01);
		}
		assert!((cursor.dot()[0] - 640.0).abs() < 1e-6);
	}

	#[test]
	fn hover_scales_up() {
		assert_eq!(hover_transform(true), "translate(-50%, -50%) scale(1.5)");
		assert_eq!(hover_transform(false), "translate(-50%, -50%) scale(1)");
	}
}
