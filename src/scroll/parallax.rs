//! Scroll-linked transforms for the floating shapes, the hero visual and
//! the `--scroll-hue` custom property.

use gloo::events::EventListener;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom;
use crate::error::FxError;
use crate::timing::throttle;

/// Minimum gap between parallax updates.
pub const THROTTLE_MS: u32 = 16;
/// Hue shift at one full viewport of scroll.
pub const MAX_HUE_SHIFT: f64 = 30.0;

/// Transform for the `index`th floating shape.
pub fn shape_transform(index: usize, scrolled: f64) -> String {
	let speed = 0.1 + index as f64 * 0.05;
	format!(
		"translateY({}px) rotate({}deg)",
		scrolled * speed,
		scrolled * 0.1
	)
}

/// Transform for `.hero-visual`, which drifts up at half the scroll speed.
pub fn hero_transform(scrolled: f64) -> String {
	format!("translateY({}px)", scrolled * -0.5)
}

/// `--scroll-hue` for a scroll depth, saturating after one viewport.
pub fn scroll_hue(scrolled: f64, viewport_height: f64) -> f64 {
	if viewport_height <= 0.0 {
		return MAX_HUE_SHIFT;
	}
	(scrolled / viewport_height).clamp(0.0, 1.0) * MAX_HUE_SHIFT
}

fn apply(root: Option<&HtmlElement>) {
	let scrolled = dom::scroll_y();
	for (index, shape) in dom::query_all(".floating-shapes .shape").iter().enumerate() {
		dom::set_style(shape, "transform", &shape_transform(index, scrolled));
	}
	if let Some(hero) = dom::query(".hero-visual") {
		dom::set_style(&hero, "transform", &hero_transform(scrolled));
	}
	if let Some(root) = root {
		let (_, height) = dom::viewport_size();
		dom::set_style(root, "--scroll-hue", &scroll_hue(scrolled, height).to_string());
	}
}

/// Throttled parallax and scroll hue on window scroll.
pub fn init() -> Result<(), FxError> {
	let window = dom::window()?;
	let root = dom::document()?
		.document_element()
		.and_then(|el| el.dyn_into::<HtmlElement>().ok());
	let mut on_scroll = throttle(THROTTLE_MS, move || apply(root.as_ref()));
	EventListener::new(&window, "scroll", move |_| on_scroll()).forget();
	info!("portfolio-fx: parallax on");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn later_shapes_move_faster() {
		assert_eq!(shape_transform(0, 100.0), "translateY(10px) rotate(10deg)");
		assert_eq!(shape_transform(2, 100.0), "translateY(20px) rotate(10deg)");
	}

	#[test]
	fn hero_moves_against_scroll() {
		assert_eq!(hero_transform(200.0), "translateY(-100px)");
	}

	#[test]
	fn hue_saturates_after_one_viewport() {
		assert_eq!(scroll_hue(0.0, 800.0), 0.0);
		assert_eq!(scroll_hue(400.0, 800.0), 15.0);
		assert_eq!(scroll_hue(4000.0, 800.0), 30.0);
		assert_eq!(scroll_hue(-80.0, 800.0), 0.0);
	}
}
