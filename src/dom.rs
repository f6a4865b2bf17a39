//! Thin lookup and styling helpers over `web-sys`.
//!
//! Optional lookups return `Option` so callers can take an explicit no-op
//! branch when the page does not contain a given element.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::FxError;

/// The browser window.
pub fn window() -> Result<Window, FxError> {
	web_sys::window().ok_or(FxError::MissingElement("window"))
}

/// The current document.
pub fn document() -> Result<Document, FxError> {
	window()?
		.document()
		.ok_or(FxError::MissingElement("document"))
}

/// The `<body>` element.
pub fn body() -> Result<HtmlElement, FxError> {
	document()?.body().ok_or(FxError::MissingElement("body"))
}

/// First element matching `selector`, if any.
pub fn query(selector: &str) -> Option<HtmlElement> {
	document()
		.ok()?
		.query_selector(selector)
		.ok()
		.flatten()?
		.dyn_into()
		.ok()
}

/// First descendant of `root` matching `selector`, if any.
pub fn query_in(root: &Element, selector: &str) -> Option<HtmlElement> {
	root.query_selector(selector).ok().flatten()?.dyn_into().ok()
}

/// Every element matching `selector`, in document order.
pub fn query_all(selector: &str) -> Vec<HtmlElement> {
	let Ok(document) = document() else {
		return Vec::new();
	};
	let Ok(list) = document.query_selector_all(selector) else {
		return Vec::new();
	};
	(0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|node| node.dyn_into::<HtmlElement>().ok())
		.collect()
}

/// Element with the given id, if any.
pub fn by_id(id: &str) -> Option<HtmlElement> {
	document().ok()?.get_element_by_id(id)?.dyn_into().ok()
}

/// Set an inline style property, ignoring rejected values.
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
	let _ = element.style().set_property(property, value);
}

/// Add or remove a class.
pub fn set_class(element: &Element, class: &str, on: bool) {
	let classes = element.class_list();
	let _ = if on {
		classes.add_1(class)
	} else {
		classes.remove_1(class)
	};
}

/// Inner width and height of the viewport in CSS pixels.
pub fn viewport_size() -> (f64, f64) {
	let Ok(window) = window() else {
		return (0.0, 0.0);
	};
	let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
	};
	(read(window.inner_width()), read(window.inner_height()))
}

/// Vertical scroll offset of the page.
pub fn scroll_y() -> f64 {
	window()
		.ok()
		.and_then(|w| w.scroll_y().ok())
		.unwrap_or(0.0)
}

/// Milliseconds since the epoch from the host clock.
pub fn now_ms() -> f64 {
	js_sys::Date::now()
}
