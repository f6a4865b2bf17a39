//! Entrance timeline and scroll-triggered reveals through GSAP.
//!
//! GSAP and its ScrollTrigger plugin are optional page scripts looked up on
//! `window`. Tween options are plain serde structs handed over as JSON; the
//! trigger element is attached afterwards since elements do not serialize.

use js_sys::{Array, Function, JSON, Reflect};
use log::info;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::dom;
use crate::error::FxError;

/// Seconds before the hero timeline starts.
pub const HERO_DELAY_S: f64 = 0.5;

/// ScrollTrigger settings attached to a reveal tween.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollTriggerVars {
	/// Trigger start, e.g. `top 80%`.
	pub start: &'static str,
	/// Trigger end.
	pub end: &'static str,
	/// Actions for enter, leave, enter-back and leave-back.
	pub toggle_actions: &'static str,
}

impl ScrollTriggerVars {
	/// Play when the top reaches 80% of the viewport, reverse when leaving
	/// back past it.
	pub fn reveal() -> Self {
		Self {
			start: "top 80%",
			end: "bottom 20%",
			toggle_actions: "play none none reverse",
		}
	}
}

/// A `gsap.from` vars object. Unset fields are left out.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tween {
	/// Target opacity.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub opacity: Option<f64>,
	/// Horizontal offset in pixels.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub x: Option<f64>,
	/// Vertical offset in pixels.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub y: Option<f64>,
	/// Uniform scale factor.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scale: Option<f64>,
	/// Seconds.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub duration: Option<f64>,
	/// Seconds between consecutive targets.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub stagger: Option<f64>,
	/// Seconds.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub delay: Option<f64>,
	/// Plays the tween on scroll instead of immediately.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scroll_trigger: Option<ScrollTriggerVars>,
}

impl Tween {
	/// Fade in from transparent over `duration` seconds.
	pub fn fade(duration: f64) -> Self {
		Self {
			opacity: Some(0.0),
			duration: Some(duration),
			..Self::default()
		}
	}

	/// Set the horizontal offset.
	pub fn x(mut self, x: f64) -> Self {
		self.x = Some(x);
		self
	}

	/// Set the vertical offset.
	pub fn y(mut self, y: f64) -> Self {
		self.y = Some(y);
		self
	}

	/// Set the scale.
	pub fn scale(mut self, scale: f64) -> Self {
		self.scale = Some(scale);
		self
	}

	/// Set the stagger.
	pub fn stagger(mut self, stagger: f64) -> Self {
		self.stagger = Some(stagger);
		self
	}

	/// Set the delay.
	pub fn delay(mut self, delay: f64) -> Self {
		self.delay = Some(delay);
		self
	}

	/// Start the tween when its target scrolls into view.
	pub fn on_scroll(mut self) -> Self {
		self.scroll_trigger = Some(ScrollTriggerVars::reveal());
		self
	}
}

/// One `timeline.from(selector, vars, position)` call.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineStep {
	/// Elements the step animates.
	pub selector: &'static str,
	/// Tween vars for the step.
	pub tween: Tween,
	/// Timeline position parameter, e.g. `-=0.5`.
	pub position: Option<&'static str>,
}

/// The hero section's staggered entrance.
pub fn hero_timeline() -> Vec<TimelineStep> {
	let step = |selector: &'static str, tween: Tween, position: Option<&'static str>| TimelineStep {
		selector,
		tween,
		position,
	};
	vec![
		step(".hero-greeting", Tween::fade(0.8).y(30.0), None),
		step(
			".hero-name .name-part",
			Tween::fade(0.8).y(50.0).stagger(0.2),
			Some("-=0.6"),
		),
		step(".hero-title", Tween::fade(0.8).y(30.0), Some("-=0.4")),
		step(".hero-description", Tween::fade(0.8).y(30.0), Some("-=0.4")),
		step(
			".hero-buttons .btn",
			Tween::fade(0.8).y(30.0).stagger(0.1),
			Some("-=0.4"),
		),
		step(
			".hero-social .social-link",
			Tween::fade(0.6).scale(0.0).stagger(0.1),
			Some("-=0.4"),
		),
		step(".hero-visual", Tween::fade(1.0).scale(0.8), Some("-=0.8")),
	]
}

/// Timeline items slide in from alternating sides.
pub fn timeline_item_tween(index: usize) -> Tween {
	let x = if index % 2 == 0 { -50.0 } else { 50.0 };
	Tween::fade(0.8).x(x).on_scroll()
}

/// Cards fade up one after another.
pub fn staggered_card_tween(index: usize) -> Tween {
	Tween::fade(0.8).y(50.0).delay(index as f64 * 0.1).on_scroll()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, FxError> {
	Ok(JSON::parse(&serde_json::to_string(value)?)?)
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, FxError> {
	let function: Function = Reflect::get(target, &JsValue::from_str(method))?
		.dyn_into()
		.map_err(|_| FxError::Js(format!("`{method}` is not a function")))?;
	Ok(function.apply(target, &args.iter().collect::<Array>())?)
}

fn global(name: &'static str) -> Result<JsValue, FxError> {
	let window = dom::window()?;
	let value = Reflect::get(&window, &JsValue::from_str(name))?;
	if value.is_undefined() || value.is_null() {
		return Err(FxError::MissingLibrary(name));
	}
	Ok(value)
}

/// `gsap.from(target, vars)` with the scroll trigger bound to `trigger`.
fn reveal(
	gsap: &JsValue,
	target: &HtmlElement,
	trigger: &HtmlElement,
	tween: &Tween,
) -> Result<(), FxError> {
	let vars = to_js(tween)?;
	if tween.scroll_trigger.is_some() {
		let scroll_trigger = Reflect::get(&vars, &JsValue::from_str("scrollTrigger"))?;
		Reflect::set(&scroll_trigger, &JsValue::from_str("trigger"), trigger)?;
	}
	call(gsap, "from", &[JsValue::from(target.clone()), vars])?;
	Ok(())
}

/// Run the hero timeline and register scroll reveals for sections, skill
/// categories, portfolio items and timeline entries.
pub fn init() -> Result<(), FxError> {
	let gsap = global("gsap")?;
	let scroll_trigger = global("ScrollTrigger")?;
	call(&gsap, "registerPlugin", &[scroll_trigger])?;

	let timeline = call(&gsap, "timeline", &[to_js(&Tween {
		delay: Some(HERO_DELAY_S),
		..Tween::default()
	})?])?;
	for step in hero_timeline() {
		let mut args = vec![JsValue::from_str(step.selector), to_js(&step.tween)?];
		args.extend(step.position.map(JsValue::from_str));
		call(&timeline, "from", &args)?;
	}

	let header_tween = Tween::fade(1.0).y(50.0).on_scroll();
	// The first section is the hero, animated above.
	for section in dom::query_all("section").iter().skip(1) {
		if let Some(header) = dom::query_in(section, ".section-header") {
			reveal(&gsap, &header, section, &header_tween)?;
		}
	}
	for selector in [".skill-category", ".portfolio-item"] {
		for (index, card) in dom::query_all(selector).iter().enumerate() {
			reveal(&gsap, card, card, &staggered_card_tween(index))?;
		}
	}
	for (index, item) in dom::query_all(".timeline-item").iter().enumerate() {
		reveal(&gsap, item, item, &timeline_item_tween(index))?;
	}

	info!("portfolio-fx: GSAP animations registered");
	Ok(())
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn unset_fields_are_omitted() {
		let vars = serde_json::to_value(Tween::fade(0.8).y(30.0)).unwrap();
		assert_eq!(vars, json!({ "opacity": 0.0, "y": 30.0, "duration": 0.8 }));
	}

	#[test]
	fn scroll_trigger_uses_camel_case() {
		let vars = serde_json::to_value(staggered_card_tween(3)).unwrap();
		assert_eq!(vars["scrollTrigger"]["toggleActions"], "play none none reverse");
		assert_eq!(vars["scrollTrigger"]["start"], "top 80%");
		assert!((vars["delay"].as_f64().unwrap() - 0.3).abs() < 1e-9);
	}

	#[test]
	fn timeline_items_alternate_sides() {
		assert_eq!(timeline_item_tween(0).x, Some(-50.0));
		assert_eq!(timeline_item_tween(1).x, Some(50.0));
		assert_eq!(timeline_item_tween(2).x, Some(-50.0));
	}

	#[test]
	fn hero_timeline_overlaps_after_first_step() {
		let steps = hero_timeline();
		assert_eq!(steps.len(), 7);
		assert_eq!(steps[0].position, None);
		assert!(steps[1..].iter().all(|s| s.position.is_some()));
		assert_eq!(steps[6].tween.scale, Some(0.8));
	}
}
