//! Page configuration.
//!
//! Defaults match the stock portfolio page. A page may override any field
//! with a JSON blob in `<script id="portfolio-config" type="application/json">`.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::dom;

/// Id of the optional configuration script element.
pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

/// Tunables for every component.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FxConfig {
	/// Strings cycled by the typing effect.
	pub typing_texts: Vec<String>,
	/// Number of points in the particle background.
	pub particle_count: usize,
	/// Duration of an anchor smooth-scroll.
	pub scroll_duration_ms: f64,
	/// Height of the fixed header subtracted from anchor targets.
	pub header_offset: f64,
	/// Look-ahead added to the scroll position when picking the active section.
	pub nav_offset: f64,
	/// Number of increments a counter takes to reach its target.
	pub counter_steps: u32,
	/// Delay between counter increments.
	pub counter_interval_ms: u32,
}

impl Default for FxConfig {
	fn default() -> Self {
		Self {
			typing_texts: [
				"Data Analyst",
				"Python Developer",
				"Power BI Expert",
				"SQL Specialist",
				"Problem Solver",
			]
			.into_iter()
			.map(String::from)
			.collect(),
			particle_count: 100,
			scroll_duration_ms: 1000.0,
			header_offset: 80.0,
			nav_offset: 100.0,
			counter_steps: 50,
			counter_interval_ms: 50,
		}
	}
}

impl FxConfig {
	/// Parse a JSON override; missing fields keep their defaults.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<Self>(text).map(Self::sanitized)
	}

	/// Load the page's configuration, falling back to defaults.
	pub fn load() -> Self {
		let Some(text) = dom::by_id(CONFIG_ELEMENT_ID)
			.and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
			.and_then(|script| script.text().ok())
		else {
			return Self::default();
		};

		match Self::from_json(&text) {
			Ok(config) => {
				info!("portfolio-fx: loaded page configuration");
				config
			}
			Err(e) => {
				warn!("portfolio-fx: failed to parse configuration: {}", e);
				Self::default()
			}
		}
	}

	fn sanitized(mut self) -> Self {
		let defaults = Self::default();
		self.typing_texts.retain(|t| !t.is_empty());
		if self.typing_texts.is_empty() {
			self.typing_texts = defaults.typing_texts;
		}
		self.counter_steps = self.counter_steps.max(1);
		if !self.scroll_duration_ms.is_finite() || self.scroll_duration_ms <= 0.0 {
			self.scroll_duration_ms = defaults.scroll_duration_ms;
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_override_keeps_defaults() {
		let config = FxConfig::from_json(r#"{ "particleCount": 40 }"#).unwrap();
		assert_eq!(config.particle_count, 40);
		assert_eq!(config.typing_texts.len(), 5);
		assert_eq!(config.counter_steps, 50);
	}

	#[test]
	fn empty_texts_fall_back() {
		let config = FxConfig::from_json(r#"{ "typingTexts": ["", ""] }"#).unwrap();
		assert_eq!(config.typing_texts, FxConfig::default().typing_texts);
	}

	#[test]
	fn zero_counter_steps_is_clamped() {
		let config = FxConfig::from_json(r#"{ "counterSteps": 0 }"#).unwrap();
		assert_eq!(config.counter_steps, 1);
	}

	#[test]
	fn zero_scroll_duration_falls_back() {
		let config = FxConfig::from_json(r#"{ "scrollDurationMs": 0 }"#).unwrap();
		assert_eq!(config.scroll_duration_ms, FxConfig::default().scroll_duration_ms);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(FxConfig::from_json("{ particleCount: }").is_err());
	}
}
