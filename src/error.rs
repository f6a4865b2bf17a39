//! Error type shared by every component initializer.
//!
//! Nothing on the page is fatal: initializers return [`FxError`] so the
//! orchestrator can log what was skipped and carry on with the rest.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why a component could not be wired up.
#[derive(Debug, Error)]
pub enum FxError {
	/// A required element was not found in the document.
	#[error("missing element `{0}`")]
	MissingElement(&'static str),
	/// The WebGL2 pipeline could not be created.
	#[error("WebGL: {0}")]
	WebGl(String),
	/// A host call threw.
	#[error("JavaScript error: {0}")]
	Js(String),
	/// An optional third-party script is not loaded on the page.
	#[error("{0} is not loaded")]
	MissingLibrary(&'static str),
	/// `localStorage` is disabled or unavailable.
	#[error("storage unavailable")]
	StorageUnavailable,
	/// Configuration or tween options failed to (de)serialize.
	#[error("serialization: {0}")]
	Serde(#[from] serde_json::Error),
}

impl From<JsValue> for FxError {
	fn from(value: JsValue) -> Self {
		Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

impl From<FxError> for JsValue {
	fn from(error: FxError) -> Self {
		JsValue::from_str(&error.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_missing_piece() {
		assert_eq!(
			FxError::MissingElement("#contact-form").to_string(),
			"missing element `#contact-form`"
		);
		assert_eq!(FxError::MissingLibrary("GSAP").to_string(), "GSAP is not loaded");
	}

	#[test]
	fn json_errors_convert() {
		let err = serde_json::from_str::<u32>("nope").unwrap_err();
		assert!(matches!(FxError::from(err), FxError::Serde(_)));
	}
}
