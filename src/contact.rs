//! Contact form: floating labels and a simulated submit cycle.
//!
//! Nothing is sent anywhere. A submit shows a loading state, then a
//! success state, then resets the form.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use crate::dom;
use crate::error::FxError;

/// Time spent in the loading state.
pub const LOADING_MS: u32 = 2000;
/// Time the success state is shown before the form resets.
pub const SUCCESS_MS: u32 = 3000;

/// Button text after a submit succeeds.
pub const SENT_LABEL: &str = "Message Sent!";
/// Button text while idle.
pub const IDLE_LABEL: &str = "Send Message";

/// Where the submit button is in its cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
	/// Accepting submits.
	#[default]
	Idle,
	/// Button disabled, spinner shown.
	Loading,
	/// Confirmation shown until the reset.
	Success,
}

/// Loading, success and reset, in that order; submits are only accepted
/// while idle.
#[derive(Clone, Debug, Default)]
pub struct SubmitCycle {
	phase: SubmitPhase,
}

impl SubmitCycle {
	/// Current phase.
	pub fn phase(&self) -> SubmitPhase {
		self.phase
	}

	/// Start a cycle. Returns `false` if one is already running.
	pub fn submit(&mut self) -> bool {
		if self.phase != SubmitPhase::Idle {
			return false;
		}
		self.phase = SubmitPhase::Loading;
		true
	}

	/// Loading is over; show success.
	pub fn finish_loading(&mut self) {
		if self.phase == SubmitPhase::Loading {
			self.phase = SubmitPhase::Success;
		}
	}

	/// Back to idle.
	pub fn reset(&mut self) {
		self.phase = SubmitPhase::Idle;
	}
}

/// Transform and color for a floating label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelStyle {
	/// CSS `transform` for the label.
	pub transform: &'static str,
	/// CSS `color` for the label.
	pub color: &'static str,
}

/// Label lifted above a focused or filled field.
pub const LABEL_RAISED: LabelStyle = LabelStyle {
	transform: "translateY(-25px) scale(0.8)",
	color: "var(--primary-color)",
};

/// Label resting inside an empty field.
pub const LABEL_RESTING: LabelStyle = LabelStyle {
	transform: "translateY(0) scale(1)",
	color: "var(--gray-color)",
};

/// Label style after focus changes, or `None` to leave it as is. A blurred
/// field with content keeps its label raised.
pub fn label_after(focused: bool, value: &str) -> Option<LabelStyle> {
	if focused {
		Some(LABEL_RAISED)
	} else if value.is_empty() {
		Some(LABEL_RESTING)
	} else {
		None
	}
}

fn apply_label(label: &HtmlElement, style: LabelStyle) {
	dom::set_style(label, "transform", style.transform);
	dom::set_style(label, "color", style.color);
}

fn field_value(field: &HtmlElement) -> String {
	if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
		input.value()
	} else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
		area.value()
	} else {
		String::new()
	}
}

fn set_disabled(button: &HtmlElement, disabled: bool) {
	if let Some(button) = button.dyn_ref::<HtmlButtonElement>() {
		button.set_disabled(disabled);
	}
}

fn set_button_text(button: &HtmlElement, text: &str) {
	if let Some(span) = dom::query_in(button, ".btn-text") {
		span.set_text_content(Some(text));
	}
}

/// Wire `#contact-form`. A page without the form is left alone.
pub fn init() -> Result<(), FxError> {
	let Some(form) = dom::by_id("contact-form") else {
		return Ok(());
	};
	let button = dom::query(".btn-submit").ok_or(FxError::MissingElement(".btn-submit"))?;

	let mut labels = Vec::new();
	for group in dom::query_all(".form-group") {
		let label = dom::query_in(&group, "label");
		if let (Some(field), Some(label)) = (dom::query_in(&group, "input, textarea"), label.clone()) {
			for (event, focused) in [("focus", true), ("blur", false)] {
				let (field_event, label) = (field.clone(), label.clone());
				EventListener::new(&field, event, move |_| {
					if let Some(style) = label_after(focused, &field_value(&field_event)) {
						apply_label(&label, style);
					}
				})
				.forget();
			}
		}
		labels.extend(label);
	}
	let labels = Rc::new(labels);

	let cycle = Rc::new(RefCell::new(SubmitCycle::default()));
	let form_submit = form.clone();
	EventListener::new_with_options(
		&form,
		"submit",
		EventListenerOptions::enable_prevent_default(),
		move |event| {
			event.prevent_default();
			if !cycle.borrow_mut().submit() {
				debug!("portfolio-fx: submit ignored, already sending");
				return;
			}
			dom::set_class(&button, "loading", true);
			set_disabled(&button, true);

			let (cycle, button, form, labels) = (
				cycle.clone(),
				button.clone(),
				form_submit.clone(),
				labels.clone(),
			);
			Timeout::new(LOADING_MS, move || {
				cycle.borrow_mut().finish_loading();
				dom::set_class(&button, "loading", false);
				dom::set_class(&button, "success", true);
				set_button_text(&button, SENT_LABEL);

				Timeout::new(SUCCESS_MS, move || {
					if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
						form.reset();
					}
					dom::set_class(&button, "success", false);
					set_button_text(&button, IDLE_LABEL);
					set_disabled(&button, false);
					for label in labels.iter() {
						apply_label(label, LABEL_RESTING);
					}
					cycle.borrow_mut().reset();
				})
				.forget();
			})
			.forget();
		},
	)
	.forget();

	info!("portfolio-fx: contact form wired");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cycle_runs_loading_success_idle() {
		let mut cycle = SubmitCycle::default();
		assert!(cycle.submit());
		assert_eq!(cycle.phase(), SubmitPhase::Loading);
		cycle.finish_loading();
		assert_eq!(cycle.phase(), SubmitPhase::Success);
		cycle.reset();
		assert_eq!(cycle.phase(), SubmitPhase::Idle);
	}

	#[test]
	fn submits_during_a_cycle_are_ignored() {
		let mut cycle = SubmitCycle::default();
		assert!(cycle.submit());
		assert!(!cycle.submit());
		cycle.finish_loading();
		assert!(!cycle.submit());
		cycle.reset();
		assert!(cycle.submit());
	}

	#[test]
	fn finish_loading_needs_a_running_cycle() {
		let mut cycle = SubmitCycle::default();
		cycle.finish_loading();
		assert_eq!(cycle.phase(), SubmitPhase::Idle);
	}

	#[test]
	fn labels_float_on_focus_and_rest_when_empty() {
		assert_eq!(label_after(true, ""), Some(LABEL_RAISED));
		assert_eq!(label_after(true, "hello"), Some(LABEL_RAISED));
		assert_eq!(label_after(false, ""), Some(LABEL_RESTING));
		assert_eq!(label_after(false, "hello"), None);
	}
}
